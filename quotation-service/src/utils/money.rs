//! Decimal arithmetic helpers for monetary values.
//!
//! Everything here saturates rather than overflowing so the calculation
//! engine stays total over any input.

use rust_decimal::{Decimal, RoundingStrategy};

/// Display precision for currency amounts.
pub const CURRENCY_DP: u32 = 2;

pub const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Tolerance used when comparing derived monetary values.
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// `base * percentage / 100`.
pub fn percent_of(base: Decimal, percentage: Decimal) -> Decimal {
    base.saturating_mul(percentage) / ONE_HUNDRED
}

/// `part / whole * 100`, or zero when `whole` is zero.
pub fn ratio_as_percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .map(|ratio| ratio.saturating_mul(ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Clamp into `[min, max]`. When the bounds cross, `min` wins.
pub fn clamp(value: Decimal, min: Decimal, max: Decimal) -> Decimal {
    value.min(max).max(min)
}

/// Clamp to zero from below.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Clamp a percentage into `[0, 100]`.
pub fn clamp_percentage(value: Decimal) -> Decimal {
    clamp(value, Decimal::ZERO, ONE_HUNDRED)
}

/// Round a currency amount for presentation (half away from zero).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum with saturation.
pub fn sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// True when two amounts differ by no more than one cent.
pub fn approx_eq(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= MONEY_TOLERANCE
}
