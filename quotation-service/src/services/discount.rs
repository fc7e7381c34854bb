//! Special discount: one discount on the subtotal, editable either as a
//! percentage or as an amount, with the other representation derived.

use crate::models::AmountInputMode;
use crate::utils::money;
use rust_decimal::Decimal;
use serde::Serialize;

/// Both representations of the resolved discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscountBreakdown {
    /// In `[0, 100]`; zero when the subtotal is zero.
    pub percentage: Decimal,
    /// In `[0, subtotal]`.
    pub amount: Decimal,
}

impl DiscountBreakdown {
    pub fn none() -> Self {
        Self {
            percentage: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }

    /// `subtotal - amount`, never negative.
    pub fn apply(&self, subtotal: Decimal) -> Decimal {
        money::non_negative(subtotal - self.amount)
    }
}

/// Resolve the discount from whichever representation is authoritative.
pub fn resolve_discount(
    subtotal: Decimal,
    mode: AmountInputMode,
    value: Decimal,
) -> DiscountBreakdown {
    let subtotal = money::non_negative(subtotal);

    match mode {
        AmountInputMode::Percentage => {
            let percentage = money::clamp_percentage(value);
            DiscountBreakdown {
                percentage,
                amount: money::percent_of(subtotal, percentage),
            }
        }
        AmountInputMode::Amount => {
            let amount = money::clamp(value, Decimal::ZERO, subtotal);
            DiscountBreakdown {
                percentage: money::ratio_as_percent(amount, subtotal),
                amount,
            }
        }
    }
}

/// Editing state for the special discount.
///
/// Whichever field the user touched last is authoritative; the other is
/// derived from it against the current subtotal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialDiscount {
    mode: AmountInputMode,
    percentage: Decimal,
    amount: Decimal,
}

impl Default for SpecialDiscount {
    fn default() -> Self {
        Self {
            mode: AmountInputMode::Percentage,
            percentage: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }
}

impl SpecialDiscount {
    pub fn from_config(subtotal: Decimal, mode: AmountInputMode, value: Decimal) -> Self {
        let mut discount = Self::default();
        match mode {
            AmountInputMode::Percentage => discount.edit_percentage(subtotal, value),
            AmountInputMode::Amount => discount.edit_amount(subtotal, value),
        }
        discount
    }

    pub fn mode(&self) -> AmountInputMode {
        self.mode
    }

    pub fn percentage(&self) -> Decimal {
        self.percentage
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The value that drives the other field.
    pub fn authoritative_value(&self) -> Decimal {
        match self.mode {
            AmountInputMode::Percentage => self.percentage,
            AmountInputMode::Amount => self.amount,
        }
    }

    pub fn edit_percentage(&mut self, subtotal: Decimal, percentage: Decimal) {
        self.mode = AmountInputMode::Percentage;
        self.store(resolve_discount(subtotal, self.mode, percentage));
    }

    pub fn edit_amount(&mut self, subtotal: Decimal, amount: Decimal) {
        self.mode = AmountInputMode::Amount;
        self.store(resolve_discount(subtotal, self.mode, amount));
    }

    /// Re-derive after the subtotal changed, keeping the authoritative field.
    pub fn resync(&mut self, subtotal: Decimal) {
        self.store(resolve_discount(subtotal, self.mode, self.authoritative_value()));
    }

    pub fn breakdown(&self) -> DiscountBreakdown {
        DiscountBreakdown {
            percentage: self.percentage,
            amount: self.amount,
        }
    }

    fn store(&mut self, breakdown: DiscountBreakdown) {
        self.percentage = breakdown.percentage;
        self.amount = breakdown.amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    #[test]
    fn percentage_derives_amount() {
        let discount = resolve_discount(d(1000), AmountInputMode::Percentage, d(10));
        assert_eq!(discount.amount, d(100));
        assert_eq!(discount.apply(d(1000)), d(900));
    }

    #[test]
    fn amount_derives_percentage() {
        let discount = resolve_discount(d(1000), AmountInputMode::Amount, d(150));
        assert_eq!(discount.percentage, d(15));
        assert_eq!(discount.amount, d(150));
    }

    #[test]
    fn percentage_is_clamped() {
        let high = resolve_discount(d(1000), AmountInputMode::Percentage, d(150));
        assert_eq!(high.percentage, d(100));
        assert_eq!(high.amount, d(1000));
        assert_eq!(high.apply(d(1000)), Decimal::ZERO);

        let low = resolve_discount(d(1000), AmountInputMode::Percentage, d(-5));
        assert_eq!(low, DiscountBreakdown::none());
    }

    #[test]
    fn amount_is_clamped_to_subtotal() {
        let discount = resolve_discount(d(500), AmountInputMode::Amount, d(800));
        assert_eq!(discount.amount, d(500));
        assert_eq!(discount.percentage, d(100));

        let negative = resolve_discount(d(500), AmountInputMode::Amount, d(-1));
        assert_eq!(negative.amount, Decimal::ZERO);
    }

    #[test]
    fn zero_subtotal_yields_zero_percentage() {
        let discount = resolve_discount(Decimal::ZERO, AmountInputMode::Amount, d(150));
        assert_eq!(discount.percentage, Decimal::ZERO);
        assert_eq!(discount.amount, Decimal::ZERO);
    }

    #[test]
    fn editing_switches_the_authoritative_field() {
        let mut discount = SpecialDiscount::default();

        discount.edit_percentage(d(1000), d(10));
        assert_eq!(discount.mode(), AmountInputMode::Percentage);
        assert_eq!(discount.amount(), d(100));

        discount.edit_amount(d(1000), d(250));
        assert_eq!(discount.mode(), AmountInputMode::Amount);
        assert_eq!(discount.percentage(), d(25));
    }

    #[test]
    fn resync_keeps_percentage_when_percentage_was_edited() {
        let mut discount = SpecialDiscount::from_config(d(1000), AmountInputMode::Percentage, d(10));
        discount.resync(d(2000));
        assert_eq!(discount.percentage(), d(10));
        assert_eq!(discount.amount(), d(200));
    }

    #[test]
    fn resync_keeps_amount_when_amount_was_edited() {
        let mut discount = SpecialDiscount::from_config(d(1000), AmountInputMode::Amount, d(100));
        discount.resync(d(2000));
        assert_eq!(discount.amount(), d(100));
        assert_eq!(discount.percentage(), d(5));
    }

    #[test]
    fn percentage_amount_round_trip() {
        let subtotal = Decimal::new(123_457, 2);
        let mut discount = SpecialDiscount::default();
        discount.edit_percentage(subtotal, Decimal::new(1275, 2));
        let derived_amount = discount.amount();

        discount.edit_amount(subtotal, derived_amount);
        assert!(money::approx_eq(discount.percentage(), Decimal::new(1275, 2)));
    }
}
