//! Pricing mode resolution: how VAT relates to the discounted subtotal.

use crate::models::PricingMode;
use crate::utils::money;
use rust_decimal::Decimal;
use serde::Serialize;

/// VAT split of the discounted subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VatResolution {
    /// Tax-exclusive base.
    pub taxable_base: Decimal,
    pub vat_amount: Decimal,
    /// Gross figure including VAT.
    pub total: Decimal,
}

/// Resolve VAT for `discounted_subtotal` under `mode`.
///
/// Always computed from the subtotal passed in; nothing from an earlier
/// resolution is reused. Negative VAT percentages are treated as zero;
/// there is no upper bound.
pub fn resolve_vat(
    discounted_subtotal: Decimal,
    has_vat: bool,
    vat_percentage: Decimal,
    mode: PricingMode,
) -> VatResolution {
    let rate = if has_vat {
        money::non_negative(vat_percentage)
    } else {
        Decimal::ZERO
    };

    match mode {
        PricingMode::Net => {
            let vat_amount = money::percent_of(discounted_subtotal, rate);
            VatResolution {
                taxable_base: discounted_subtotal,
                vat_amount,
                total: discounted_subtotal.saturating_add(vat_amount),
            }
        }
        PricingMode::VatIncluded => {
            let divisor = Decimal::ONE.saturating_add(rate / money::ONE_HUNDRED);
            let taxable_base = discounted_subtotal
                .checked_div(divisor)
                .unwrap_or(discounted_subtotal);
            VatResolution {
                taxable_base,
                vat_amount: discounted_subtotal - taxable_base,
                total: discounted_subtotal,
            }
        }
    }
}
