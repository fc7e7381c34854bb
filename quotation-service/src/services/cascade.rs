//! Tax & deposit cascade.
//!
//! subtotal → discount → VAT (mode dependent) → withholding → deposit split.
//! Each stage reads only the previous stage's output. The whole pipeline is
//! a pure function of `(groups, config)`; callers re-run it on every edit.

use crate::models::{AmountInputMode, QuotationFinancialsConfig, QuotationTotals, WorkItemGroup};
use crate::services::discount::resolve_discount;
use crate::services::pricing::resolve_vat;
use crate::utils::money;
use rust_decimal::Decimal;
use tracing::trace;

/// Σ group totals.
pub fn subtotal_of(groups: &[WorkItemGroup]) -> Decimal {
    money::sum(groups.iter().map(WorkItemGroup::total))
}

/// Compute quotation totals for the given groups.
pub fn calculate_totals(
    groups: &[WorkItemGroup],
    config: &QuotationFinancialsConfig,
) -> QuotationTotals {
    calculate_from_subtotal(subtotal_of(groups), config)
}

/// Run the cascade starting from an already summed subtotal.
pub fn calculate_from_subtotal(
    subtotal: Decimal,
    config: &QuotationFinancialsConfig,
) -> QuotationTotals {
    let subtotal = money::non_negative(subtotal);

    let discount = resolve_discount(
        subtotal,
        config.special_discount_type,
        config.special_discount_value,
    );
    let discounted_subtotal = discount.apply(subtotal);

    let vat = resolve_vat(
        discounted_subtotal,
        config.has_vat,
        config.vat_percentage,
        config.pricing_mode,
    );

    // Withholding applies to the pre-VAT value of the goods. Like VAT it has
    // no upper bound; only negative rates are treated as zero.
    let withholding_amount = if config.has_withholding_tax {
        money::percent_of(
            vat.taxable_base,
            money::non_negative(config.withholding_tax_percentage),
        )
    } else {
        Decimal::ZERO
    };
    // Nothing is payable once withholding exceeds the total; the floor keeps
    // the deposit split non-negative.
    let final_total = money::non_negative(vat.total - withholding_amount);

    let deposit_amount = match config.deposit_mode {
        AmountInputMode::Percentage => money::clamp(
            money::percent_of(
                final_total,
                money::clamp_percentage(config.deposit_percentage),
            ),
            Decimal::ZERO,
            final_total,
        ),
        AmountInputMode::Amount => {
            money::clamp(config.deposit_amount_input, Decimal::ZERO, final_total)
        }
    };
    let remaining_amount = final_total - deposit_amount;

    trace!(
        %subtotal,
        %discounted_subtotal,
        vat_amount = %vat.vat_amount,
        %final_total,
        %deposit_amount,
        "Quotation cascade computed"
    );

    QuotationTotals {
        subtotal,
        discount_percentage: discount.percentage,
        discount_amount: discount.amount,
        discounted_subtotal,
        taxable_base: vat.taxable_base,
        vat_amount: vat.vat_amount,
        total: vat.total,
        withholding_amount,
        final_total,
        deposit_amount,
        remaining_amount,
    }
}

/// Resolved copy of `config`: percentages bounded, discount value expressed
/// in its authoritative representation after clamping against `subtotal`.
pub fn resolve_config(
    subtotal: Decimal,
    config: &QuotationFinancialsConfig,
) -> QuotationFinancialsConfig {
    let discount = resolve_discount(
        money::non_negative(subtotal),
        config.special_discount_type,
        config.special_discount_value,
    );

    QuotationFinancialsConfig {
        pricing_mode: config.pricing_mode,
        has_vat: config.has_vat,
        vat_percentage: money::non_negative(config.vat_percentage),
        special_discount_type: config.special_discount_type,
        special_discount_value: match config.special_discount_type {
            AmountInputMode::Percentage => discount.percentage,
            AmountInputMode::Amount => discount.amount,
        },
        has_withholding_tax: config.has_withholding_tax,
        withholding_tax_percentage: money::non_negative(config.withholding_tax_percentage),
        deposit_mode: config.deposit_mode,
        deposit_percentage: money::clamp_percentage(config.deposit_percentage),
        deposit_amount_input: money::non_negative(config.deposit_amount_input),
    }
}
