//! User-controlled financial inputs and the derived quotation totals.

use crate::utils::{lenient, money};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// How the working subtotal relates to VAT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Working figure excludes VAT; VAT is added on top.
    #[default]
    Net,
    /// Working figure already contains VAT; VAT is extracted.
    VatIncluded,
}

impl PricingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingMode::Net => "net",
            PricingMode::VatIncluded => "vat_included",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "vat_included" | "vat-included" | "inclusive" => PricingMode::VatIncluded,
            _ => PricingMode::Net,
        }
    }
}

/// Which representation of a percentage/amount pair the user edited last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountInputMode {
    #[default]
    Percentage,
    Amount,
}

impl AmountInputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmountInputMode::Percentage => "percentage",
            AmountInputMode::Amount => "amount",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "amount" | "fixed" => AmountInputMode::Amount,
            _ => AmountInputMode::Percentage,
        }
    }
}

fn lenient_pricing_mode<'de, D>(deserializer: D) -> Result<PricingMode, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(PricingMode::from_string(&lenient::text(deserializer)?))
}

fn lenient_input_mode<'de, D>(deserializer: D) -> Result<AmountInputMode, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(AmountInputMode::from_string(&lenient::text(deserializer)?))
}

pub const DEFAULT_VAT_PERCENTAGE: Decimal = Decimal::from_parts(7, 0, 0, false, 0);
pub const DEFAULT_WITHHOLDING_TAX_PERCENTAGE: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Financial settings for one quotation draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotationFinancialsConfig {
    #[serde(deserialize_with = "lenient_pricing_mode")]
    pub pricing_mode: PricingMode,
    #[serde(deserialize_with = "lenient::flag")]
    pub has_vat: bool,
    #[serde(deserialize_with = "lenient::decimal")]
    pub vat_percentage: Decimal,
    #[serde(deserialize_with = "lenient_input_mode")]
    pub special_discount_type: AmountInputMode,
    #[serde(deserialize_with = "lenient::decimal")]
    pub special_discount_value: Decimal,
    #[serde(deserialize_with = "lenient::flag")]
    pub has_withholding_tax: bool,
    #[serde(deserialize_with = "lenient::decimal")]
    pub withholding_tax_percentage: Decimal,
    #[serde(deserialize_with = "lenient_input_mode")]
    pub deposit_mode: AmountInputMode,
    #[serde(deserialize_with = "lenient::decimal")]
    pub deposit_percentage: Decimal,
    #[serde(deserialize_with = "lenient::decimal")]
    pub deposit_amount_input: Decimal,
}

impl Default for QuotationFinancialsConfig {
    fn default() -> Self {
        Self::with_defaults(DEFAULT_VAT_PERCENTAGE, DEFAULT_WITHHOLDING_TAX_PERCENTAGE)
    }
}

impl QuotationFinancialsConfig {
    /// VAT on, no discount, no withholding, no deposit.
    pub fn with_defaults(vat_percentage: Decimal, withholding_tax_percentage: Decimal) -> Self {
        Self {
            pricing_mode: PricingMode::Net,
            has_vat: true,
            vat_percentage,
            special_discount_type: AmountInputMode::Percentage,
            special_discount_value: Decimal::ZERO,
            has_withholding_tax: false,
            withholding_tax_percentage,
            deposit_mode: AmountInputMode::Percentage,
            deposit_percentage: Decimal::ZERO,
            deposit_amount_input: Decimal::ZERO,
        }
    }
}

impl QuotationFinancialsConfig {
    /// Copy of `self` with the fields present in `patch` replaced.
    ///
    /// Absent fields keep their current value; present ones go through the
    /// same lenient parsing as a full config. A non-object patch changes nothing.
    pub fn overlay(&self, patch: &Value) -> Result<Self, serde_json::Error> {
        let Value::Object(fields) = patch else {
            return Ok(self.clone());
        };

        let mut merged = serde_json::to_value(self)?;
        if let Value::Object(base) = &mut merged {
            for (key, value) in fields {
                base.insert(key.clone(), value.clone());
            }
        }
        serde_json::from_value(merged)
    }
}

/// Fully derived totals. Recomputed from groups and config, never edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationTotals {
    pub subtotal: Decimal,
    pub discount_percentage: Decimal,
    pub discount_amount: Decimal,
    pub discounted_subtotal: Decimal,
    /// Pre-VAT base; equals `discounted_subtotal` in net mode.
    pub taxable_base: Decimal,
    pub vat_amount: Decimal,
    pub total: Decimal,
    pub withholding_amount: Decimal,
    pub final_total: Decimal,
    pub deposit_amount: Decimal,
    pub remaining_amount: Decimal,
}

impl QuotationTotals {
    /// Two-decimal presentation copy.
    ///
    /// `remaining_amount` is re-derived from the rounded `final_total` and
    /// `deposit_amount` so the split still adds up exactly.
    pub fn rounded(&self) -> Self {
        let final_total = money::round_money(self.final_total);
        let deposit_amount = money::round_money(self.deposit_amount).min(final_total);

        Self {
            subtotal: money::round_money(self.subtotal),
            discount_percentage: money::round_money(self.discount_percentage),
            discount_amount: money::round_money(self.discount_amount),
            discounted_subtotal: money::round_money(self.discounted_subtotal),
            taxable_base: money::round_money(self.taxable_base),
            vat_amount: money::round_money(self.vat_amount),
            total: money::round_money(self.total),
            withholding_amount: money::round_money(self.withholding_amount),
            final_total,
            deposit_amount,
            remaining_amount: final_total - deposit_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_fill_missing_fields() {
        let config: QuotationFinancialsConfig =
            serde_json::from_str(r#"{"pricing_mode": "vat_included"}"#).unwrap();
        assert_eq!(config.pricing_mode, PricingMode::VatIncluded);
        assert!(config.has_vat);
        assert_eq!(config.vat_percentage, Decimal::new(7, 0));
        assert_eq!(config.special_discount_type, AmountInputMode::Percentage);
    }

    #[test]
    fn config_tolerates_bad_values() {
        let config: QuotationFinancialsConfig = serde_json::from_str(
            r#"{
                "pricing_mode": "sideways",
                "has_vat": "yes",
                "vat_percentage": "seven",
                "special_discount_type": "amount",
                "special_discount_value": "1,500",
                "deposit_percentage": null
            }"#,
        )
        .unwrap();
        assert_eq!(config.pricing_mode, PricingMode::Net);
        assert!(config.has_vat);
        assert_eq!(config.vat_percentage, Decimal::ZERO);
        assert_eq!(config.special_discount_type, AmountInputMode::Amount);
        assert_eq!(config.special_discount_value, Decimal::new(1500, 0));
        assert_eq!(config.deposit_percentage, Decimal::ZERO);
    }

    #[test]
    fn rounded_totals_keep_deposit_split_exact() {
        let totals = QuotationTotals {
            final_total: Decimal::new(1000005, 3),
            deposit_amount: Decimal::new(333335, 3),
            remaining_amount: Decimal::new(66667, 2),
            ..Default::default()
        };

        let rounded = totals.rounded();
        assert_eq!(rounded.final_total, Decimal::new(100001, 2));
        assert_eq!(rounded.deposit_amount, Decimal::new(33334, 2));
        assert_eq!(
            rounded.deposit_amount + rounded.remaining_amount,
            rounded.final_total
        );
    }

    #[test]
    fn overlay_keeps_base_values_for_absent_fields() {
        let base = QuotationFinancialsConfig::with_defaults(Decimal::new(10, 0), Decimal::new(5, 0));

        let merged = base
            .overlay(&serde_json::json!({ "has_withholding_tax": true, "deposit_percentage": "25" }))
            .unwrap();

        assert_eq!(merged.vat_percentage, Decimal::new(10, 0));
        assert_eq!(merged.withholding_tax_percentage, Decimal::new(5, 0));
        assert!(merged.has_withholding_tax);
        assert_eq!(merged.deposit_percentage, Decimal::new(25, 0));
        assert_eq!(merged.pricing_mode, PricingMode::Net);
    }

    #[test]
    fn overlay_ignores_non_object_patch() {
        let base = QuotationFinancialsConfig::with_defaults(Decimal::new(10, 0), Decimal::new(5, 0));
        assert_eq!(base.overlay(&serde_json::json!(42)).unwrap(), base);
    }

    #[test]
    fn modes_round_trip_through_strings() {
        for mode in [PricingMode::Net, PricingMode::VatIncluded] {
            assert_eq!(PricingMode::from_string(mode.as_str()), mode);
        }
        for mode in [AmountInputMode::Percentage, AmountInputMode::Amount] {
            assert_eq!(AmountInputMode::from_string(mode.as_str()), mode);
        }
    }
}
