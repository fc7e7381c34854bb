//! Configuration module for quotation-service.

use crate::models::{
    QuotationFinancialsConfig, DEFAULT_VAT_PERCENTAGE, DEFAULT_WITHHOLDING_TAX_PERCENTAGE,
};
use crate::utils::lenient;
use rust_decimal::Decimal;
use service_core::config as core_config;
use service_core::error::AppError;
use service_core::observability::LogFormat;
use std::env;

#[derive(Debug, Clone)]
pub struct QuotationConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub log_format: LogFormat,
    pub defaults: FinancialDefaults,
}

/// Defaults applied when a request carries no financial settings.
#[derive(Debug, Clone)]
pub struct FinancialDefaults {
    pub vat_percentage: Decimal,
    pub withholding_tax_percentage: Decimal,
    /// Unit label for groups built from source lines.
    pub unit: String,
}

impl Default for FinancialDefaults {
    fn default() -> Self {
        Self {
            vat_percentage: DEFAULT_VAT_PERCENTAGE,
            withholding_tax_percentage: DEFAULT_WITHHOLDING_TAX_PERCENTAGE,
            unit: "pcs".to_string(),
        }
    }
}

impl FinancialDefaults {
    pub fn financials(&self) -> QuotationFinancialsConfig {
        QuotationFinancialsConfig::with_defaults(
            self.vat_percentage,
            self.withholding_tax_percentage,
        )
    }
}

fn env_decimal(key: &str, fallback: Decimal) -> Decimal {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => lenient::parse_decimal(&raw),
        _ => fallback,
    }
}

impl QuotationConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let fallback = FinancialDefaults::default();

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "quotation-service".to_string()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format: LogFormat::from_string(
                &env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
            ),
            defaults: FinancialDefaults {
                vat_percentage: env_decimal("DEFAULT_VAT_PERCENTAGE", fallback.vat_percentage),
                withholding_tax_percentage: env_decimal(
                    "DEFAULT_WITHHOLDING_TAX_PERCENTAGE",
                    fallback.withholding_tax_percentage,
                ),
                unit: env::var("DEFAULT_UNIT")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(fallback.unit),
            },
        })
    }

    /// Configuration for tests: random port, defaults everywhere.
    pub fn for_tests() -> Self {
        Self {
            common: core_config::Config {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            service_name: "quotation-service-test".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "warn".to_string(),
            log_format: LogFormat::Pretty,
            defaults: FinancialDefaults::default(),
        }
    }
}
