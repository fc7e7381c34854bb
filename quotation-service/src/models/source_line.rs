//! Pricing-request line as received from the upstream system.

use crate::utils::lenient;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One unit of priced work. Never edited in place; grouping copies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLineRow {
    #[serde(default, deserialize_with = "lenient::text")]
    pub work_order_id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub pattern: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub fabric_type: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub color: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub size: String,
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "lenient::non_negative_decimal")]
    pub unit_price: Decimal,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub sequence_order: i32,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: String,
}
