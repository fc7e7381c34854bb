//! Work order (pricing request) model for quotation-service.

use crate::utils::lenient;
use serde::{Deserialize, Serialize};

/// Work order status as reported by the pricing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    #[default]
    Pending,
    InProgress,
    Priced,
    Completed,
    Cancelled,
}

impl WorkOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Pending => "pending",
            WorkOrderStatus::InProgress => "in_progress",
            WorkOrderStatus::Priced => "priced",
            WorkOrderStatus::Completed => "completed",
            WorkOrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "in_progress" => WorkOrderStatus::InProgress,
            "priced" => WorkOrderStatus::Priced,
            "completed" => WorkOrderStatus::Completed,
            "cancelled" => WorkOrderStatus::Cancelled,
            _ => WorkOrderStatus::Pending,
        }
    }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<WorkOrderStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = lenient::text(deserializer)?;
    Ok(WorkOrderStatus::from_string(&raw))
}

/// Upstream unit of requested work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    #[serde(deserialize_with = "lenient::text")]
    pub work_order_id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub customer_id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub customer_name: String,
    /// Human-readable code, e.g. `PR-2024-05-0012`.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub reference_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub declared_quantity: u32,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub already_quoted: bool,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: WorkOrderStatus,
}

impl WorkOrder {
    /// Minimal work order, mainly for tests and fixtures.
    pub fn new(work_order_id: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            work_order_id: work_order_id.into(),
            customer_id: customer_id.into(),
            customer_name: String::new(),
            reference_code: None,
            created_at: None,
            updated_at: None,
            declared_quantity: 0,
            already_quoted: false,
            status: WorkOrderStatus::Pending,
        }
    }

    /// A quotation may still be created for this work order.
    pub fn is_quotable(&self) -> bool {
        !self.already_quoted && self.status == WorkOrderStatus::Priced
    }
}
