//! Quantity reconciliation between work item groups and their work orders.
//!
//! Purely advisory: nothing here changes quantities or stops a calculation.

use crate::models::{WorkItemGroup, WorkOrder};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;
use uuid::Uuid;

/// Direction of a mismatch relative to the declared quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityDeviation {
    MoreThan,
    LessThan,
}

impl fmt::Display for QuantityDeviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityDeviation::MoreThan => write!(f, "more than"),
            QuantityDeviation::LessThan => write!(f, "less than"),
        }
    }
}

/// Outcome of comparing a group's aggregated quantity with the declared one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationFlag {
    pub matches: bool,
    pub aggregated_quantity: u64,
    pub declared_quantity: u32,
    pub deviation: Option<QuantityDeviation>,
}

impl ReconciliationFlag {
    /// Warning text for a mismatch, `None` when the quantities agree.
    pub fn message(&self) -> Option<String> {
        self.deviation.map(|deviation| {
            format!(
                "Total quantity {} is {} the declared quantity {}",
                self.aggregated_quantity, deviation, self.declared_quantity
            )
        })
    }
}

/// Compare a group against its work order's declared quantity.
///
/// A declared quantity of zero means "unknown" and always matches.
pub fn reconcile(group: &WorkItemGroup, declared_quantity: u32) -> ReconciliationFlag {
    let aggregated_quantity = group.total_quantity();
    let declared = u64::from(declared_quantity);

    let deviation = if declared_quantity == 0 || aggregated_quantity == declared {
        None
    } else if aggregated_quantity > declared {
        Some(QuantityDeviation::MoreThan)
    } else {
        Some(QuantityDeviation::LessThan)
    };

    ReconciliationFlag {
        matches: deviation.is_none(),
        aggregated_quantity,
        declared_quantity,
        deviation,
    }
}

/// Reconciliation result tagged with the group it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupReconciliation {
    pub group_id: Uuid,
    pub work_order_id: String,
    #[serde(flatten)]
    pub flag: ReconciliationFlag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Reconcile every group against the work order it was created from.
///
/// Groups whose work order is not in `work_orders` have nothing to compare
/// against and are reported as matching.
pub fn reconcile_groups(
    groups: &[WorkItemGroup],
    work_orders: &[WorkOrder],
) -> Vec<GroupReconciliation> {
    let declared: HashMap<&str, u32> = work_orders
        .iter()
        .map(|wo| (wo.work_order_id.as_str(), wo.declared_quantity))
        .collect();

    groups
        .iter()
        .map(|group| {
            let declared_quantity = declared
                .get(group.work_order_id.as_str())
                .copied()
                .unwrap_or(0);
            let flag = reconcile(group, declared_quantity);
            let message = flag.message();

            if let Some(text) = &message {
                warn!(
                    group_id = %group.id,
                    work_order_id = %group.work_order_id,
                    aggregated = flag.aggregated_quantity,
                    declared = flag.declared_quantity,
                    "{}",
                    text
                );
            }

            GroupReconciliation {
                group_id: group.id,
                work_order_id: group.work_order_id.clone(),
                flag,
                message,
            }
        })
        .collect()
}
