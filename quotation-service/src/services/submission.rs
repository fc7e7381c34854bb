//! Submission payload: flattened items plus totals, ready for persistence.

use crate::models::{
    GroupKey, QuotationFinancialsConfig, QuotationTotals, SourceLineRow, WorkItemGroup,
};
use crate::services::cascade::{calculate_totals, resolve_config, subtotal_of};
use crate::services::grouping::group_source_lines;
use crate::services::reconciliation::GroupReconciliation;
use crate::utils::{lenient, money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

/// Reasons a draft cannot be turned into a submission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuotationError {
    #[error("Quotation has no work items")]
    NoWorkItems,

    #[error("Work item {position} has no name")]
    MissingName { position: usize },

    #[error("Work item {position} ({name}) has no size rows")]
    NoSizeRows { position: usize, name: String },
}

/// One persisted line: a size row carrying its group's shared fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationItemPayload {
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
    pub unit: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub size: String,
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "lenient::non_negative_decimal")]
    pub unit_price: Decimal,
    #[serde(default, deserialize_with = "lenient::non_negative_decimal")]
    pub subtotal: Decimal,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub sequence_order: i32,
}

/// Everything the persistence collaborator needs for one quotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotationSubmission {
    pub items: Vec<QuotationItemPayload>,
    /// Rounded to two decimals.
    pub totals: QuotationTotals,
    pub financials: QuotationFinancialsConfig,
    pub reconciliation: Vec<GroupReconciliation>,
}

/// Reject drafts that must not be submitted.
pub fn validate_groups(groups: &[WorkItemGroup]) -> Result<(), QuotationError> {
    if groups.is_empty() {
        return Err(QuotationError::NoWorkItems);
    }

    for (i, group) in groups.iter().enumerate() {
        let position = i + 1;
        if group.name.trim().is_empty() {
            return Err(QuotationError::MissingName { position });
        }
        if group.size_rows.is_empty() {
            return Err(QuotationError::NoSizeRows {
                position,
                name: group.name.clone(),
            });
        }
    }

    Ok(())
}

/// One item per size row, numbered from 1 across all groups.
pub fn flatten_items(groups: &[WorkItemGroup]) -> Vec<QuotationItemPayload> {
    groups
        .iter()
        .flat_map(|group| group.size_rows.iter().map(move |row| (group, row)))
        .enumerate()
        .map(|(i, (group, row))| QuotationItemPayload {
            work_order_id: group.work_order_id.clone(),
            name: group.name.clone(),
            pattern: group.pattern.clone(),
            fabric_type: group.fabric_type.clone(),
            color: group.color.clone(),
            unit: group.unit.clone(),
            size: row.size.clone(),
            quantity: row.quantity,
            unit_price: row.unit_price,
            subtotal: money::round_money(row.subtotal()),
            notes: row.notes.clone(),
            sequence_order: i32::try_from(i + 1).unwrap_or(i32::MAX),
        })
        .collect()
}

/// Validate, flatten and total a draft.
pub fn build_submission(
    groups: &[WorkItemGroup],
    config: &QuotationFinancialsConfig,
    reconciliation: Vec<GroupReconciliation>,
) -> Result<QuotationSubmission, QuotationError> {
    validate_groups(groups)?;

    let totals = calculate_totals(groups, config).rounded();
    let financials = resolve_config(subtotal_of(groups), config);
    let items = flatten_items(groups);

    info!(
        items = items.len(),
        groups = groups.len(),
        final_total = %totals.final_total,
        "Quotation submission built"
    );

    Ok(QuotationSubmission {
        items,
        totals,
        financials,
        reconciliation,
    })
}

/// Rebuild groups from previously flattened items, for display.
///
/// Uses the same key as [`group_source_lines`]; a group's unit is taken
/// from its first item, falling back to `default_unit` when blank.
pub fn group_saved_items(items: &[QuotationItemPayload], default_unit: &str) -> Vec<WorkItemGroup> {
    let rows: Vec<SourceLineRow> = items
        .iter()
        .map(|item| SourceLineRow {
            work_order_id: item.work_order_id.clone(),
            name: item.name.clone(),
            pattern: item.pattern.clone(),
            fabric_type: item.fabric_type.clone(),
            color: item.color.clone(),
            size: item.size.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            sequence_order: item.sequence_order,
            notes: item.notes.clone(),
        })
        .collect();

    let mut units: HashMap<GroupKey, &str> = HashMap::new();
    let mut ordered: Vec<&QuotationItemPayload> = items.iter().collect();
    ordered.sort_by_key(|item| item.sequence_order);
    for item in ordered {
        let key = GroupKey {
            name: item.name.clone(),
            pattern: item.pattern.clone(),
            fabric_type: item.fabric_type.clone(),
            color: item.color.clone(),
        };
        units.entry(key).or_insert(item.unit.as_str());
    }

    let mut groups = group_source_lines(&rows, default_unit);
    for group in groups.iter_mut() {
        if let Some(unit) = units.get(&group.key()) {
            if !unit.trim().is_empty() {
                group.unit = unit.to_string();
            }
        }
    }
    groups
}
