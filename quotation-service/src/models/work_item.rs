//! Work item groups and their editable size rows.

use crate::utils::{lenient, money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Editable size-specific row nested under a [`WorkItemGroup`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeRow {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default, deserialize_with = "lenient::text")]
    pub size: String,
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "lenient::non_negative_decimal")]
    pub unit_price: Decimal,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: String,
}

impl SizeRow {
    pub fn new(size: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            size: size.into(),
            quantity,
            unit_price,
            notes: String::new(),
        }
    }

    /// `quantity * unit_price`, always derived from the current inputs.
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity).saturating_mul(self.unit_price)
    }
}

/// Partial update for a size row. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SizeRowUpdate {
    pub size: Option<String>,
    pub quantity: Option<u32>,
    pub unit_price: Option<Decimal>,
    pub notes: Option<String>,
}

/// Grouping key: rows with equal (name, pattern, fabric, color) share a group.
///
/// Components are compared verbatim; an empty string is a distinct value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub name: String,
    pub pattern: String,
    pub fabric_type: String,
    pub color: String,
}

impl GroupKey {
    /// Stable byte encoding used to derive deterministic ids.
    pub fn encode(&self) -> String {
        // Unit separator keeps ("ab", "c") distinct from ("a", "bc").
        [
            self.name.as_str(),
            self.pattern.as_str(),
            self.fabric_type.as_str(),
            self.color.as_str(),
        ]
        .join("\u{1f}")
    }
}

/// Quotation-side aggregation of size rows sharing name/pattern/fabric/color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemGroup {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Originating work order, used for reconciliation and re-linking on submission.
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
    #[serde(default)]
    pub size_rows: Vec<SizeRow>,
}

impl WorkItemGroup {
    pub fn new(work_order_id: impl Into<String>, key: GroupKey, unit: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            work_order_id: work_order_id.into(),
            name: key.name,
            pattern: key.pattern,
            fabric_type: key.fabric_type,
            color: key.color,
            unit: unit.into(),
            size_rows: Vec::new(),
        }
    }

    pub fn key(&self) -> GroupKey {
        GroupKey {
            name: self.name.clone(),
            pattern: self.pattern.clone(),
            fabric_type: self.fabric_type.clone(),
            color: self.color.clone(),
        }
    }

    /// Σ size row subtotals.
    pub fn total(&self) -> Decimal {
        money::sum(self.size_rows.iter().map(SizeRow::subtotal))
    }

    /// Σ size row quantities.
    pub fn total_quantity(&self) -> u64 {
        self.size_rows.iter().map(|row| u64::from(row.quantity)).sum()
    }

    pub fn add_size_row(&mut self, row: SizeRow) -> Uuid {
        let id = row.id;
        self.size_rows.push(row);
        id
    }

    /// Apply a partial update. Returns `false` when no row has `id`.
    pub fn update_size_row(&mut self, id: Uuid, update: SizeRowUpdate) -> bool {
        let Some(row) = self.size_rows.iter_mut().find(|row| row.id == id) else {
            return false;
        };

        if let Some(size) = update.size {
            row.size = size;
        }
        if let Some(quantity) = update.quantity {
            row.quantity = quantity;
        }
        if let Some(unit_price) = update.unit_price {
            row.unit_price = money::non_negative(unit_price);
        }
        if let Some(notes) = update.notes {
            row.notes = notes;
        }
        true
    }

    pub fn remove_size_row(&mut self, id: Uuid) -> bool {
        let before = self.size_rows.len();
        self.size_rows.retain(|row| row.id != id);
        self.size_rows.len() != before
    }
}
