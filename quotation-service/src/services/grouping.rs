//! Line grouping: flat pricing-request rows into work item groups.

use crate::models::{GroupKey, SizeRow, SourceLineRow, WorkItemGroup};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Namespace for ids derived from grouping keys.
const GROUPING_NAMESPACE: Uuid = Uuid::from_u128(0x6a1f_3c2e_9b7d_4e58_a0c4_5d1e_8f2b_7c90);

fn key_of(row: &SourceLineRow) -> GroupKey {
    GroupKey {
        name: row.name.clone(),
        pattern: row.pattern.clone(),
        fabric_type: row.fabric_type.clone(),
        color: row.color.clone(),
    }
}

fn group_id(key: &GroupKey) -> Uuid {
    Uuid::new_v5(&GROUPING_NAMESPACE, key.encode().as_bytes())
}

fn size_row_id(group: Uuid, position: usize) -> Uuid {
    Uuid::new_v5(&group, position.to_string().as_bytes())
}

/// Group rows by (name, pattern, fabric_type, color).
///
/// Rows are visited in `sequence_order` (ties keep input order). The first
/// row of each key creates the group and fixes its shared fields and
/// `work_order_id`; later rows append size rows. Groups come out in
/// first-appearance order and ids are derived from the input, so the
/// function is idempotent.
pub fn group_source_lines(rows: &[SourceLineRow], default_unit: &str) -> Vec<WorkItemGroup> {
    let mut ordered: Vec<&SourceLineRow> = rows.iter().collect();
    ordered.sort_by_key(|row| row.sequence_order);

    let mut groups: Vec<WorkItemGroup> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for row in ordered {
        let key = key_of(row);
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                let mut group = WorkItemGroup::new(&row.work_order_id, key.clone(), default_unit);
                group.id = group_id(&key);
                groups.push(group);
                index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };

        let group = &mut groups[slot];
        let position = group.size_rows.len();
        group.size_rows.push(SizeRow {
            id: size_row_id(group.id, position),
            size: row.size.clone(),
            quantity: row.quantity,
            unit_price: row.unit_price,
            notes: row.notes.clone(),
        });
    }

    debug!(rows = rows.len(), groups = groups.len(), "Grouped source lines");

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn row(name: &str, color: &str, size: &str, qty: u32, price: i64, seq: i32) -> SourceLineRow {
        SourceLineRow {
            work_order_id: format!("WO-{}", name),
            name: name.to_string(),
            pattern: "Regular".to_string(),
            fabric_type: "Cotton".to_string(),
            color: color.to_string(),
            size: size.to_string(),
            quantity: qty,
            unit_price: Decimal::new(price, 0),
            sequence_order: seq,
            notes: String::new(),
        }
    }

    #[test]
    fn same_key_rows_share_a_group() {
        let rows = vec![
            row("Polo", "Navy", "M", 5, 100, 1),
            row("Polo", "Navy", "L", 3, 150, 2),
        ];

        let groups = group_source_lines(&rows, "pcs");

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].size_rows.len(), 2);
        assert_eq!(groups[0].total(), Decimal::new(950, 0));
        assert_eq!(groups[0].total_quantity(), 8);
        assert_eq!(groups[0].unit, "pcs");
    }

    #[test]
    fn groups_follow_first_appearance_in_sequence_order() {
        let rows = vec![
            row("Shirt", "White", "M", 1, 10, 3),
            row("Polo", "Navy", "M", 1, 10, 1),
            row("Shirt", "White", "L", 1, 10, 2),
        ];

        let groups = group_source_lines(&rows, "pcs");

        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Polo", "Shirt"]);
        let sizes: Vec<&str> = groups[1].size_rows.iter().map(|r| r.size.as_str()).collect();
        assert_eq!(sizes, vec!["L", "M"]);
    }

    #[test]
    fn empty_components_are_distinct_keys() {
        let rows = vec![
            row("Polo", "", "M", 1, 10, 1),
            row("Polo", "Navy", "M", 1, 10, 2),
            row("", "", "S", 1, 10, 3),
        ];

        let groups = group_source_lines(&rows, "pcs");

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[2].name, "");
    }

    #[test]
    fn first_row_fixes_work_order_reference() {
        let mut second = row("Polo", "Navy", "L", 1, 10, 2);
        second.work_order_id = "WO-other".to_string();
        let rows = vec![row("Polo", "Navy", "M", 1, 10, 1), second];

        let groups = group_source_lines(&rows, "pcs");

        assert_eq!(groups[0].work_order_id, "WO-Polo");
    }

    #[test]
    fn grouping_is_idempotent() {
        let rows = vec![
            row("Polo", "Navy", "M", 5, 100, 1),
            row("Shirt", "White", "L", 3, 150, 2),
            row("Polo", "Navy", "L", 2, 100, 3),
        ];

        assert_eq!(group_source_lines(&rows, "pcs"), group_source_lines(&rows, "pcs"));
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_source_lines(&[], "pcs").is_empty());
    }
}
