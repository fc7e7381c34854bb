//! Per-customer summaries of outstanding work orders.

use crate::models::WorkOrder;
use crate::services::ordering::{compare_latest_first, sort_latest_first};
use serde::Serialize;
use std::collections::HashMap;

/// Work-order counts for one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerWorkSummary {
    pub customer_id: String,
    pub customer_name: String,
    pub total_work_orders: usize,
    pub quotable_work_orders: usize,
    pub already_quoted_work_orders: usize,
    /// At least one work order can still be quoted.
    pub can_create_quotation: bool,
    /// Latest first.
    pub work_order_ids: Vec<String>,
}

/// Group work orders per customer.
///
/// Customers are ordered by their latest work order; the first non-empty
/// customer name seen wins.
pub fn summarize_by_customer(work_orders: &[WorkOrder]) -> Vec<CustomerWorkSummary> {
    let mut buckets: Vec<(String, Vec<&WorkOrder>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for wo in work_orders {
        match index.get(wo.customer_id.as_str()) {
            Some(&slot) => buckets[slot].1.push(wo),
            None => {
                index.insert(wo.customer_id.as_str(), buckets.len());
                buckets.push((wo.customer_id.clone(), vec![wo]));
            }
        }
    }

    for (_, orders) in buckets.iter_mut() {
        sort_latest_first(orders);
    }
    // Each bucket's head is its latest work order.
    buckets.sort_by(|(_, a), (_, b)| compare_latest_first(&a[0], &b[0]));

    buckets
        .into_iter()
        .map(|(customer_id, orders)| {
            let customer_name = orders
                .iter()
                .map(|wo| wo.customer_name.as_str())
                .find(|name| !name.is_empty())
                .unwrap_or_default()
                .to_string();
            let quotable = orders.iter().filter(|wo| wo.is_quotable()).count();
            let already_quoted = orders.iter().filter(|wo| wo.already_quoted).count();

            CustomerWorkSummary {
                customer_id,
                customer_name,
                total_work_orders: orders.len(),
                quotable_work_orders: quotable,
                already_quoted_work_orders: already_quoted,
                can_create_quotation: quotable > 0,
                work_order_ids: orders.iter().map(|wo| wo.work_order_id.clone()).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkOrderStatus;

    fn wo(id: &str, customer: &str, created: &str, status: WorkOrderStatus, quoted: bool) -> WorkOrder {
        let mut order = WorkOrder::new(id, customer);
        order.customer_name = format!("Customer {}", customer);
        order.created_at = Some(created.to_string());
        order.status = status;
        order.already_quoted = quoted;
        order
    }

    #[test]
    fn counts_per_customer() {
        let orders = vec![
            wo("1", "A", "2024-01-01", WorkOrderStatus::Priced, false),
            wo("2", "A", "2024-02-01", WorkOrderStatus::Priced, true),
            wo("3", "B", "2024-01-15", WorkOrderStatus::InProgress, false),
        ];

        let summaries = summarize_by_customer(&orders);

        assert_eq!(summaries.len(), 2);
        let a = &summaries[0];
        assert_eq!(a.customer_id, "A");
        assert_eq!(a.total_work_orders, 2);
        assert_eq!(a.quotable_work_orders, 1);
        assert_eq!(a.already_quoted_work_orders, 1);
        assert!(a.can_create_quotation);
        assert_eq!(a.work_order_ids, vec!["2", "1"]);

        let b = &summaries[1];
        assert_eq!(b.customer_name, "Customer B");
        assert!(!b.can_create_quotation);
    }

    #[test]
    fn customers_ordered_by_latest_work_order() {
        let orders = vec![
            wo("1", "A", "2024-01-01", WorkOrderStatus::Priced, false),
            wo("2", "B", "2024-03-01", WorkOrderStatus::Priced, false),
            wo("3", "A", "2024-02-01", WorkOrderStatus::Priced, false),
        ];

        let summaries = summarize_by_customer(&orders);

        let customers: Vec<&str> = summaries.iter().map(|s| s.customer_id.as_str()).collect();
        assert_eq!(customers, vec!["B", "A"]);
    }

    #[test]
    fn fully_quoted_customer_cannot_create() {
        let orders = vec![wo("1", "A", "2024-01-01", WorkOrderStatus::Priced, true)];
        let summaries = summarize_by_customer(&orders);
        assert!(!summaries[0].can_create_quotation);
    }

    #[test]
    fn empty_input() {
        assert!(summarize_by_customer(&[]).is_empty());
    }
}
