//! Services module for quotation-service.
//!
//! Everything except `metrics` is pure and synchronous.

pub mod cascade;
pub mod discount;
pub mod grouping;
pub mod metrics;
pub mod ordering;
pub mod pricing;
pub mod reconciliation;
pub mod selection;
pub mod submission;

pub use cascade::{calculate_from_subtotal, calculate_totals, resolve_config, subtotal_of};
pub use discount::{resolve_discount, DiscountBreakdown, SpecialDiscount};
pub use grouping::group_source_lines;
pub use metrics::{get_metrics, init_metrics};
pub use ordering::{compare_latest_first, sort_groups_latest_first, sort_latest_first, Chronological};
pub use pricing::{resolve_vat, VatResolution};
pub use reconciliation::{
    reconcile, reconcile_groups, GroupReconciliation, QuantityDeviation, ReconciliationFlag,
};
pub use selection::{summarize_by_customer, CustomerWorkSummary};
pub use submission::{
    build_submission, flatten_items, group_saved_items, validate_groups, QuotationError,
    QuotationItemPayload, QuotationSubmission,
};
