//! Request and response bodies for the HTTP surface.

use crate::models::{
    QuotationFinancialsConfig, QuotationTotals, SourceLineRow, WorkItemGroup, WorkOrder,
};
use crate::services::{CustomerWorkSummary, GroupReconciliation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct PreviewQuotationRequest {
    #[validate(length(max = 5000))]
    pub source_lines: Vec<SourceLineRow>,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub work_orders: Vec<WorkOrder>,
    /// Partial or full financial settings, laid over the service defaults.
    #[serde(default)]
    pub financials: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct PreviewQuotationResponse {
    pub groups: Vec<WorkItemGroup>,
    pub reconciliation: Vec<GroupReconciliation>,
    pub totals: QuotationTotals,
    pub financials: QuotationFinancialsConfig,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CalculateQuotationRequest {
    #[validate(length(max = 5000))]
    pub groups: Vec<WorkItemGroup>,
    /// Partial or full financial settings, laid over the service defaults.
    #[serde(default)]
    pub financials: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct CalculateQuotationResponse {
    pub totals: QuotationTotals,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitQuotationRequest {
    #[validate(length(max = 5000))]
    pub groups: Vec<WorkItemGroup>,
    #[serde(default)]
    pub work_orders: Vec<WorkOrder>,
    /// Partial or full financial settings, laid over the service defaults.
    #[serde(default)]
    pub financials: Option<Value>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct WorkOrdersRequest {
    #[validate(length(max = 5000))]
    pub work_orders: Vec<WorkOrder>,
}

#[derive(Debug, Serialize)]
pub struct SortWorkOrdersResponse {
    pub work_orders: Vec<WorkOrder>,
}

#[derive(Debug, Serialize)]
pub struct CustomerSummaryResponse {
    pub customers: Vec<CustomerWorkSummary>,
}
