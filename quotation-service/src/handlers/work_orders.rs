//! Work order ordering and per-customer selection summaries.

use axum::Json;
use service_core::error::AppError;
use validator::Validate;

use crate::{
    dtos::{CustomerSummaryResponse, SortWorkOrdersResponse, WorkOrdersRequest},
    services,
};

/// Return the work orders latest first.
pub async fn sort_work_orders(
    Json(payload): Json<WorkOrdersRequest>,
) -> Result<Json<SortWorkOrdersResponse>, AppError> {
    payload.validate()?;

    let mut work_orders = payload.work_orders;
    services::sort_latest_first(&mut work_orders);

    Ok(Json(SortWorkOrdersResponse { work_orders }))
}

/// Count quotable and already-quoted work orders per customer.
pub async fn summarize_work_orders(
    Json(payload): Json<WorkOrdersRequest>,
) -> Result<Json<CustomerSummaryResponse>, AppError> {
    payload.validate()?;

    let customers = services::summarize_by_customer(&payload.work_orders);
    tracing::debug!(
        work_orders = payload.work_orders.len(),
        customers = customers.len(),
        "Work order summary computed"
    );

    Ok(Json(CustomerSummaryResponse { customers }))
}
