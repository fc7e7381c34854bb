//! Quotation preview, calculation and submission handlers.
//!
//! Handlers only translate HTTP to engine calls; every figure comes from
//! `services`, recomputed from the request body each time.

use axum::{extract::State, Json};
use serde_json::Value;
use service_core::error::AppError;
use validator::Validate;

use crate::{
    dtos::{
        CalculateQuotationRequest, CalculateQuotationResponse, PreviewQuotationRequest,
        PreviewQuotationResponse, SubmitQuotationRequest,
    },
    models::{QuotationFinancialsConfig, QuotationTotals, WorkItemGroup},
    services::{
        self,
        metrics::{
            CALCULATIONS_TOTAL, GROUPS_PER_PREVIEW, RECONCILIATION_MISMATCHES_TOTAL,
            SUBMISSIONS_TOTAL,
        },
        GroupReconciliation, QuantityDeviation, QuotationSubmission,
    },
    startup::AppState,
};

/// Request financials laid over the configured defaults.
fn resolve_financials(
    state: &AppState,
    financials: Option<&Value>,
) -> Result<QuotationFinancialsConfig, AppError> {
    let defaults = state.config.defaults.financials();
    match financials {
        Some(patch) => defaults.overlay(patch).map_err(|e| {
            AppError::BadRequest(anyhow::Error::new(e).context("Invalid financials"))
        }),
        None => Ok(defaults),
    }
}

fn record_mismatches(reconciliation: &[GroupReconciliation]) {
    for result in reconciliation {
        let direction = match result.flag.deviation {
            Some(QuantityDeviation::MoreThan) => "more_than",
            Some(QuantityDeviation::LessThan) => "less_than",
            None => continue,
        };
        RECONCILIATION_MISMATCHES_TOTAL
            .with_label_values(&[direction])
            .inc();
    }
}

fn calculate(groups: &[WorkItemGroup], financials: &QuotationFinancialsConfig) -> QuotationTotals {
    CALCULATIONS_TOTAL
        .with_label_values(&[financials.pricing_mode.as_str()])
        .inc();
    services::calculate_totals(groups, financials).rounded()
}

/// Group source lines, reconcile them and total the result.
pub async fn preview_quotation(
    State(state): State<AppState>,
    Json(payload): Json<PreviewQuotationRequest>,
) -> Result<Json<PreviewQuotationResponse>, AppError> {
    payload.validate()?;

    let financials = resolve_financials(&state, payload.financials.as_ref())?;
    let mut groups =
        services::group_source_lines(&payload.source_lines, &state.config.defaults.unit);
    services::sort_groups_latest_first(&mut groups, &payload.work_orders);

    let reconciliation = services::reconcile_groups(&groups, &payload.work_orders);
    record_mismatches(&reconciliation);
    GROUPS_PER_PREVIEW
        .with_label_values(&["source_lines"])
        .observe(groups.len() as f64);

    let totals = calculate(&groups, &financials);
    let financials = services::resolve_config(totals.subtotal, &financials);

    tracing::info!(
        source_lines = payload.source_lines.len(),
        groups = groups.len(),
        final_total = %totals.final_total,
        "Quotation preview computed"
    );

    Ok(Json(PreviewQuotationResponse {
        groups,
        reconciliation,
        totals,
        financials,
    }))
}

/// Recompute totals for an edited set of groups.
pub async fn calculate_quotation(
    State(state): State<AppState>,
    Json(payload): Json<CalculateQuotationRequest>,
) -> Result<Json<CalculateQuotationResponse>, AppError> {
    payload.validate()?;

    let financials = resolve_financials(&state, payload.financials.as_ref())?;
    let totals = calculate(&payload.groups, &financials);

    tracing::debug!(
        groups = payload.groups.len(),
        pricing_mode = financials.pricing_mode.as_str(),
        final_total = %totals.final_total,
        "Quotation totals calculated"
    );

    Ok(Json(CalculateQuotationResponse { totals }))
}

/// Validate and flatten a draft into a submission payload.
pub async fn submit_quotation(
    State(state): State<AppState>,
    Json(payload): Json<SubmitQuotationRequest>,
) -> Result<Json<QuotationSubmission>, AppError> {
    payload.validate()?;

    let financials = resolve_financials(&state, payload.financials.as_ref())?;
    let reconciliation = services::reconcile_groups(&payload.groups, &payload.work_orders);
    record_mismatches(&reconciliation);

    match services::build_submission(&payload.groups, &financials, reconciliation) {
        Ok(submission) => {
            SUBMISSIONS_TOTAL.with_label_values(&["built"]).inc();
            Ok(Json(submission))
        }
        Err(e) => {
            SUBMISSIONS_TOTAL.with_label_values(&["rejected"]).inc();
            tracing::warn!(error = %e, "Quotation submission rejected");
            Err(AppError::BadRequest(anyhow::Error::new(e)))
        }
    }
}
