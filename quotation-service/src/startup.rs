//! Application startup and lifecycle management.

use crate::config::QuotationConfig;
use crate::handlers::{
    health_check, metrics_handler,
    quotations::{calculate_quotation, preview_quotation, submit_quotation},
    readiness_check,
    work_orders::{sort_work_orders, summarize_work_orders},
};
use crate::middleware::metrics_middleware;
use crate::services::init_metrics;
use axum::{
    extract::Request,
    middleware,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::tracing::{request_id_middleware, REQUEST_ID_HEADER};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<QuotationConfig>,
}

/// Build the HTTP router. Split out so handlers can be driven without a socket.
pub fn router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let request_id = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %req.method(),
                uri = %req.uri(),
                request_id = %request_id,
            )
        })
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .route("/quotations/preview", post(preview_quotation))
        .route("/quotations/calculate", post(calculate_quotation))
        .route("/quotations/submission", post(submit_quotation))
        .route("/work-orders/sort", post(sort_work_orders))
        .route("/work-orders/summary", post(summarize_work_orders))
        .layer(trace_layer)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: QuotationConfig) -> Result<Self, AppError> {
        init_metrics();

        let addr = config.common.bind_address();
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port = port,
            vat_percentage = %config.defaults.vat_percentage,
            withholding_tax_percentage = %config.defaults.withholding_tax_percentage,
            "Quotation service listener bound"
        );

        Ok(Self {
            port,
            listener,
            state: AppState {
                config: Arc::new(config),
            },
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let app = router(self.state);

        tracing::info!(
            service = "quotation-service",
            version = env!("CARGO_PKG_VERSION"),
            port = self.port,
            "Service ready to accept connections"
        );

        axum::serve(self.listener, app).await.map_err(|e| {
            tracing::error!(error = %e, "HTTP server error");
            std::io::Error::other(format!("HTTP server error: {}", e))
        })
    }
}
