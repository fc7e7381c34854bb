//! HTTP handlers for quotation-service.

pub mod health;
pub mod quotations;
pub mod work_orders;

pub use health::{health_check, metrics_handler, readiness_check};
