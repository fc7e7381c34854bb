//! service-core: Shared infrastructure for the quotation workspace.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
