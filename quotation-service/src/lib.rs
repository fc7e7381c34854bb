//! Quotation Service - work item grouping, quantity reconciliation and
//! quotation financial calculation for garment work orders.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;
