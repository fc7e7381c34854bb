//! Numeric helpers shared by the models and the calculation engine.

pub mod lenient;
pub mod money;
