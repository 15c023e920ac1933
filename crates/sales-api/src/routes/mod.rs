//! # Routes
//!
//! Liveness probe and the four dashboard aggregations.

pub mod dashboard;
pub mod health;

pub use dashboard::{kpis, sales_by_product, sales_by_region, sales_over_time};
pub use health::{health_check, index};
