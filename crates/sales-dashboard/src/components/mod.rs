//! # UI Components Module
//!
//! Leptos components for the sales dashboard.

pub mod charts;
pub mod filters;
pub mod header;
pub mod kpi_cards;
pub mod status;

pub use charts::*;
pub use filters::*;
pub use header::*;
pub use kpi_cards::*;
pub use status::*;
