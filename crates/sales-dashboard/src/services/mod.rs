//! # Services Module
//!
//! Backend communication for the dashboard.

pub mod api;
pub mod cache;

pub use api::*;
pub use cache::*;
