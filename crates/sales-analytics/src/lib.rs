//! # Sales Analytics
//!
//! Preparation pipeline and aggregations behind the sales dashboard.
//! Every call reloads the backing file, so results always reflect the
//! current snapshot and no state is kept between calls.
//!
//! ## Features
//!
//! - Schema validation against the seven required columns
//! - Tolerant date parsing with dropped-row accounting
//! - Region and recency filtering anchored to the data, not the clock
//! - Headline KPIs and region / product / daily breakdowns
//! - JSON and Markdown reports

#![forbid(unsafe_code)]
#![warn(clippy::all, missing_docs)]

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod queries;
pub mod reports;
pub mod source;

pub use engine::AnalyticsEngine;
pub use error::{AnalyticsError, Result};
pub use pipeline::{PreparedTable, prepare};
pub use reports::DashboardReport;
pub use source::{CsvFileSource, CsvTextSource, RawTable, SalesSource};
