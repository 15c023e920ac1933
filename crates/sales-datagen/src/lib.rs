//! # Sales Data Generator
//!
//! Sample data for the sales dashboard.
//!
//! ## Features
//!
//! - Seeded, reproducible line-item generation
//! - Multi-item orders sharing one order id, date and region
//! - CSV output in the column layout the API reads

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod catalog;
pub mod generator;

pub use catalog::{CATALOG, Product};
pub use generator::{GeneratorConfig, SalesGenerator, SalesRow, write_csv, write_csv_file};
