//! Analytics error types.

use thiserror::Error;

/// Analytics errors.
///
/// Both load-time variants are raised before any aggregation runs.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// Backing store missing or unreadable
    #[error("Sales data unavailable at {path}: {reason}")]
    DataUnavailable {
        /// Location that was read
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// Required columns absent from the header
    #[error("Missing columns: {}", .missing.join(", "))]
    Schema {
        /// Missing column names, in canonical order
        missing: Vec<String>,
    },

    /// Data conversion error
    #[error("Data conversion error: {0}")]
    Conversion(String),
}

impl AnalyticsError {
    pub(crate) fn unavailable(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::DataUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
