//! # Application State
//!
//! Shared handler state and the bridge onto the blocking pool.

use crate::error::{ApiError, ApiResult};
use sales_analytics::AnalyticsEngine;
use std::sync::Arc;

/// State shared by all handlers. Holds no mutable data; every request
/// recomputes from the backing store.
#[derive(Clone, Debug)]
pub struct AppState {
    pub engine: Arc<AnalyticsEngine>,
}

impl AppState {
    #[must_use]
    pub fn new(engine: AnalyticsEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Run a synchronous engine operation on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns the operation's analytics error, or [`ApiError::Internal`] if
    /// the blocking task panicked or was cancelled.
    pub async fn run<T, F>(&self, op: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&AnalyticsEngine) -> sales_analytics::Result<T> + Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        tokio::task::spawn_blocking(move || op(engine.as_ref()))
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?
            .map_err(ApiError::from)
    }
}
