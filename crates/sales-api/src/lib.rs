//! # Sales Command Center API
//!
//! Read-only HTTP service over a sales CSV snapshot.
//!
//! ## Endpoints
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /health` | `{status}` |
//! | `GET /kpis` | `{total_sales, total_profit, total_orders}` |
//! | `GET /sales_by_region` | `[{region, sales}]`, descending |
//! | `GET /sales_by_product` | `[{product, sales}]`, descending |
//! | `GET /sales_over_time` | `[{date, sales}]`, ascending |
//!
//! Every data route accepts optional `region` (default `ALL`) and `days`
//! (default `0`, all time) query parameters.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Axum HTTP Server                         │
//! │                (CORS + request tracing)                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Route handlers (spawn_blocking)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │        AnalyticsEngine: load → validate → filter            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 data/sales.csv (re-read per call)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Build the CORS layer from configured origins. `*` allows any origin.
#[must_use]
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(allowed))
}

/// Build the Axum router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(routes::health_check))
        .route("/kpis", get(routes::kpis))
        .route("/sales_by_region", get(routes::sales_by_region))
        .route("/sales_by_product", get(routes::sales_by_product))
        .route("/sales_over_time", get(routes::sales_over_time))
        .route("/", get(routes::index))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
