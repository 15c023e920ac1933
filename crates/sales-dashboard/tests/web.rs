//! Browser tests, run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use sales_dashboard::config::DashboardConfig;
use sales_dashboard::services::{ApiClient, FetchError};
use sales_domain::DashboardFilter;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn unreachable_backend_is_reported_as_unreachable() {
    // Nothing listens on the discard port.
    let config = DashboardConfig::default().with_api_base("http://127.0.0.1:9");
    let client = ApiClient::new(config);

    let err = client.kpis(&DashboardFilter::default()).await.unwrap_err();
    assert!(matches!(err, FetchError::Unreachable(_)), "{err}");
}

#[wasm_bindgen_test]
fn config_reads_defaults_without_override() {
    let config = DashboardConfig::from_document();
    assert_eq!(config.timeout_ms, 10_000);
}
