//! # Status Notices
//!
//! Messages shown in place of data: offline backend, failed requests and
//! empty selections.

use leptos::prelude::*;

use crate::services::FetchError;
use crate::state::use_app_state;

pub const NO_DATA_MESSAGE: &str = "No data for selected filters.";

/// Full-page notice when the startup health check fails
#[component]
pub fn BackendDown(error: FetchError) -> impl IntoView {
    let state = use_app_state();
    let api_base = state.client.config().api_base.clone();

    let headline = match &error {
        FetchError::Unreachable(_) => format!("Backend not reachable at {api_base}"),
        FetchError::Backend { .. } | FetchError::Decode(_) => {
            format!("Backend at {api_base} is not healthy")
        }
    };

    view! {
        <div class="notice critical">
            <div class="notice-title">{headline}</div>
            <div class="notice-detail">{error.to_string()}</div>
            <div class="notice-detail">
                "Start it with: "
                <code>"DATA_PATH=data/sales.csv cargo run -p sales-api"</code>
            </div>
        </div>
    }
}

/// Inline notice for a failed data request
#[component]
pub fn FetchFailed(error: FetchError) -> impl IntoView {
    let class = match error {
        FetchError::Unreachable(_) => "notice critical",
        FetchError::Backend { .. } | FetchError::Decode(_) => "notice warning",
    };
    view! { <div class=class>{error.to_string()}</div> }
}

#[component]
pub fn NoData() -> impl IntoView {
    view! { <div class="notice warning">{NO_DATA_MESSAGE}</div> }
}

#[component]
pub fn Loading() -> impl IntoView {
    view! { <div class="notice">"Loading..."</div> }
}
