//! # Header Component
//!
//! Title bar with the page tabs and backend connectivity badge.

use leptos::prelude::*;

use crate::state::{BackendStatus, Page, use_app_state};

/// Header with title, page tabs and status badge
#[component]
pub fn Header() -> impl IntoView {
    let state = use_app_state();
    let current_page = state.page;
    let backend = state.backend;

    let status = move || match backend.get() {
        BackendStatus::Checking => ("warning", "CONNECTING"),
        BackendStatus::Online => ("nominal", "ONLINE"),
        BackendStatus::Down(_) => ("critical", "OFFLINE"),
    };

    view! {
        <header class="dash-header">
            <div class="logo">
                <div class="logo-text">"SALES COMMAND CENTER"</div>
                <div class="logo-subtitle">"Regional sales intelligence"</div>
            </div>

            <nav class="page-tabs">
                {Page::ALL
                    .into_iter()
                    .map(move |page| {
                        view! {
                            <button
                                class="tab"
                                class:active=move || current_page.get() == page
                                on:click=move |_| current_page.set(page)
                            >
                                {page.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            <div
                class="status-badge"
                class:nominal=move || status().0 == "nominal"
                class:warning=move || status().0 == "warning"
                class:critical=move || status().0 == "critical"
            >
                <span
                    class="status-dot"
                    class:nominal=move || status().0 == "nominal"
                    class:warning=move || status().0 == "warning"
                    class:critical=move || status().0 == "critical"
                ></span>
                {move || status().1}
            </div>
        </header>
    }
}
