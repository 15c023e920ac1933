//! # Sales Command Center Dashboard
//!
//! Browser dashboard over the sales API: KPI cards, regional and product
//! breakdowns and a daily trend, filtered by region and date range.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod components;
pub mod config;
pub mod format;
pub mod services;
pub mod state;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use wasm_bindgen::prelude::wasm_bindgen;

use components::*;
use config::DashboardConfig;
use state::*;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_app_state(DashboardConfig::from_document());
    check_backend();

    let state = use_app_state();
    let backend = state.backend;

    view! {
        <Title text="Sales Command Center" />
        <div class="dash-container">
            <Header />
            {move || match backend.get() {
                BackendStatus::Checking => view! { <Loading /> }.into_any(),
                BackendStatus::Down(error) => view! { <BackendDown error=error /> }.into_any(),
                BackendStatus::Online => view! { <Dashboard /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn Dashboard() -> impl IntoView {
    let page = use_app_state().page;

    view! {
        <FiltersSidebar />
        <main class="dash-main">
            {move || match page.get() {
                Page::Overview => view! { <OverviewPage /> }.into_any(),
                Page::Region => view! { <RegionPage /> }.into_any(),
                Page::Trends => view! { <TrendsPage /> }.into_any(),
            }}
        </main>
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("Sales Command Center v{}", env!("CARGO_PKG_VERSION"));
    leptos::mount::mount_to_body(App);
}
