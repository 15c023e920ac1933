//! # KPI Cards
//!
//! Overview page: headline sales, profit and order counts.

use leptos::prelude::*;
use sales_domain::Kpis;

use super::status::{FetchFailed, Loading};
use crate::format;
use crate::state::{LoadState, use_filtered_load};

#[component]
fn KpiCard(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="kpi-card">
            <div class="text-xs text-muted uppercase tracking-wide">{label}</div>
            <div class="text-xl font-bold text-accent">{value}</div>
        </div>
    }
}

/// Overview page
#[component]
pub fn OverviewPage() -> impl IntoView {
    let kpis = use_filtered_load(|client, filter| async move { client.kpis(&filter).await });

    view! {
        <section class="panel">
            <div class="panel-header">
                <span class="panel-title">"KEY METRICS"</span>
            </div>
            <div class="panel-body">
                {move || match kpis.get() {
                    LoadState::Loading => view! { <Loading /> }.into_any(),
                    LoadState::Failed(error) => view! { <FetchFailed error=error /> }.into_any(),
                    LoadState::Ready(Kpis { total_sales, total_profit, total_orders }) => {
                        view! {
                            <div class="kpi-grid">
                                <KpiCard label="Total Sales" value=format::currency(total_sales) />
                                <KpiCard label="Total Profit" value=format::currency(total_profit) />
                                <KpiCard label="Total Orders" value=format::count(total_orders) />
                            </div>
                        }
                            .into_any()
                    }
                }}
            </div>
        </section>
    }
}
