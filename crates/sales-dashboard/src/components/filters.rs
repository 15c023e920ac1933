//! # Filter Sidebar
//!
//! Region and date-range selectors feeding every data request.

use leptos::prelude::*;
use sales_domain::DateRange;

use crate::state::{region_options, use_app_state};

/// Sidebar with the two filter selects
#[component]
pub fn FiltersSidebar() -> impl IntoView {
    let state = use_app_state();
    let region = state.region;
    let date_range = state.date_range;

    let on_region = move |ev: web_sys::Event| region.set(event_target_value(&ev));

    let on_range = move |ev: web_sys::Event| {
        let selected = event_target_value(&ev)
            .parse::<u32>()
            .ok()
            .and_then(|days| DateRange::from_days(days).ok());
        match selected {
            Some(range) => date_range.set(range),
            None => log::warn!("ignoring unknown date range selection"),
        }
    };

    view! {
        <aside class="sidebar">
            <div class="panel-title">"FILTERS"</div>

            <label class="field">
                <span class="field-label">"Region"</span>
                <select on:change=on_region prop:value=move || region.get()>
                    {region_options()
                        .into_iter()
                        .map(|code| view! { <option value=code>{code}</option> })
                        .collect_view()}
                </select>
            </label>

            <label class="field">
                <span class="field-label">"Date range"</span>
                <select
                    on:change=on_range
                    prop:value=move || date_range.get().days().to_string()
                >
                    {DateRange::OPTIONS
                        .into_iter()
                        .map(|range| {
                            view! {
                                <option value=range.days().to_string()>{range.label()}</option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
        </aside>
    }
}
