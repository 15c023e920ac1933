//! # Application State
//!
//! Reactive state for the dashboard: sidebar filters, the selected page and
//! backend connectivity, plus the shared API client.

use std::future::Future;

use leptos::prelude::*;
use sales_domain::{ALL_REGIONS, DashboardFilter, DateRange, KNOWN_REGIONS};

use crate::config::DashboardConfig;
use crate::services::{ApiClient, FetchError};

/// Dashboard pages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Overview,
    Region,
    Trends,
}

impl Page {
    pub const ALL: [Self; 3] = [Self::Overview, Self::Region, Self::Trends];

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Region => "Region",
            Self::Trends => "Trends",
        }
    }
}

/// Result of the startup health check
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BackendStatus {
    Checking,
    Online,
    Down(FetchError),
}

/// Progress of one data request
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(FetchError),
}

impl<T> From<Result<T, FetchError>> for LoadState<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err),
        }
    }
}

/// Region selector options: the sentinel first, then the known codes.
pub fn region_options() -> Vec<&'static str> {
    std::iter::once(ALL_REGIONS).chain(KNOWN_REGIONS).collect()
}

/// Global application state
#[derive(Clone, Debug)]
pub struct AppState {
    pub client: ApiClient,
    pub region: RwSignal<String>,
    pub date_range: RwSignal<DateRange>,
    pub page: RwSignal<Page>,
    pub backend: RwSignal<BackendStatus>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            client: ApiClient::new(config),
            region: RwSignal::new(ALL_REGIONS.to_string()),
            date_range: RwSignal::new(DateRange::All),
            page: RwSignal::new(Page::default()),
            backend: RwSignal::new(BackendStatus::Checking),
        }
    }

    /// Current filter, tracked by the surrounding reactive scope.
    pub fn filter(&self) -> DashboardFilter {
        DashboardFilter::new(self.region.get(), u64::from(self.date_range.get().days()))
    }

    pub fn filter_untracked(&self) -> DashboardFilter {
        DashboardFilter::new(
            self.region.get_untracked(),
            u64::from(self.date_range.get_untracked().days()),
        )
    }
}

pub fn provide_app_state(config: DashboardConfig) {
    let state = AppState::new(config);
    provide_context(state);
}

pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}

/// Re-run `fetch` whenever the sidebar filter changes.
///
/// Responses for a filter that is no longer selected are discarded.
pub fn use_filtered_load<T, F, Fut>(fetch: F) -> RwSignal<LoadState<T>>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(ApiClient, DashboardFilter) -> Fut + 'static,
    Fut: Future<Output = Result<T, FetchError>> + 'static,
{
    let state = use_app_state();
    let data = RwSignal::new(LoadState::Loading);

    Effect::new(move |_| {
        let filter = state.filter();
        data.set(LoadState::Loading);

        let pending = fetch(state.client.clone(), filter.clone());
        let current = state.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = pending.await;
            if current.filter_untracked() == filter {
                data.set(LoadState::from(result));
            } else {
                log::debug!("discarding response for stale filter {filter:?}");
            }
        });
    });

    data
}

/// Probe `/health` once and record the outcome.
pub fn check_backend() {
    let state = use_app_state();
    let client = state.client.clone();
    let backend = state.backend;

    wasm_bindgen_futures::spawn_local(async move {
        let status = match client.health().await {
            Ok(health) if health.status == "ok" => BackendStatus::Online,
            Ok(health) => BackendStatus::Down(FetchError::Backend {
                status: 200,
                message: format!("unexpected status '{}'", health.status),
            }),
            Err(err) => BackendStatus::Down(err),
        };
        log::info!("backend status: {status:?}");
        backend.set(status);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_options() {
        assert_eq!(region_options(), vec!["ALL", "NSW", "QLD", "VIC"]);
    }

    #[test]
    fn test_load_state_from_result() {
        assert_eq!(LoadState::from(Ok::<_, FetchError>(3)), LoadState::Ready(3));
        let failed: LoadState<u8> = Err(FetchError::Unreachable("x".into())).into();
        assert!(matches!(failed, LoadState::Failed(FetchError::Unreachable(_))));
    }

    #[test]
    fn test_page_labels() {
        let labels: Vec<_> = Page::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels, ["Overview", "Region", "Trends"]);
    }
}
