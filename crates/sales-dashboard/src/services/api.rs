//! # API Client
//!
//! REST client for the sales backend. Every request is bounded by the
//! configured timeout; aggregation responses go through the shared
//! [`ResponseCache`].

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use futures::future::{self, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use sales_domain::{DashboardFilter, HealthStatus, Kpis, ProductSales, RegionSales, TimeSales};

use super::cache::{ResponseCache, cache_key};
use crate::config::DashboardConfig;

/// Why a backend call produced no usable data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network failure or timeout
    Unreachable(String),
    /// Non-success status; `message` is the backend's own error text
    Backend { status: u16, message: String },
    /// Body did not match the expected shape
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable(reason) => write!(f, "Backend unreachable: {reason}"),
            Self::Backend { status, message } => {
                write!(f, "Backend returned an error ({status}): {message}")
            }
            Self::Decode(reason) => write!(f, "Unexpected response from backend: {reason}"),
        }
    }
}

impl std::error::Error for FetchError {}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Classify a non-success response, preferring the backend's message.
pub fn backend_error(status: u16, body: &str) -> FetchError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    FetchError::Backend { status, message }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Backend client shared through the application state
#[derive(Clone, Debug)]
pub struct ApiClient {
    config: DashboardConfig,
    cache: Arc<Mutex<ResponseCache>>,
}

impl ApiClient {
    pub fn new(config: DashboardConfig) -> Self {
        let cache = ResponseCache::new(config.cache_ttl);
        Self::with_cache(config, cache)
    }

    pub fn with_cache(config: DashboardConfig, cache: ResponseCache) -> Self {
        Self {
            config,
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Liveness probe. Never cached.
    pub async fn health(&self) -> Result<HealthStatus, FetchError> {
        let body = self.fetch_text("/health", None).await?;
        decode(&body)
    }

    pub async fn kpis(&self, filter: &DashboardFilter) -> Result<Kpis, FetchError> {
        self.get_cached("/kpis", filter).await
    }

    pub async fn sales_by_region(
        &self,
        filter: &DashboardFilter,
    ) -> Result<Vec<RegionSales>, FetchError> {
        self.get_cached("/sales_by_region", filter).await
    }

    pub async fn sales_by_product(
        &self,
        filter: &DashboardFilter,
    ) -> Result<Vec<ProductSales>, FetchError> {
        self.get_cached("/sales_by_product", filter).await
    }

    pub async fn sales_over_time(
        &self,
        filter: &DashboardFilter,
    ) -> Result<Vec<TimeSales>, FetchError> {
        self.get_cached("/sales_over_time", filter).await
    }

    fn lock_cache(&self) -> MutexGuard<'_, ResponseCache> {
        // Cache contents stay valid even if a holder panicked.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn get_cached<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        filter: &DashboardFilter,
    ) -> Result<T, FetchError> {
        let key = cache_key(endpoint, filter);

        let cached = self
            .lock_cache()
            .get(&key, Utc::now())
            .map(str::to_owned);
        if let Some(body) = cached {
            log::debug!("cache hit: {key}");
            return decode(&body);
        }

        let body = self.fetch_text(endpoint, Some(filter)).await?;
        let value = decode(&body)?;

        let now = Utc::now();
        let mut cache = self.lock_cache();
        let purged = cache.purge_expired(now);
        cache.insert(key, body, now);
        log::debug!("cached {endpoint} ({} entries, {purged} expired)", cache.len());

        Ok(value)
    }

    async fn fetch_text(
        &self,
        endpoint: &str,
        filter: Option<&DashboardFilter>,
    ) -> Result<String, FetchError> {
        let url = self.config.endpoint_url(endpoint);
        let mut request = Request::get(&url);
        if let Some(filter) = filter {
            let days = filter.days.to_string();
            request = request.query([("region", filter.region.as_str()), ("days", days.as_str())]);
        }

        let send = Box::pin(request.send());
        let timeout = Box::pin(TimeoutFuture::new(self.config.timeout_ms));

        let response = match future::select(send, timeout).await {
            Either::Left((result, _)) => {
                result.map_err(|e| FetchError::Unreachable(e.to_string()))?
            }
            Either::Right(((), _)) => {
                log::warn!("{url} timed out after {} ms", self.config.timeout_ms);
                return Err(FetchError::Unreachable(format!(
                    "no response within {} ms",
                    self.config.timeout_ms
                )));
            }
        };

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        if !response.ok() {
            return Err(backend_error(response.status(), &body));
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_uses_envelope_message() {
        let body = r#"{"error":{"message":"Missing columns: price","code":"SCHEMA_ERROR"}}"#;
        assert_eq!(
            backend_error(500, body),
            FetchError::Backend {
                status: 500,
                message: "Missing columns: price".into()
            }
        );
    }

    #[test]
    fn test_backend_error_falls_back_to_raw_body() {
        let err = backend_error(400, "Failed to deserialize query string\n");
        assert_eq!(
            err,
            FetchError::Backend {
                status: 400,
                message: "Failed to deserialize query string".into()
            }
        );
    }

    #[test]
    fn test_error_messages_distinguish_kinds() {
        let unreachable = FetchError::Unreachable("connection refused".into()).to_string();
        let backend = backend_error(500, "boom").to_string();
        assert!(unreachable.starts_with("Backend unreachable"));
        assert!(backend.starts_with("Backend returned an error (500)"));
    }

    #[test]
    fn test_decode_response_shapes() {
        let kpis: Kpis =
            decode(r#"{"total_sales":45.0,"total_profit":27.0,"total_orders":2}"#).unwrap();
        assert_eq!(kpis.total_orders, 2);

        let series: Vec<TimeSales> = decode(r#"[{"date":"2024-01-02","sales":15.0}]"#).unwrap();
        assert_eq!(series[0].date.to_string(), "2024-01-02");

        assert!(matches!(
            decode::<Kpis>("[]"),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn test_cached_body_is_reused() {
        let config = DashboardConfig::default();
        let mut cache = ResponseCache::new(config.cache_ttl);
        let filter = DashboardFilter::default();
        cache.insert(
            cache_key("/kpis", &filter),
            r#"{"total_sales":1.0,"total_profit":0.5,"total_orders":1}"#,
            Utc::now(),
        );
        let client = ApiClient::with_cache(config, cache);

        let kpis = futures::executor::block_on(client.kpis(&filter)).unwrap();
        assert_eq!(kpis.total_orders, 1);
        assert_eq!(client.lock_cache().len(), 1);
    }
}
