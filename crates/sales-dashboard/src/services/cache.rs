//! # Response Cache
//!
//! Short-lived cache of backend response bodies keyed by endpoint and
//! query parameters. Entries expire by age only; the caller supplies the
//! current time on every access.

use chrono::{DateTime, Duration, Utc};
use sales_domain::DashboardFilter;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct CachedBody {
    body: String,
    stored_at: DateTime<Utc>,
}

/// TTL cache of raw response bodies
#[derive(Debug, Clone)]
pub struct ResponseCache {
    ttl: Duration,
    entries: HashMap<String, CachedBody>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Cached body for `key` if it was stored less than one TTL before `now`.
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> Option<&str> {
        self.entries
            .get(key)
            .filter(|entry| now < entry.stored_at + self.ttl)
            .map(|entry| entry.body.as_str())
    }

    pub fn insert(&mut self, key: impl Into<String>, body: impl Into<String>, now: DateTime<Utc>) {
        self.entries.insert(
            key.into(),
            CachedBody {
                body: body.into(),
                stored_at: now,
            },
        );
    }

    /// Drop expired entries, returning how many were removed.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| now < entry.stored_at + ttl);
        before - self.entries.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Cache key for an endpoint queried with `filter`.
pub fn cache_key(endpoint: &str, filter: &DashboardFilter) -> String {
    format!("{endpoint}?region={}&days={}", filter.region, filter.days)
}
