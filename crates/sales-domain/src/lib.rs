//! # Sales Command Center - Domain Model
//!
//! Core record type, filter types and response shapes for the sales
//! dashboard. These types are shared by the analytics pipeline, the HTTP
//! service and the WASM frontend, so they carry no I/O of their own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Columns that must be present in the backing file, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "date", "region", "quantity", "price", "cost", "order_id", "product",
];

/// Region-filter sentinel meaning "no region restriction".
pub const ALL_REGIONS: &str = "ALL";

/// Regions offered by the dashboard selector.
pub const KNOWN_REGIONS: [&str; 3] = ["NSW", "QLD", "VIC"];

/// Canonical form of a region code: trimmed and upper-cased.
#[must_use]
pub fn normalize_region(raw: &str) -> String {
    raw.trim().to_uppercase()
}

// =============================================================================
// RECORDS
// =============================================================================

/// One line item of the sales record set.
///
/// `sales` and `cost_total` are derived on construction and never read from
/// the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub region: String,
    pub quantity: u32,
    pub price: f64,
    pub cost: f64,
    pub order_id: String,
    pub product: String,
    pub sales: f64,
    pub cost_total: f64,
}

impl SalesRecord {
    /// Build a record, normalizing `region` and deriving the per-row totals.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        region: &str,
        quantity: u32,
        price: f64,
        cost: f64,
        order_id: impl Into<String>,
        product: impl Into<String>,
    ) -> Self {
        let qty = f64::from(quantity);
        Self {
            date,
            region: normalize_region(region),
            quantity,
            price,
            cost,
            order_id: order_id.into(),
            product: product.into(),
            sales: qty * price,
            cost_total: qty * cost,
        }
    }

    /// Per-row profit.
    #[must_use]
    pub fn profit(&self) -> f64 {
        self.sales - self.cost_total
    }
}

// =============================================================================
// FILTERS
// =============================================================================

/// Region restriction after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegionFilter {
    All,
    Only(String),
}

impl RegionFilter {
    /// Parse any caller string. Unknown regions are accepted as-is; they
    /// simply match nothing.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let region = normalize_region(raw);
        if region == ALL_REGIONS {
            Self::All
        } else {
            Self::Only(region)
        }
    }

    #[must_use]
    pub fn matches(&self, region: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == region,
        }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_REGIONS),
            Self::Only(region) => f.write_str(region),
        }
    }
}

/// Query parameters shared by every aggregation endpoint.
///
/// `days == 0` means all time. Absent fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardFilter {
    pub region: String,
    pub days: u64,
}

impl DashboardFilter {
    #[must_use]
    pub fn new(region: impl Into<String>, days: u64) -> Self {
        Self {
            region: region.into(),
            days,
        }
    }

    #[must_use]
    pub fn region_filter(&self) -> RegionFilter {
        RegionFilter::parse(&self.region)
    }
}

impl Default for DashboardFilter {
    fn default() -> Self {
        Self {
            region: ALL_REGIONS.to_string(),
            days: 0,
        }
    }
}

/// Date ranges offered by the dashboard selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateRange {
    #[default]
    All,
    Last7Days,
    Last30Days,
}

impl DateRange {
    pub const OPTIONS: [Self; 3] = [Self::All, Self::Last7Days, Self::Last30Days];

    #[must_use]
    pub const fn days(self) -> u32 {
        match self {
            Self::All => 0,
            Self::Last7Days => 7,
            Self::Last30Days => 30,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
        }
    }

    /// Inverse of [`DateRange::days`].
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownDateRange`] for any other day count.
    pub fn from_days(days: u32) -> Result<Self, DomainError> {
        Self::OPTIONS
            .into_iter()
            .find(|range| range.days() == days)
            .ok_or(DomainError::UnknownDateRange(days))
    }
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

/// Liveness probe payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Headline metrics. All zero for an empty selection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Kpis {
    pub total_sales: f64,
    pub total_profit: f64,
    pub total_orders: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSales {
    pub region: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    pub product: String,
    pub sales: f64,
}

/// Daily sales point. `date` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSales {
    pub date: NaiveDate,
    pub sales: f64,
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Unsupported date range: {0} days")]
    UnknownDateRange(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_record_derives_totals() {
        let record = SalesRecord::new(date(2024, 1, 1), " nsw ", 3, 5.0, 2.0, "o2", "X");
        assert_eq!(record.region, "NSW");
        assert_eq!(record.sales, 15.0);
        assert_eq!(record.cost_total, 6.0);
        assert_eq!(record.profit(), 9.0);
    }

    #[test]
    fn test_region_filter_normalizes() {
        assert_eq!(RegionFilter::parse(" all "), RegionFilter::All);
        assert_eq!(RegionFilter::parse("vic"), RegionFilter::Only("VIC".into()));
        assert_eq!(RegionFilter::parse(" vic "), RegionFilter::parse("VIC"));
        assert!(RegionFilter::All.matches("QLD"));
        assert!(!RegionFilter::parse("nsw").matches("VIC"));
    }

    #[test]
    fn test_filter_defaults_when_absent() {
        let filter: DashboardFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter, DashboardFilter::default());
        assert_eq!(filter.region_filter(), RegionFilter::All);

        let filter: DashboardFilter = serde_json::from_str(r#"{"days": 7}"#).unwrap();
        assert_eq!(filter.region, "ALL");
        assert_eq!(filter.days, 7);
    }

    #[test]
    fn test_date_range_round_trip() {
        for range in DateRange::OPTIONS {
            assert_eq!(DateRange::from_days(range.days()).unwrap(), range);
        }
        assert!(DateRange::from_days(14).is_err());
        assert_eq!(DateRange::Last30Days.label(), "Last 30 days");
    }

    #[test]
    fn test_time_sales_serializes_iso_date() {
        let point = TimeSales {
            date: date(2024, 3, 9),
            sales: 12.5,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["date"], "2024-03-09");
    }
}
