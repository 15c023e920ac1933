//! Data preparation pipeline.
//!
//! `load -> validate schema -> parse rows -> filter region -> filter recency`.
//! Rows whose date or numeric cells cannot be parsed are dropped and counted
//! rather than failing the call; callers of the HTTP surface never see them.

use crate::error::{AnalyticsError, Result};
use crate::source::SalesSource;
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use sales_domain::{DashboardFilter, REQUIRED_COLUMNS, RegionFilter, SalesRecord};

/// Accepted date layouts, tried in order. Month-first wins for ambiguous
/// slash and dash forms.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%m-%d-%Y", "%d-%m-%Y",
];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

/// Filtered, typed record set for one call.
#[derive(Debug, Clone, Default)]
pub struct PreparedTable {
    /// Surviving records, in source order
    pub records: Vec<SalesRecord>,
    /// Source rows excluded for an unparseable date or malformed cells
    pub dropped_rows: usize,
}

/// Positions of the required columns within the header.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    region: usize,
    quantity: usize,
    price: usize,
    cost: usize,
    order_id: usize,
    product: usize,
}

/// Run the full pipeline against `source`.
///
/// # Errors
///
/// - [`AnalyticsError::DataUnavailable`] if the source cannot be read
/// - [`AnalyticsError::Schema`] if any required column is absent
pub fn prepare(source: &dyn SalesSource, filter: &DashboardFilter) -> Result<PreparedTable> {
    let table = source.load()?;
    let columns = validate_schema(&table.headers)?;

    let total_rows = table.rows.len();
    let records: Vec<SalesRecord> = table
        .rows
        .iter()
        .filter_map(|row| parse_record(row, columns))
        .collect();
    let dropped_rows = total_rows - records.len();

    if dropped_rows > 0 {
        tracing::warn!(
            source = %source.location(),
            dropped_rows,
            total_rows,
            "Dropped rows with unparseable date or malformed cells"
        );
    }

    let region = filter.region_filter();
    let records = filter_region(records, &region);
    let records = filter_recent(records, filter.days);

    tracing::debug!(
        region = %region,
        days = filter.days,
        rows = records.len(),
        "Prepared sales table"
    );

    Ok(PreparedTable {
        records,
        dropped_rows,
    })
}

fn validate_schema(headers: &[String]) -> Result<ColumnIndex> {
    let positions = REQUIRED_COLUMNS.map(|name| headers.iter().position(|h| h == name));

    match positions {
        [
            Some(date),
            Some(region),
            Some(quantity),
            Some(price),
            Some(cost),
            Some(order_id),
            Some(product),
        ] => Ok(ColumnIndex {
            date,
            region,
            quantity,
            price,
            cost,
            order_id,
            product,
        }),
        _ => {
            let missing = REQUIRED_COLUMNS
                .into_iter()
                .zip(positions)
                .filter(|(_, position)| position.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            Err(AnalyticsError::Schema { missing })
        }
    }
}

/// Typed record for one row, or `None` if the row must be dropped.
fn parse_record(row: &StringRecord, columns: ColumnIndex) -> Option<SalesRecord> {
    let date = parse_date(row.get(columns.date)?)?;
    let region = row.get(columns.region)?;
    let quantity = parse_quantity(row.get(columns.quantity)?)?;
    let price = parse_amount(row.get(columns.price)?)?;
    let cost = parse_amount(row.get(columns.cost)?)?;
    let order_id = row.get(columns.order_id)?;
    let product = row.get(columns.product)?;

    Some(SalesRecord::new(
        date, region, quantity, price, cost, order_id, product,
    ))
}

/// Tolerant calendar-date parser. Time components are discarded.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_quantity(raw: &str) -> Option<u32> {
    let value = raw.trim();
    if let Ok(quantity) = value.parse::<u32>() {
        return Some(quantity);
    }
    // Spreadsheet exports often write whole numbers as "2.0".
    let float = value.parse::<f64>().ok()?;
    if float.is_finite() && float >= 0.0 && float.fract() == 0.0 && float <= f64::from(u32::MAX) {
        Some(float as u32)
    } else {
        None
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn filter_region(records: Vec<SalesRecord>, region: &RegionFilter) -> Vec<SalesRecord> {
    match region {
        RegionFilter::All => records,
        RegionFilter::Only(_) => records
            .into_iter()
            .filter(|r| region.matches(&r.region))
            .collect(),
    }
}

/// Keep rows on or after `max(date) - days`, where the max is taken from
/// the records passed in. `days == 0` disables the filter.
fn filter_recent(records: Vec<SalesRecord>, days: u64) -> Vec<SalesRecord> {
    if days == 0 {
        return records;
    }
    let Some(max_date) = records.iter().map(|r| r.date).max() else {
        return records;
    };
    let cutoff = max_date
        .checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN);

    records.into_iter().filter(|r| r.date >= cutoff).collect()
}
