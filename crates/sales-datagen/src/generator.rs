//! Synthetic sales line-item generation.

use crate::catalog::{CATALOG, Product};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use sales_domain::KNOWN_REGIONS;
use serde::Serialize;
use std::io;
use std::path::Path;
use uuid::Uuid;

/// Most line items a single order may carry.
pub const MAX_ITEMS_PER_ORDER: u32 = 3;

/// One CSV row. Field order matches the required column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRow {
    pub date: NaiveDate,
    pub region: String,
    pub quantity: u32,
    pub price: f64,
    pub cost: f64,
    pub order_id: String,
    pub product: String,
}

/// Generation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Total line items to emit
    pub rows: usize,
    /// Width of the date window, in days (at least one)
    pub days: u32,
    /// Last date of the window
    pub end: NaiveDate,
    pub seed: u64,
}

/// Deterministic sales generator.
pub struct SalesGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    price_jitter: Normal<f64>,
}

impl SalesGenerator {
    /// Create a generator seeded from `config.seed`.
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(config.seed),
            price_jitter: Normal::new(0.0, 0.04).expect("positive standard deviation"),
        }
    }

    /// Generate `config.rows` line items grouped into orders.
    pub fn generate(&mut self) -> Vec<SalesRow> {
        let mut rows = Vec::with_capacity(self.config.rows);

        while rows.len() < self.config.rows {
            let remaining = self.config.rows - rows.len();
            let items = (self.rng.gen_range(1..=MAX_ITEMS_PER_ORDER) as usize).min(remaining);
            rows.extend(self.generate_order(items));
        }

        rows
    }

    /// Generate one order: shared id, date and region across its items.
    fn generate_order(&mut self, items: usize) -> Vec<SalesRow> {
        let order_id = uuid::Builder::from_random_bytes(self.rng.r#gen()).into_uuid();
        let date = self.random_date();
        let region = KNOWN_REGIONS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(KNOWN_REGIONS[0]);

        let products: Vec<Product> = CATALOG
            .choose_multiple(&mut self.rng, items)
            .copied()
            .collect();

        products
            .into_iter()
            .map(|product| self.line_item(order_id, date, region, product))
            .collect()
    }

    fn line_item(&mut self, order_id: Uuid, date: NaiveDate, region: &str, product: Product) -> SalesRow {
        let jitter = self.price_jitter.sample(&mut self.rng).clamp(-0.1, 0.1);

        SalesRow {
            date,
            region: region.to_string(),
            quantity: self.rng.gen_range(1..=10),
            price: round_cents(product.unit_price * (1.0 + jitter)),
            cost: product.unit_cost,
            order_id: order_id.to_string(),
            product: product.name.to_string(),
        }
    }

    fn random_date(&mut self) -> NaiveDate {
        let offset = self.rng.gen_range(0..self.config.days.max(1));
        self.config
            .end
            .checked_sub_days(Days::new(u64::from(offset)))
            .unwrap_or(NaiveDate::MIN)
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Write rows as CSV with a header line.
pub fn write_csv<W: io::Write>(rows: &[SalesRow], out: W) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write rows to `path`, creating parent directories as needed.
pub fn write_csv_file(rows: &[SalesRow], path: &Path) -> csv::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_csv(rows, io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_analytics::{CsvTextSource, prepare};
    use sales_domain::{DashboardFilter, REQUIRED_COLUMNS};
    use std::collections::HashMap;

    fn config(rows: usize) -> GeneratorConfig {
        GeneratorConfig {
            rows,
            days: 30,
            end: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            seed: 7,
        }
    }

    fn to_csv(rows: &[SalesRow]) -> String {
        let mut buf = Vec::new();
        write_csv(rows, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_exact_row_count() {
        for n in [0, 1, 2, 3, 250] {
            assert_eq!(SalesGenerator::new(config(n)).generate().len(), n);
        }
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = SalesGenerator::new(config(100)).generate();
        let b = SalesGenerator::new(config(100)).generate();
        assert_eq!(a, b);

        let mut other = config(100);
        other.seed = 8;
        assert_ne!(a, SalesGenerator::new(other).generate());
    }

    #[test]
    fn test_rows_within_bounds() {
        let cfg = config(500);
        let start = cfg.end - Days::new(29);

        for row in SalesGenerator::new(cfg).generate() {
            assert!(row.date >= start && row.date <= cfg.end);
            assert!(KNOWN_REGIONS.contains(&row.region.as_str()));
            assert!((1..=10).contains(&row.quantity));
            assert!(row.cost < row.price);
        }
    }

    #[test]
    fn test_orders_share_date_and_region() {
        let rows = SalesGenerator::new(config(300)).generate();
        let mut orders: HashMap<&str, Vec<&SalesRow>> = HashMap::new();
        for row in &rows {
            orders.entry(row.order_id.as_str()).or_default().push(row);
        }

        for items in orders.values() {
            assert!(items.len() <= MAX_ITEMS_PER_ORDER as usize);
            assert!(items.iter().all(|r| r.date == items[0].date && r.region == items[0].region));
        }
    }

    #[test]
    fn test_header_matches_required_columns() {
        let csv = to_csv(&SalesGenerator::new(config(5)).generate());
        let header = csv.lines().next().unwrap();
        assert_eq!(header, REQUIRED_COLUMNS.join(","));
    }

    #[test]
    fn test_output_parses_without_drops() {
        let rows = SalesGenerator::new(config(400)).generate();
        let source = CsvTextSource::new(to_csv(&rows));

        let table = prepare(&source, &DashboardFilter::default()).unwrap();
        assert_eq!(table.dropped_rows, 0);
        assert_eq!(table.records.len(), rows.len());
    }

    #[test]
    fn test_write_csv_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sales.csv");

        write_csv_file(&SalesGenerator::new(config(10)).generate(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 11);
    }
}
