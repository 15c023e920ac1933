//! The four fixed aggregations over a prepared record set.

use sales_domain::{Kpis, ProductSales, RegionSales, SalesRecord, TimeSales};
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Headline metrics. Distinct `order_id`s are counted once regardless of
/// how many line items they have; blank ids are not counted as orders.
#[must_use]
pub fn compute_kpis(records: &[SalesRecord]) -> Kpis {
    if records.is_empty() {
        return Kpis::default();
    }

    let total_sales = records.iter().map(|r| r.sales).sum();
    let total_profit = records.iter().map(SalesRecord::profit).sum();
    let orders: HashSet<&str> = records
        .iter()
        .map(|r| r.order_id.as_str())
        .filter(|id| !id.trim().is_empty())
        .collect();

    Kpis {
        total_sales,
        total_profit,
        total_orders: orders.len() as u64,
    }
}

/// Sales per region, highest first.
#[must_use]
pub fn sales_by_region(records: &[SalesRecord]) -> Vec<RegionSales> {
    sum_sales_desc(records, |r| r.region.as_str())
        .into_iter()
        .map(|(region, sales)| RegionSales {
            region: region.to_string(),
            sales,
        })
        .collect()
}

/// Sales per product, highest first.
#[must_use]
pub fn sales_by_product(records: &[SalesRecord]) -> Vec<ProductSales> {
    sum_sales_desc(records, |r| r.product.as_str())
        .into_iter()
        .map(|(product, sales)| ProductSales {
            product: product.to_string(),
            sales,
        })
        .collect()
}

/// Sales per calendar day, oldest first.
#[must_use]
pub fn sales_over_time(records: &[SalesRecord]) -> Vec<TimeSales> {
    let mut by_date: BTreeMap<_, f64> = BTreeMap::new();
    for record in records {
        *by_date.entry(record.date).or_default() += record.sales;
    }

    by_date
        .into_iter()
        .map(|(date, sales)| TimeSales { date, sales })
        .collect()
}

/// Group by `key`, sum sales, sort descending. The sort is stable, so
/// equal totals keep the order in which their group was first seen.
fn sum_sales_desc<'a>(
    records: &'a [SalesRecord],
    key: impl Fn(&'a SalesRecord) -> &'a str,
) -> Vec<(&'a str, f64)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, f64)> = Vec::new();

    for record in records {
        match slots.entry(key(record)) {
            Entry::Occupied(slot) => groups[*slot.get()].1 += record.sales,
            Entry::Vacant(slot) => {
                groups.push((*slot.key(), record.sales));
                slot.insert(groups.len() - 1);
            }
        }
    }

    groups.sort_by(|a, b| b.1.total_cmp(&a.1));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32, region: &str, qty: u32, price: f64, cost: f64, order: &str, product: &str) -> SalesRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        SalesRecord::new(date, region, qty, price, cost, order, product)
    }

    fn example() -> Vec<SalesRecord> {
        vec![
            record(1, "NSW", 2, 10.0, 4.0, "o1", "X"),
            record(1, "NSW", 1, 10.0, 4.0, "o1", "Y"),
            record(2, "VIC", 3, 5.0, 2.0, "o2", "X"),
        ]
    }

    #[test]
    fn test_kpis_worked_example() {
        let kpis = compute_kpis(&example());
        assert_eq!(kpis.total_sales, 45.0);
        assert_eq!(kpis.total_profit, 27.0);
        assert_eq!(kpis.total_orders, 2);
    }

    #[test]
    fn test_kpis_empty_are_zero() {
        assert_eq!(compute_kpis(&[]), Kpis::default());
    }

    #[test]
    fn test_profit_consistent_and_order_independent() {
        let mut records = example();
        records.push(record(3, "QLD", 7, 3.25, 1.5, "o3", "Z"));
        let forward = compute_kpis(&records);
        records.reverse();
        let backward = compute_kpis(&records);

        let cost: f64 = records.iter().map(|r| r.cost_total).sum();
        assert!((forward.total_profit - (forward.total_sales - cost)).abs() < 1e-9);
        assert!((forward.total_sales - backward.total_sales).abs() < 1e-9);
        assert!((forward.total_profit - backward.total_profit).abs() < 1e-9);
    }

    #[test]
    fn test_orders_shared_id_counts_once() {
        let mut records: Vec<_> = (0..5).map(|_| record(1, "NSW", 1, 1.0, 0.5, "A", "X")).collect();
        for i in 0..3 {
            records.push(record(1, "NSW", 1, 1.0, 0.5, &format!("u{i}"), "X"));
        }
        assert_eq!(compute_kpis(&records).total_orders, 4);
    }

    #[test]
    fn test_blank_order_id_not_counted() {
        let records = vec![
            record(1, "NSW", 1, 10.0, 4.0, "", "X"),
            record(1, "NSW", 1, 10.0, 4.0, "o1", "X"),
            record(1, "NSW", 1, 10.0, 4.0, "o1", "Y"),
            record(1, "NSW", 1, 10.0, 4.0, "  ", "Y"),
        ];
        let kpis = compute_kpis(&records);
        assert_eq!(kpis.total_orders, 1);
        assert_eq!(kpis.total_sales, 40.0);
    }

    #[test]
    fn test_region_breakdown_sorted_descending() {
        let result = sales_by_region(&example());
        assert_eq!(
            result,
            vec![
                RegionSales { region: "NSW".into(), sales: 30.0 },
                RegionSales { region: "VIC".into(), sales: 15.0 },
            ]
        );
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let records = vec![
            record(1, "QLD", 1, 10.0, 1.0, "o1", "B"),
            record(1, "NSW", 1, 10.0, 1.0, "o2", "A"),
            record(1, "VIC", 1, 20.0, 1.0, "o3", "C"),
        ];
        let regions: Vec<_> = sales_by_region(&records).into_iter().map(|r| r.region).collect();
        assert_eq!(regions, vec!["VIC", "QLD", "NSW"]);

        let products: Vec<_> = sales_by_product(&records).into_iter().map(|p| p.product).collect();
        assert_eq!(products, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_product_breakdown() {
        let result = sales_by_product(&example());
        assert_eq!(result[0], ProductSales { product: "X".into(), sales: 35.0 });
        assert_eq!(result[1], ProductSales { product: "Y".into(), sales: 10.0 });
    }

    #[test]
    fn test_time_series_ascending() {
        let records = vec![
            record(9, "NSW", 1, 4.0, 1.0, "o1", "X"),
            record(2, "NSW", 1, 3.0, 1.0, "o2", "X"),
            record(9, "VIC", 1, 1.0, 1.0, "o3", "X"),
        ];
        let series = sales_over_time(&records);
        assert_eq!(series.len(), 2);
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(series[1].sales, 5.0);
    }

    #[test]
    fn test_breakdowns_empty() {
        assert!(sales_by_region(&[]).is_empty());
        assert!(sales_by_product(&[]).is_empty());
        assert!(sales_over_time(&[]).is_empty());
    }
}
