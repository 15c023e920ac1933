//! Report generation for dashboard data.

use crate::engine::AnalyticsEngine;
use crate::error::{AnalyticsError, Result};
use crate::queries;
use sales_domain::{DashboardFilter, Kpis, ProductSales, RegionSales, TimeSales};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Every dashboard aggregation for one filter, computed from a single load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardReport {
    /// RFC 3339 generation time
    pub generated_at: String,
    /// Filter the report was computed for
    pub filter: DashboardFilter,
    /// Records that survived filtering
    pub rows_analyzed: usize,
    /// Source rows dropped for malformed cells
    pub rows_dropped: usize,
    /// Headline metrics
    pub kpis: Kpis,
    /// Region breakdown, descending
    pub sales_by_region: Vec<RegionSales>,
    /// Product breakdown, descending
    pub sales_by_product: Vec<ProductSales>,
    /// Daily series, ascending
    pub sales_over_time: Vec<TimeSales>,
}

impl AnalyticsEngine {
    /// Generate comprehensive dashboard report.
    ///
    /// # Errors
    ///
    /// Propagates load and schema failures.
    pub fn generate_report(&self, filter: &DashboardFilter) -> Result<DashboardReport> {
        let table = self.prepare(filter)?;

        Ok(DashboardReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            filter: filter.clone(),
            rows_analyzed: table.records.len(),
            rows_dropped: table.dropped_rows,
            kpis: queries::compute_kpis(&table.records),
            sales_by_region: queries::sales_by_region(&table.records),
            sales_by_product: queries::sales_by_product(&table.records),
            sales_over_time: queries::sales_over_time(&table.records),
        })
    }

    /// Generate report as JSON string.
    ///
    /// # Errors
    ///
    /// Propagates load and schema failures, or a serialization failure.
    pub fn generate_report_json(&self, filter: &DashboardFilter) -> Result<String> {
        let report = self.generate_report(filter)?;
        serde_json::to_string_pretty(&report).map_err(|e| AnalyticsError::Conversion(e.to_string()))
    }

    /// Generate Markdown report.
    ///
    /// # Errors
    ///
    /// Propagates load and schema failures.
    pub fn generate_report_markdown(&self, filter: &DashboardFilter) -> Result<String> {
        let report = self.generate_report(filter)?;
        Ok(render_markdown(&report))
    }
}

/// Render a report as Markdown tables.
#[must_use]
pub fn render_markdown(report: &DashboardReport) -> String {
    let mut md = String::new();
    md.push_str("# Sales Command Center Report\n\n");
    let _ = writeln!(md, "**Generated:** {}\n", report.generated_at);
    let _ = writeln!(
        md,
        "**Filter:** region `{}`, {}\n",
        report.filter.region_filter(),
        if report.filter.days == 0 {
            "all time".to_string()
        } else {
            format!("last {} days", report.filter.days)
        }
    );

    md.push_str("## KPIs\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("|--------|-------|\n");
    let _ = writeln!(md, "| Total Sales | ${:.2} |", report.kpis.total_sales);
    let _ = writeln!(md, "| Total Profit | ${:.2} |", report.kpis.total_profit);
    let _ = writeln!(md, "| Total Orders | {} |", report.kpis.total_orders);
    let _ = writeln!(md, "| Rows Analyzed | {} |", report.rows_analyzed);
    if report.rows_dropped > 0 {
        let _ = writeln!(md, "| Rows Dropped | {} |", report.rows_dropped);
    }
    md.push('\n');

    if report.rows_analyzed == 0 {
        md.push_str("_No data for selected filters._\n\n");
    }

    if !report.sales_by_region.is_empty() {
        md.push_str("## Sales by Region\n\n");
        md.push_str("| Rank | Region | Sales |\n");
        md.push_str("|------|--------|-------|\n");
        for (i, row) in report.sales_by_region.iter().enumerate() {
            let _ = writeln!(md, "| {} | {} | ${:.2} |", i + 1, row.region, row.sales);
        }
        md.push('\n');
    }

    if !report.sales_by_product.is_empty() {
        md.push_str("## Sales by Product\n\n");
        md.push_str("| Rank | Product | Sales |\n");
        md.push_str("|------|---------|-------|\n");
        for (i, row) in report.sales_by_product.iter().enumerate() {
            let _ = writeln!(md, "| {} | {} | ${:.2} |", i + 1, row.product, row.sales);
        }
        md.push('\n');
    }

    if !report.sales_over_time.is_empty() {
        md.push_str("## Sales over Time\n\n");
        md.push_str("| Date | Sales |\n");
        md.push_str("|------|-------|\n");
        for point in &report.sales_over_time {
            let _ = writeln!(md, "| {} | ${:.2} |", point.date.format("%Y-%m-%d"), point.sales);
        }
        md.push('\n');
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::CsvTextSource;
    use std::sync::Arc;

    fn engine() -> AnalyticsEngine {
        AnalyticsEngine::new(Arc::new(CsvTextSource::new(
            "date,region,quantity,price,cost,order_id,product\n\
             2024-01-01,NSW,2,10,4,o1,X\n\
             bad-date,NSW,1,10,4,o1,Y\n\
             2024-01-02,VIC,3,5,2,o2,X\n",
        )))
    }

    #[test]
    fn test_report_counts_rows() {
        let report = engine().generate_report(&DashboardFilter::default()).unwrap();
        assert_eq!(report.rows_analyzed, 2);
        assert_eq!(report.rows_dropped, 1);
        assert_eq!(report.kpis.total_sales, 35.0);
        assert_eq!(report.sales_by_region.len(), 2);
    }

    #[test]
    fn test_markdown_generation() {
        let md = engine()
            .generate_report_markdown(&DashboardFilter::new("nsw", 7))
            .unwrap();
        assert!(md.contains("# Sales Command Center Report"));
        assert!(md.contains("region `NSW`, last 7 days"));
        assert!(md.contains("| Total Sales | $20.00 |"));
        assert!(md.contains("| 2024-01-01 | $20.00 |"));
        assert!(md.contains("| Rows Dropped | 1 |"));
    }

    #[test]
    fn test_empty_report_notes_no_data() {
        let md = engine()
            .generate_report_markdown(&DashboardFilter::new("TAS", 0))
            .unwrap();
        assert!(md.contains("_No data for selected filters._"));
        assert!(!md.contains("## Sales by Region"));
    }

    #[test]
    fn test_json_report_uses_iso_dates() {
        let json = engine().generate_report_json(&DashboardFilter::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sales_over_time"][0]["date"], "2024-01-01");
        assert_eq!(value["filter"]["region"], "ALL");
    }
}
