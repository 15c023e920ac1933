//! Analytics engine: the pipeline plus one aggregation per operation.

use crate::error::Result;
use crate::pipeline::{self, PreparedTable};
use crate::queries;
use crate::source::{CsvFileSource, SalesSource};
use sales_domain::{DashboardFilter, Kpis, ProductSales, RegionSales, TimeSales};
use std::path::Path;
use std::sync::Arc;

/// Stateless front door for dashboard queries.
///
/// Every operation reloads the source, so the engine can be shared freely
/// between concurrent callers.
#[derive(Clone)]
pub struct AnalyticsEngine {
    source: Arc<dyn SalesSource>,
}

impl AnalyticsEngine {
    /// Create an engine over any source.
    pub fn new(source: Arc<dyn SalesSource>) -> Self {
        Self { source }
    }

    /// Create an engine over a CSV file.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Self {
        Self::new(Arc::new(CsvFileSource::new(path)))
    }

    /// Location of the backing store.
    #[must_use]
    pub fn source_location(&self) -> String {
        self.source.location()
    }

    /// Run the preparation pipeline only.
    ///
    /// # Errors
    ///
    /// Propagates load and schema failures from [`pipeline::prepare`].
    pub fn prepare(&self, filter: &DashboardFilter) -> Result<PreparedTable> {
        pipeline::prepare(self.source.as_ref(), filter)
    }

    /// Total sales, total profit and distinct order count.
    ///
    /// # Errors
    ///
    /// Propagates load and schema failures.
    pub fn kpis(&self, filter: &DashboardFilter) -> Result<Kpis> {
        let table = self.prepare(filter)?;
        Ok(queries::compute_kpis(&table.records))
    }

    /// Sales per region, descending.
    ///
    /// # Errors
    ///
    /// Propagates load and schema failures.
    pub fn sales_by_region(&self, filter: &DashboardFilter) -> Result<Vec<RegionSales>> {
        let table = self.prepare(filter)?;
        Ok(queries::sales_by_region(&table.records))
    }

    /// Sales per product, descending.
    ///
    /// # Errors
    ///
    /// Propagates load and schema failures.
    pub fn sales_by_product(&self, filter: &DashboardFilter) -> Result<Vec<ProductSales>> {
        let table = self.prepare(filter)?;
        Ok(queries::sales_by_product(&table.records))
    }

    /// Sales per day, ascending.
    ///
    /// # Errors
    ///
    /// Propagates load and schema failures.
    pub fn sales_over_time(&self, filter: &DashboardFilter) -> Result<Vec<TimeSales>> {
        let table = self.prepare(filter)?;
        Ok(queries::sales_over_time(&table.records))
    }
}

impl std::fmt::Debug for AnalyticsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsEngine")
            .field("source", &self.source.location())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;
    use crate::source::CsvTextSource;
    use std::io::Write;

    const SAMPLE: &str = "\
date,region,quantity,price,cost,order_id,product
2024-01-01,NSW,2,10,4,o1,X
2024-01-01,NSW,1,10,4,o1,Y
2024-01-02,VIC,3,5,2,o2,X
";

    fn engine(text: &str) -> AnalyticsEngine {
        AnalyticsEngine::new(Arc::new(CsvTextSource::new(text)))
    }

    #[test]
    fn test_worked_example_end_to_end() {
        let engine = engine(SAMPLE);
        let filter = DashboardFilter::default();

        let kpis = engine.kpis(&filter).unwrap();
        assert_eq!(kpis.total_sales, 45.0);
        assert_eq!(kpis.total_profit, 27.0);
        assert_eq!(kpis.total_orders, 2);

        let regions = engine.sales_by_region(&filter).unwrap();
        assert_eq!(regions[0].region, "NSW");
        assert_eq!(regions[0].sales, 30.0);
        assert_eq!(regions[1].region, "VIC");
        assert_eq!(regions[1].sales, 15.0);

        let series = engine.sales_over_time(&filter).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].sales, 30.0);
    }

    #[test]
    fn test_empty_selection_is_not_an_error() {
        let engine = engine(SAMPLE);
        let filter = DashboardFilter::new("QLD", 7);

        assert_eq!(engine.kpis(&filter).unwrap(), Kpis::default());
        assert!(engine.sales_by_region(&filter).unwrap().is_empty());
        assert!(engine.sales_by_product(&filter).unwrap().is_empty());
        assert!(engine.sales_over_time(&filter).unwrap().is_empty());
    }

    #[test]
    fn test_schema_error_propagates_through_every_operation() {
        let engine = engine("date,region,quantity,cost,order_id,product\n");
        let filter = DashboardFilter::default();

        let errors = [
            engine.kpis(&filter).err(),
            engine.sales_by_region(&filter).err(),
            engine.sales_by_product(&filter).err(),
            engine.sales_over_time(&filter).err(),
        ];
        for err in errors {
            match err {
                Some(AnalyticsError::Schema { missing }) => assert_eq!(missing, vec!["price"]),
                other => panic!("expected schema error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_file_is_reread_on_every_call() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{SAMPLE}").unwrap();
        file.flush().unwrap();

        let engine = AnalyticsEngine::from_csv(file.path());
        let filter = DashboardFilter::default();
        assert_eq!(engine.kpis(&filter).unwrap().total_orders, 2);

        writeln!(file, "2024-01-03,QLD,1,1,1,o3,Z").unwrap();
        file.flush().unwrap();
        assert_eq!(engine.kpis(&filter).unwrap().total_orders, 3);
    }

    #[test]
    fn test_missing_file_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let engine = AnalyticsEngine::from_csv(dir.path().join("missing.csv"));
        let err = engine.sales_by_product(&DashboardFilter::default()).unwrap_err();
        assert!(matches!(err, AnalyticsError::DataUnavailable { .. }));
    }
}
