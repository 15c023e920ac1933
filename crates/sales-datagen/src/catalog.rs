//! Product catalog used for generated line items.

/// A sellable product with its list price and unit cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Product {
    pub name: &'static str,
    pub unit_price: f64,
    pub unit_cost: f64,
}

impl Product {
    const fn new(name: &'static str, unit_price: f64, unit_cost: f64) -> Self {
        Self {
            name,
            unit_price,
            unit_cost,
        }
    }

    /// Gross margin as a fraction of list price.
    pub fn margin(&self) -> f64 {
        (self.unit_price - self.unit_cost) / self.unit_price
    }
}

/// Every unit cost sits at least 30% under list price, so price jitter
/// never pushes a sale below cost.
pub const CATALOG: [Product; 8] = [
    Product::new("Laptop", 1299.00, 899.00),
    Product::new("Monitor", 329.00, 215.00),
    Product::new("Keyboard", 89.00, 41.00),
    Product::new("Mouse", 39.00, 17.50),
    Product::new("Headset", 149.00, 82.00),
    Product::new("Webcam", 119.00, 64.00),
    Product::new("Dock", 249.00, 158.00),
    Product::new("Cable", 19.00, 6.20),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_margins() {
        for product in CATALOG {
            assert!(product.margin() >= 0.3, "{} margin too thin", product.name);
        }
    }

    #[test]
    fn test_catalog_names_unique() {
        let mut names: Vec<_> = CATALOG.iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CATALOG.len());
    }
}
