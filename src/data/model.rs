use ndarray::Array1;

// ---------------------------------------------------------------------------
// SalesDataset – the loaded input table
// ---------------------------------------------------------------------------

/// The two numeric columns of the input table. The row count is fixed at
/// load time; nothing mutates the columns afterwards.
#[derive(Debug, Clone)]
pub struct SalesDataset {
    /// Units sold per product.
    pub units: Array1<f64>,
    /// Unit price per product – same length as `units`.
    pub prices: Array1<f64>,
}

impl SalesDataset {
    /// Build a dataset from parallel column vectors.
    pub fn from_columns(units: Vec<f64>, prices: Vec<f64>) -> Self {
        debug_assert_eq!(units.len(), prices.len());
        SalesDataset {
            units: Array1::from(units),
            prices: Array1::from(prices),
        }
    }

    /// Number of sales records.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Elementwise revenue: `units[i] * prices[i]`.
    pub fn revenue(&self) -> Array1<f64> {
        &self.units * &self.prices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revenue_is_elementwise_product() {
        let ds = SalesDataset::from_columns(vec![2.0, 3.0, 4.0], vec![10.0, 0.5, 100.0]);
        let revenue = ds.revenue();
        for i in 0..ds.len() {
            assert!((revenue[i] - ds.units[i] * ds.prices[i]).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn empty_dataset_reports_empty() {
        let ds = SalesDataset::from_columns(Vec::new(), Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.revenue().len(), 0);
    }
}
