use ndarray::{s, Array1, Array2};

use crate::data::model::SalesDataset;
use crate::data::stats::{self, PriceStats};
use crate::error::ShapeError;
use crate::perf::PerfSamples;
use crate::persist::RoundTrip;
use crate::showcase::CreationShowcase;

// ---------------------------------------------------------------------------
// Analysis context
// ---------------------------------------------------------------------------

/// Everything the pipeline derives from the loaded dataset, computed once
/// and passed explicitly to the presentation and persistence steps.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    pub dataset: SalesDataset,
    pub revenue: Array1<f64>,
    /// Revenue after the scalar discount broadcast.
    pub discounted_revenue: Array1<f64>,
    pub discount_factor: f64,
    /// The largest revenue values, descending.
    pub top5: Array1<f64>,
    pub price_stats: PriceStats,
    pub total_revenue: f64,
    pub high_revenue_threshold: f64,
    /// Count of records with revenue above the threshold (boolean mask).
    pub high_revenue_count: usize,
    /// Index of the largest revenue value; first occurrence wins ties.
    pub top_index: usize,
    /// Leading slice of the units column (slicing demonstration).
    pub leading_units: Array1<f64>,
    /// `units` reinterpreted as one row per month, row-major.
    pub monthly_grid: Array2<f64>,
    /// Per-month unit totals (row sums of the grid).
    pub monthly_units: Array1<f64>,
    /// Axis-swapped view of the monthly grid.
    pub transposed_grid: Array2<f64>,
    pub showcase: CreationShowcase,
    /// Timing samples; filled by the performance step.
    pub perf: Option<PerfSamples>,
    /// Save/load verification outcome; filled after persistence.
    pub roundtrip: Option<RoundTrip>,
}

impl AnalysisContext {
    /// Derive every analytical value from the loaded dataset.
    ///
    /// Fails only on the reshape precondition, before any artifact exists,
    /// so a failing run leaves the output directory untouched.
    pub fn derive(
        dataset: SalesDataset,
        high_revenue_threshold: f64,
        discount_factor: f64,
        months: usize,
        top_count: usize,
    ) -> Result<Self, ShapeError> {
        let revenue = dataset.revenue();
        let discounted_revenue = &revenue * discount_factor;
        let top5 = stats::top_n(&revenue, top_count);
        let price_stats = stats::price_stats(&dataset.prices);
        let total_revenue = revenue.sum();
        let high_revenue_count = stats::count_above(&revenue, high_revenue_threshold);
        let top_index = stats::argmax(&revenue).unwrap_or(0);
        let head = dataset.len().min(5);
        let leading_units = dataset.units.slice(s![..head]).to_owned();

        let monthly_grid = stats::reshape_rows(&dataset.units, months)?;
        let monthly_units = stats::row_sums(&monthly_grid);
        let transposed_grid = monthly_grid.t().to_owned();

        Ok(AnalysisContext {
            dataset,
            revenue,
            discounted_revenue,
            discount_factor,
            top5,
            price_stats,
            total_revenue,
            high_revenue_threshold,
            high_revenue_count,
            top_index,
            leading_units,
            monthly_grid,
            monthly_units,
            transposed_grid,
            showcase: CreationShowcase::build(),
            perf: None,
            roundtrip: None,
        })
    }

    pub fn set_perf(&mut self, samples: PerfSamples) {
        self.perf = Some(samples);
    }

    pub fn set_roundtrip(&mut self, outcome: RoundTrip) {
        self.roundtrip = Some(outcome);
    }

    /// Revenue of the single best product.
    pub fn top_revenue(&self) -> f64 {
        self.revenue.get(self.top_index).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_dataset() -> SalesDataset {
        SalesDataset::from_columns(
            vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0],
            vec![5.0; 10],
        )
    }

    #[test]
    fn scenario_numbers_match_the_contract() {
        let ctx = AnalysisContext::derive(scenario_dataset(), 12_000.0, 0.85, 2, 5).unwrap();
        assert_eq!(ctx.revenue.to_vec()[0], 50.0);
        assert_eq!(ctx.revenue.to_vec()[9], 500.0);
        assert!((ctx.price_stats.mean - 5.0).abs() < 1e-12);
        assert!((ctx.total_revenue - 2750.0).abs() < 1e-9);
        assert_eq!(ctx.top5.to_vec(), vec![500.0, 450.0, 400.0, 350.0, 300.0]);
        assert_eq!(ctx.monthly_units.to_vec(), vec![150.0, 400.0]);
        assert_eq!(ctx.monthly_grid.dim(), (2, 5));
        assert_eq!(ctx.transposed_grid.dim(), (5, 2));
        assert_eq!(ctx.top_index, 9);
        assert_eq!(ctx.leading_units.to_vec(), vec![10.0, 20.0, 30.0, 40.0, 50.0]);
        assert_eq!(ctx.high_revenue_count, 0);
    }

    #[test]
    fn discount_broadcast_preserves_the_sum_ratio() {
        let ctx = AnalysisContext::derive(scenario_dataset(), 12_000.0, 0.85, 2, 5).unwrap();
        let discounted_sum: f64 = ctx.discounted_revenue.sum();
        assert!((ctx.total_revenue - discounted_sum / 0.85).abs() < 1e-9);
    }

    #[test]
    fn odd_record_count_fails_derivation() {
        let dataset = SalesDataset::from_columns(vec![1.0; 7], vec![2.0; 7]);
        let err = AnalysisContext::derive(dataset, 12_000.0, 0.85, 2, 5).unwrap_err();
        assert_eq!(err.len, 7);
    }
}
