use ndarray::{Array1, Array2, Axis};

use crate::error::ShapeError;

// ---------------------------------------------------------------------------
// Aggregate statistics
// ---------------------------------------------------------------------------

/// Summary statistics for the price column.
#[derive(Debug, Clone, Copy)]
pub struct PriceStats {
    pub mean: f64,
    /// Population standard deviation (divisor N, not N−1).
    pub std_dev: f64,
    /// max − min.
    pub range: f64,
}

pub fn price_stats(prices: &Array1<f64>) -> PriceStats {
    if prices.is_empty() {
        return PriceStats {
            mean: 0.0,
            std_dev: 0.0,
            range: 0.0,
        };
    }
    PriceStats {
        mean: prices.mean().unwrap_or(0.0),
        std_dev: prices.std(0.0),
        range: range(prices),
    }
}

/// max − min; 0 for an empty series.
pub fn range(values: &Array1<f64>) -> f64 {
    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return 0.0;
    };
    let (min, max) = iter.fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    max - min
}

/// Index of the largest value; ties broken by first occurrence.
pub fn argmax(values: &Array1<f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        let replace = match best {
            None => true,
            Some((_, current)) => v > current,
        };
        if replace {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// How many values exceed `threshold` (boolean-mask count).
pub fn count_above(values: &Array1<f64>, threshold: f64) -> usize {
    values.iter().filter(|&&v| v > threshold).count()
}

/// The `n` largest values, sorted descending.
pub fn top_n(values: &Array1<f64>, n: usize) -> Array1<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted.truncate(n);
    Array1::from(sorted)
}

// ---------------------------------------------------------------------------
// Reshape / axis operations
// ---------------------------------------------------------------------------

/// Reinterpret a flat series as a `rows × len/rows` grid in row-major order.
///
/// The record count must be evenly divisible by `rows`; anything else is a
/// hard failure rather than a silent pad or truncate.
pub fn reshape_rows(values: &Array1<f64>, rows: usize) -> Result<Array2<f64>, ShapeError> {
    let len = values.len();
    if rows == 0 || len % rows != 0 {
        return Err(ShapeError { len, rows });
    }
    Array2::from_shape_vec((rows, len / rows), values.to_vec())
        .map_err(|_| ShapeError { len, rows })
}

/// Per-row sums of a 2-D grid.
pub fn row_sums(grid: &Array2<f64>) -> Array1<f64> {
    grid.sum_axis(Axis(1))
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn price_stats_use_population_std() {
        let prices = array![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = price_stats(&prices);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        // Divisor N gives exactly 2.0 for this classic series.
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
        assert!((stats.range - 7.0).abs() < 1e-12);
    }

    #[test]
    fn argmax_prefers_first_occurrence_on_ties() {
        let values = array![1.0, 9.0, 3.0, 9.0];
        assert_eq!(argmax(&values), Some(1));
        assert_eq!(argmax(&Array1::<f64>::zeros(0)), None);
    }

    #[test]
    fn count_above_is_strict() {
        let values = array![1.0, 2.0, 3.0];
        assert_eq!(count_above(&values, 2.0), 1);
    }

    #[test]
    fn top_n_is_descending_and_dominant() {
        let values = array![50.0, 500.0, 150.0, 450.0, 300.0, 400.0, 350.0];
        let top = top_n(&values, 5);
        assert_eq!(top.to_vec(), vec![500.0, 450.0, 400.0, 350.0, 300.0]);
        for w in top.to_vec().windows(2) {
            assert!(w[0] >= w[1]);
        }
        let floor = top[top.len() - 1];
        let excluded = values.iter().filter(|&&v| v < floor).count();
        assert_eq!(excluded, values.len() - top.len());
    }

    #[test]
    fn reshape_rejects_odd_lengths() {
        let values = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let err = reshape_rows(&values, 2).unwrap_err();
        assert_eq!(err.len, 7);
        assert_eq!(err.rows, 2);
        assert!(err.to_string().contains("divisible by 2"));
    }

    #[test]
    fn reshape_round_trips_even_lengths() {
        let values = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let grid = reshape_rows(&values, 2).unwrap();
        assert_eq!(grid.dim(), (2, 3));
        let flat: Vec<f64> = grid.iter().copied().collect();
        assert_eq!(flat, values.to_vec());
    }

    #[test]
    fn transpose_twice_is_identity() {
        let grid = reshape_rows(&array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2).unwrap();
        let twice = grid.t().t().to_owned();
        assert_eq!(twice, grid);
        assert_eq!(grid.t().dim(), (3, 2));
    }

    #[test]
    fn row_sums_follow_the_row_major_split() {
        let units = array![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0];
        let grid = reshape_rows(&units, 2).unwrap();
        let sums = row_sums(&grid);
        assert_eq!(sums.to_vec(), vec![150.0, 400.0]);
    }
}
