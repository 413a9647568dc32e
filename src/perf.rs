use std::fmt;
use std::time::{Duration, Instant};

use ndarray::Array1;

// ---------------------------------------------------------------------------
// Loop vs. vectorized timing
// ---------------------------------------------------------------------------

/// Ratio of loop time to vectorized time.
///
/// A vectorized run can measure as exactly zero on a coarse clock; that case
/// is carried as `Undefined` instead of dividing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Speedup {
    Factor(f64),
    Undefined,
}

impl Speedup {
    pub fn from_times(loop_time: Duration, vector_time: Duration) -> Self {
        let denominator = vector_time.as_secs_f64();
        if denominator == 0.0 {
            Speedup::Undefined
        } else {
            Speedup::Factor(loop_time.as_secs_f64() / denominator)
        }
    }
}

impl fmt::Display for Speedup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speedup::Factor(x) => write!(f, "{x:.1}x"),
            Speedup::Undefined => write!(f, "undefined"),
        }
    }
}

/// One timed operation, both implementations.
#[derive(Debug, Clone)]
pub struct Measurement {
    pub label: &'static str,
    pub loop_time: Duration,
    pub vector_time: Duration,
}

impl Measurement {
    pub fn speedup(&self) -> Speedup {
        Speedup::from_times(self.loop_time, self.vector_time)
    }
}

/// Timing samples for the two compared operations.
#[derive(Debug, Clone)]
pub struct PerfSamples {
    pub multiply: Measurement,
    pub mean: Measurement,
}

impl PerfSamples {
    /// Largest defined speedup; `Undefined` when neither run produced one.
    pub fn max_speedup(&self) -> Speedup {
        [self.multiply.speedup(), self.mean.speedup()]
            .into_iter()
            .filter_map(|s| match s {
                Speedup::Factor(x) => Some(x),
                Speedup::Undefined => None,
            })
            .fold(None, |best: Option<f64>, x| {
                Some(best.map_or(x, |b| b.max(x)))
            })
            .map_or(Speedup::Undefined, Speedup::Factor)
    }
}

/// Time elementwise multiply and arithmetic mean, each as an explicit loop
/// over plain slices and as a vectorized array operation.
pub fn compare(units: &Array1<f64>, prices: &Array1<f64>) -> PerfSamples {
    let plain_units = units.to_vec();
    let plain_prices = prices.to_vec();

    let start = Instant::now();
    let loop_product = multiply_loop(&plain_units, &plain_prices);
    let loop_multiply_time = start.elapsed();

    let start = Instant::now();
    let vector_product = units * prices;
    let vector_multiply_time = start.elapsed();

    // The two implementations must agree, or the comparison is meaningless.
    log::debug!(
        "multiply consistency: loop sum {:.3}, vectorized sum {:.3}",
        loop_product.iter().sum::<f64>(),
        vector_product.sum()
    );

    let start = Instant::now();
    let loop_mean = mean_loop(&plain_units);
    let loop_mean_time = start.elapsed();

    let start = Instant::now();
    let vector_mean = units.mean().unwrap_or(0.0);
    let vector_mean_time = start.elapsed();

    log::debug!("mean consistency: loop {loop_mean:.6}, vectorized {vector_mean:.6}");

    PerfSamples {
        multiply: Measurement {
            label: "elementwise multiply",
            loop_time: loop_multiply_time,
            vector_time: vector_multiply_time,
        },
        mean: Measurement {
            label: "arithmetic mean",
            loop_time: loop_mean_time,
            vector_time: vector_mean_time,
        },
    }
}

/// Pairwise product via an explicit indexed loop.
fn multiply_loop(a: &[f64], b: &[f64]) -> Vec<f64> {
    let len = a.len().min(b.len());
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        out.push(a[i] * b[i]);
    }
    out
}

/// Accumulate-and-divide mean.
fn mean_loop(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut acc = 0.0;
    for &v in values {
        acc += v;
    }
    acc / values.len() as f64
}
