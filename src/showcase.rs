use ndarray::{Array1, Array2};

// ---------------------------------------------------------------------------
// Array-creation showcase
// ---------------------------------------------------------------------------

/// The four creation primitives demonstrated alongside the analysis. Pure
/// demonstration: none of these touch the loaded data.
#[derive(Debug, Clone)]
pub struct CreationShowcase {
    /// Zero-filled series of length 5.
    pub zeros: Array1<f64>,
    /// 2×3 grid of ones.
    pub ones_grid: Array2<f64>,
    /// Integer strides over [0, 20) with step 3.
    pub stride: Array1<f64>,
    /// 6 evenly spaced points over [0, 100].
    pub linspace: Array1<f64>,
}

impl CreationShowcase {
    pub fn build() -> Self {
        CreationShowcase {
            zeros: Array1::zeros(5),
            ones_grid: Array2::ones((2, 3)),
            stride: Array1::range(0.0, 20.0, 3.0),
            linspace: Array1::linspace(0.0, 100.0, 6),
        }
    }
}
