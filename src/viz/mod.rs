//! Chart rendering: one PNG with four panels.
//!
//! Layout:
//! ```text
//! ┌─────────────┬─────────────┐
//! │ timing bars │ revenue     │
//! │             │ histogram   │
//! ├─────────────┼─────────────┤
//! │ price/units │ top-5       │
//! │ scatter     │ bars        │
//! └─────────────┴─────────────┘
//! ```

mod panels;

use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;

use crate::color::generate_palette;
use crate::context::AnalysisContext;

/// File name of the rendered chart.
pub const CHART_FILE: &str = "complete_analysis.png";

const CANVAS: (u32, u32) = (1400, 1000);

/// Render the 2×2 analysis panel into `out_dir`, creating it if absent.
pub fn render(out_dir: &Path, ctx: &AnalysisContext) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let path = out_dir.join(CHART_FILE);

    let root = BitMapBackend::new(&path, CANVAS).into_drawing_area();
    root.fill(&WHITE).context("clearing canvas")?;

    let colors = generate_palette(4);
    let areas = root.split_evenly((2, 2));

    panels::timing_bars(&areas[0], ctx, colors[0])?;
    panels::revenue_histogram(&areas[1], ctx, colors[1])?;
    panels::price_units_scatter(&areas[2], ctx, colors[2])?;
    panels::top5_bars(&areas[3], ctx, colors[3])?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
