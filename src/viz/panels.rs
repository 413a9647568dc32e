use anyhow::{Context, Result};
use ndarray::Array1;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::context::AnalysisContext;

pub(super) type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const CAPTION_FONT: (&str, i32) = ("sans-serif", 22);
const HISTOGRAM_BINS: usize = 6;

// ---------------------------------------------------------------------------
// Panel 1: loop vs. vectorized timing
// ---------------------------------------------------------------------------

pub(super) fn timing_bars(
    area: &Panel<'_>,
    ctx: &AnalysisContext,
    color: RGBColor,
) -> Result<()> {
    let perf = ctx.perf.as_ref().context("timing samples not measured")?;
    let loop_ms = perf.multiply.loop_time.as_secs_f64() * 1e3;
    let vector_ms = perf.multiply.vector_time.as_secs_f64() * 1e3;
    let y_max = loop_ms.max(vector_ms).max(1e-6) * 1.2;

    let mut chart = ChartBuilder::on(area)
        .caption("Elementwise multiply timing", CAPTION_FONT)
        .margin(12)
        .x_label_area_size(28)
        .y_label_area_size(64)
        .build_cartesian_2d(0.0..2.0, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_x_axis()
        .y_desc("time (ms)")
        .draw()?;

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(0.3, 0.0), (0.9, loop_ms)],
            color.mix(0.45).filled(),
        )))?
        .label(format!("loop: {loop_ms:.3} ms"))
        .legend(move |(x, y)| {
            Rectangle::new([(x, y - 4), (x + 12, y + 4)], color.mix(0.45).filled())
        });
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(1.1, 0.0), (1.7, vector_ms)],
            color.filled(),
        )))?
        .label(format!("vectorized: {vector_ms:.3} ms"))
        .legend(move |(x, y)| Rectangle::new([(x, y - 4), (x + 12, y + 4)], color.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Panel 2: revenue histogram
// ---------------------------------------------------------------------------

pub(super) fn revenue_histogram(
    area: &Panel<'_>,
    ctx: &AnalysisContext,
    color: RGBColor,
) -> Result<()> {
    let (mut lo, mut hi) = bounds(&ctx.revenue);
    if hi - lo < f64::EPSILON {
        // Degenerate range: widen so the single bin is still drawable.
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / HISTOGRAM_BINS as f64;
    let mut counts = vec![0usize; HISTOGRAM_BINS];
    for &v in &ctx.revenue {
        let idx = (((v - lo) / width) as usize).min(HISTOGRAM_BINS - 1);
        counts[idx] += 1;
    }
    let y_max = counts.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.2;

    let mut chart = ChartBuilder::on(area)
        .caption("Revenue distribution", CAPTION_FONT)
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(48)
        .build_cartesian_2d(lo..hi, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("revenue ($)")
        .y_desc("products")
        .x_labels(HISTOGRAM_BINS + 1)
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        let x0 = lo + i as f64 * width;
        Rectangle::new([(x0, 0.0), (x0 + width, count as f64)], color.mix(0.7).filled())
    }))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Panel 3: price vs. units scatter
// ---------------------------------------------------------------------------

pub(super) fn price_units_scatter(
    area: &Panel<'_>,
    ctx: &AnalysisContext,
    color: RGBColor,
) -> Result<()> {
    let (x_lo, x_hi) = padded_bounds(&ctx.dataset.prices);
    let (y_lo, y_hi) = padded_bounds(&ctx.dataset.units);

    let mut chart = ChartBuilder::on(area)
        .caption("Price vs. units sold", CAPTION_FONT)
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(56)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("price ($)")
        .y_desc("units sold")
        .draw()?;

    chart.draw_series(
        ctx.dataset
            .prices
            .iter()
            .zip(ctx.dataset.units.iter())
            .map(|(&p, &u)| Circle::new((p, u), 5, color.mix(0.8).filled())),
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Panel 4: top-5 revenue bars
// ---------------------------------------------------------------------------

pub(super) fn top5_bars(area: &Panel<'_>, ctx: &AnalysisContext, color: RGBColor) -> Result<()> {
    let top = &ctx.top5;
    let y_max = top.iter().copied().fold(0.0f64, f64::max).max(1.0) * 1.15;

    let mut chart = ChartBuilder::on(area)
        .caption("Top products by revenue", CAPTION_FONT)
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(64)
        .build_cartesian_2d(0.0..top.len().max(1) as f64, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("rank (0 = best)")
        .y_desc("revenue ($)")
        .x_labels(top.len().max(1))
        .draw()?;

    chart.draw_series(top.iter().enumerate().map(|(i, &v)| {
        Rectangle::new([(i as f64 + 0.2, 0.0), (i as f64 + 0.8, v)], color.filled())
    }))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Axis helpers
// ---------------------------------------------------------------------------

fn bounds(values: &Array1<f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo.is_finite() && hi.is_finite() {
        (lo, hi)
    } else {
        (0.0, 1.0)
    }
}

fn padded_bounds(values: &Array1<f64>) -> (f64, f64) {
    let (lo, hi) = bounds(values);
    let pad = ((hi - lo) * 0.08).max(1.0);
    (lo - pad, hi + pad)
}
