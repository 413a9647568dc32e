use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use ndarray::Array1;

use crate::context::AnalysisContext;
use crate::persist;
use crate::viz;

/// File name of the text report.
pub const REPORT_FILE: &str = "project_report.txt";

const RULE: &str = "======================================================================";

// ---------------------------------------------------------------------------
// Text report
// ---------------------------------------------------------------------------

/// Render the fixed-order text report from the finished context.
pub fn render(ctx: &AnalysisContext) -> String {
    let mut lines: Vec<String> = vec![
        RULE.to_string(),
        "SALES EXPLORER - PROJECT REPORT".to_string(),
        format!("Generated: {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC")),
        RULE.to_string(),
        format!("Dataset: {} sales records", ctx.dataset.len()),
        format!("Total Revenue: ${:.0}", ctx.total_revenue),
        format!("Average Price: ${:.2}", ctx.price_stats.mean),
        format!("Performance Gain: vectorized {}", max_speedup_text(ctx)),
        format!(
            "High Revenue Products (> ${:.0}): {}",
            ctx.high_revenue_threshold, ctx.high_revenue_count
        ),
        format!("Top Product Revenue: ${:.0}", ctx.top_revenue()),
        RULE.to_string(),
        "TOP 5 PRODUCTS BY REVENUE:".to_string(),
    ];
    for (i, rev) in ctx.top5.iter().enumerate() {
        lines.push(format!("  {}. ${rev:.0}", i + 1));
    }
    if let Some(rt) = &ctx.roundtrip {
        lines.push(RULE.to_string());
        lines.push(format!(
            "Save/Load Verification: {} (original ${:.2}, reloaded ${:.2})",
            if rt.passed { "PASSED" } else { "FAILED" },
            rt.original_sum,
            rt.reloaded_sum
        ));
        lines.push(format!("Archive Entries: {}", rt.archive_entries.join(", ")));
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Write the report under `out_dir`, creating it if absent.
pub fn write(out_dir: &Path, ctx: &AnalysisContext) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let path = out_dir.join(REPORT_FILE);
    std::fs::write(&path, render(ctx)).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn max_speedup_text(ctx: &AnalysisContext) -> String {
    match &ctx.perf {
        Some(samples) => samples.max_speedup().to_string(),
        None => "undefined".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Console summary
// ---------------------------------------------------------------------------

/// Print the console summary. Pure presentation: every value was computed
/// earlier into the context.
pub fn print_summary(out_dir: &Path, ctx: &AnalysisContext) {
    println!("{RULE}");
    println!("SALES EXPLORER - ANALYSIS SUMMARY");
    println!("{RULE}");
    println!("Records loaded:        {}", ctx.dataset.len());
    println!("Total revenue:         ${:.2}", ctx.total_revenue);
    println!("Average price:         ${:.2}", ctx.price_stats.mean);
    println!("Price std deviation:   ${:.2}", ctx.price_stats.std_dev);
    println!("Price range:           ${:.2}", ctx.price_stats.range);
    println!(
        "High-revenue products: {} (> ${:.0})",
        ctx.high_revenue_count, ctx.high_revenue_threshold
    );
    println!("Top product revenue:   ${:.2}", ctx.top_revenue());
    println!("Leading units slice:   {}", fixed(&ctx.leading_units, 0));
    println!("Monthly unit totals:   {}", fixed(&ctx.monthly_units, 0));
    println!(
        "Monthly grid shape:    {:?} -> transposed {:?}",
        ctx.monthly_grid.dim(),
        ctx.transposed_grid.dim()
    );
    if let (Some(&full), Some(&cut)) = (ctx.revenue.get(0), ctx.discounted_revenue.get(0)) {
        println!(
            "Discount broadcast:    ${full:.2} -> ${cut:.2} (factor {:.2})",
            ctx.discount_factor
        );
    }

    println!();
    println!("Array primitives:");
    println!("  zeros:    {}", ctx.showcase.zeros);
    println!("  ones:     {:?} grid of ones", ctx.showcase.ones_grid.dim());
    println!("  stride:   {}", ctx.showcase.stride);
    println!("  linspace: {}", ctx.showcase.linspace);

    if let Some(perf) = &ctx.perf {
        println!();
        println!("Timing (loop | vectorized | speedup):");
        for m in [&perf.multiply, &perf.mean] {
            println!(
                "  {:22} {:>10.4} ms | {:>10.4} ms | {}",
                m.label,
                ms(m.loop_time),
                ms(m.vector_time),
                m.speedup()
            );
        }
    }

    if let Some(rt) = &ctx.roundtrip {
        println!();
        println!(
            "Save/load round-trip:  {} (archive entries: {})",
            if rt.passed { "PASSED" } else { "FAILED" },
            rt.archive_entries.join(", ")
        );
    }

    println!();
    println!("Artifacts under {}:", out_dir.display());
    for name in [
        viz::CHART_FILE,
        persist::REVENUE_NPY,
        persist::UNITS_NPY,
        persist::ARCHIVE_NPZ,
        persist::SUMMARY_CSV,
        REPORT_FILE,
    ] {
        println!("  {name}");
    }
    println!("{RULE}");
}

fn ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1e3
}

fn fixed(values: &Array1<f64>, decimals: usize) -> String {
    let cells: Vec<String> = values
        .iter()
        .map(|v| format!("{v:.prec$}", prec = decimals))
        .collect();
    format!("[{}]", cells.join(", "))
}
