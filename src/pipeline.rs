use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::context::AnalysisContext;
use crate::data::loader;
use crate::perf::{self, Speedup};
use crate::persist;
use crate::report;
use crate::viz;

// ---------------------------------------------------------------------------
// Fixed pipeline parameters
// ---------------------------------------------------------------------------

/// Input table. No fallback dataset exists: a missing file is fatal.
pub const INPUT_FILE: &str = "data/sales_data.csv";
/// Every artifact lands here; created on demand.
pub const OUTPUT_DIR: &str = "outputs";
/// Scalar broadcast factor: a 15% discount.
pub const DISCOUNT_FACTOR: f64 = 0.85;
/// Revenue above this counts as a high-revenue product.
pub const HIGH_REVENUE_THRESHOLD: f64 = 12_000.0;
/// The units column is reinterpreted as one row per month.
pub const MONTHS: usize = 2;
/// Size of the best-sellers list.
pub const TOP_COUNT: usize = 5;

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Run the whole pipeline against the fixed paths.
pub fn run() -> Result<()> {
    run_with(Path::new(INPUT_FILE), Path::new(OUTPUT_DIR))
}

/// Run against explicit paths. Split out so tests can redirect everything
/// into a scratch directory.
pub fn run_with(input: &Path, out_dir: &Path) -> Result<()> {
    info!("loading {}", input.display());
    let dataset =
        loader::load_csv(input).with_context(|| format!("loading {}", input.display()))?;
    info!("loaded {} sales records", dataset.len());

    let mut ctx = AnalysisContext::derive(
        dataset,
        HIGH_REVENUE_THRESHOLD,
        DISCOUNT_FACTOR,
        MONTHS,
        TOP_COUNT,
    )
    .context("deriving analysis values")?;
    info!(
        "derived revenue for {} records, {} above the ${:.0} threshold",
        ctx.dataset.len(),
        ctx.high_revenue_count,
        HIGH_REVENUE_THRESHOLD
    );

    info!("timing loop vs. vectorized operations");
    ctx.set_perf(perf::compare(&ctx.dataset.units, &ctx.dataset.prices));
    if let Some(samples) = &ctx.perf {
        for m in [&samples.multiply, &samples.mean] {
            if m.speedup() == Speedup::Undefined {
                warn!("{}: vectorized time measured as zero; speedup undefined", m.label);
            }
        }
    }

    info!("rendering charts");
    viz::render(out_dir, &ctx)?;

    info!("persisting arrays");
    persist::save_all(out_dir, &ctx)?;

    let roundtrip = persist::verify_roundtrip(out_dir, &ctx)?;
    if !roundtrip.passed {
        warn!(
            "round-trip mismatch: original sum {:.6}, reloaded sum {:.6}",
            roundtrip.original_sum, roundtrip.reloaded_sum
        );
    }
    ctx.set_roundtrip(roundtrip);

    report::write(out_dir, &ctx)?;
    report::print_summary(out_dir, &ctx);
    info!("done; artifacts under {}", out_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use crate::error::{DataLoadError, ShapeError};

    use super::*;

    fn write_scenario_csv(dir: &TempDir, rows: usize) -> PathBuf {
        let path = dir.path().join("sales_data.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "Product,Units_Sold,Price").unwrap();
        for i in 0..rows {
            writeln!(f, "Product {},{},5", i + 1, (i + 1) * 10).unwrap();
        }
        path
    }

    #[test]
    fn end_to_end_run_produces_every_artifact() {
        let dir = TempDir::new().unwrap();
        let input = write_scenario_csv(&dir, 10);
        let out = dir.path().join("outputs");

        run_with(&input, &out).unwrap();

        for name in [
            viz::CHART_FILE,
            persist::REVENUE_NPY,
            persist::UNITS_NPY,
            persist::ARCHIVE_NPZ,
            persist::SUMMARY_CSV,
            report::REPORT_FILE,
        ] {
            assert!(out.join(name).exists(), "missing artifact: {name}");
        }

        // Reload and confirm the scenario numbers survived serialization.
        let revenue = persist::read_npy(&out.join(persist::REVENUE_NPY)).unwrap();
        assert!((revenue.sum() - 2750.0).abs() < 1e-9);
        let top5 = persist::read_archive_entry(&out.join(persist::ARCHIVE_NPZ), "top5").unwrap();
        assert_eq!(top5.to_vec(), vec![500.0, 450.0, 400.0, 350.0, 300.0]);

        let summary = std::fs::read_to_string(out.join(persist::SUMMARY_CSV)).unwrap();
        assert!(summary.starts_with("Units_Sold,Price,Revenue\n10.00,5.00,50.00\n"));

        let report_text = std::fs::read_to_string(out.join(report::REPORT_FILE)).unwrap();
        assert!(report_text.contains("Dataset: 10 sales records"));
        assert!(report_text.contains("Total Revenue: $2750"));
        assert!(report_text.contains("Save/Load Verification: PASSED"));
    }

    #[test]
    fn odd_record_count_aborts_before_any_output() {
        let dir = TempDir::new().unwrap();
        let input = write_scenario_csv(&dir, 7);
        let out = dir.path().join("outputs");

        let err = run_with(&input, &out).unwrap_err();
        let shape = err
            .downcast_ref::<ShapeError>()
            .expect("expected a ShapeError in the chain");
        assert_eq!(shape.len, 7);
        assert_eq!(shape.rows, MONTHS);
        assert!(!out.exists(), "no artifact may be written on a fatal error");
    }

    #[test]
    fn missing_input_file_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("outputs");
        let err = run_with(&dir.path().join("absent.csv"), &out).unwrap_err();
        assert!(err.downcast_ref::<DataLoadError>().is_some());
        assert!(!out.exists());
    }
}
