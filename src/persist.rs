use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use ndarray::{stack, Array1, Axis};
use ndarray_npy::{NpzReader, NpzWriter, ReadNpyExt, WriteNpyExt};

use crate::context::AnalysisContext;

// ---------------------------------------------------------------------------
// Artifact names
// ---------------------------------------------------------------------------

pub const REVENUE_NPY: &str = "revenue.npy";
pub const UNITS_NPY: &str = "units.npy";
pub const ARCHIVE_NPZ: &str = "full_analysis.npz";
pub const SUMMARY_CSV: &str = "sales_summary.csv";

/// Absolute tolerance for the reload comparison. The binary formats are
/// lossless; the tolerance only absorbs floating-point summation order.
const ROUNDTRIP_EPS: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Write every array artifact under `out_dir`, creating it if absent.
pub fn save_all(out_dir: &Path, ctx: &AnalysisContext) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    write_npy(&out_dir.join(REVENUE_NPY), &ctx.revenue)?;
    write_npy(&out_dir.join(UNITS_NPY), &ctx.dataset.units)?;
    write_archive(&out_dir.join(ARCHIVE_NPZ), ctx)?;
    write_summary_csv(&out_dir.join(SUMMARY_CSV), ctx)?;
    Ok(())
}

/// Write a single array to a `.npy` file.
pub fn write_npy(path: &Path, array: &Array1<f64>) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    array
        .write_npy(BufWriter::new(file))
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Read a single `.npy` array back.
pub fn read_npy(path: &Path) -> Result<Array1<f64>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let array = Array1::<f64>::read_npy(BufReader::new(file))
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(array)
}

/// Write the four derived arrays into one `.npz` archive.
fn write_archive(path: &Path, ctx: &AnalysisContext) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut npz = NpzWriter::new(file);
    npz.add_array("units", &ctx.dataset.units)?;
    npz.add_array("prices", &ctx.dataset.prices)?;
    npz.add_array("revenue", &ctx.revenue)?;
    npz.add_array("top5", &ctx.top5)?;
    npz.finish()
        .with_context(|| format!("finishing {}", path.display()))?;
    Ok(())
}

/// Reload a named entry from a `.npz` archive.
pub fn read_archive_entry(path: &Path, name: &str) -> Result<Array1<f64>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut npz = NpzReader::new(file).with_context(|| format!("reading {}", path.display()))?;
    let array: Array1<f64> = npz
        .by_name(&format!("{name}.npy"))
        .with_context(|| format!("archive entry '{name}' in {}", path.display()))?;
    Ok(array)
}

/// Export the column-stacked `(units, prices, revenue)` table as CSV with
/// fixed 2-decimal formatting and no quoting.
fn write_summary_csv(path: &Path, ctx: &AnalysisContext) -> Result<()> {
    let table = stack(
        Axis(1),
        &[
            ctx.dataset.units.view(),
            ctx.dataset.prices.view(),
            ctx.revenue.view(),
        ],
    )
    .context("stacking summary columns")?;

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    writer
        .write_record(["Units_Sold", "Price", "Revenue"])
        .context("writing summary header")?;
    for row in table.rows() {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:.2}")).collect();
        writer.write_record(&cells).context("writing summary row")?;
    }
    writer.flush().context("flushing summary CSV")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Round-trip verification
// ---------------------------------------------------------------------------

/// Outcome of the save/load verification. A mismatch is reported, never
/// raised: drift here is an expected possibility, not an exceptional input.
#[derive(Debug, Clone)]
pub struct RoundTrip {
    pub original_sum: f64,
    pub reloaded_sum: f64,
    /// Entry names found in the archive, suffix stripped.
    pub archive_entries: Vec<String>,
    pub passed: bool,
}

/// Reload the single-array file and the archive; compare revenue sums.
pub fn verify_roundtrip(out_dir: &Path, ctx: &AnalysisContext) -> Result<RoundTrip> {
    let reloaded = read_npy(&out_dir.join(REVENUE_NPY))?;

    let archive_path = out_dir.join(ARCHIVE_NPZ);
    let file = File::open(&archive_path)
        .with_context(|| format!("opening {}", archive_path.display()))?;
    let mut npz =
        NpzReader::new(file).with_context(|| format!("reading {}", archive_path.display()))?;
    let mut archive_entries: Vec<String> = npz
        .names()
        .context("listing archive entries")?
        .into_iter()
        .map(|n| n.trim_end_matches(".npy").to_string())
        .collect();
    archive_entries.sort();
    drop(npz);
    let archived_revenue = read_archive_entry(&archive_path, "revenue")?;

    let original_sum = ctx.revenue.sum();
    let reloaded_sum = reloaded.sum();
    let archived_sum = archived_revenue.sum();
    let passed = (original_sum - reloaded_sum).abs() <= ROUNDTRIP_EPS
        && (original_sum - archived_sum).abs() <= ROUNDTRIP_EPS;

    Ok(RoundTrip {
        original_sum,
        reloaded_sum,
        archive_entries,
        passed,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::data::model::SalesDataset;

    use super::*;

    fn sample_context() -> AnalysisContext {
        let dataset = SalesDataset::from_columns(
            vec![10.0, 20.0, 30.0, 40.0],
            vec![1.5, 2.5, 3.5, 4.5],
        );
        AnalysisContext::derive(dataset, 100.0, 0.85, 2, 5).unwrap()
    }

    #[test]
    fn npy_round_trip_is_exact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("revenue.npy");
        let ctx = sample_context();
        write_npy(&path, &ctx.revenue).unwrap();
        let reloaded = read_npy(&path).unwrap();
        assert_eq!(reloaded, ctx.revenue);
    }

    #[test]
    fn archive_round_trips_every_named_entry() {
        let dir = TempDir::new().unwrap();
        let ctx = sample_context();
        save_all(dir.path(), &ctx).unwrap();

        let archive = dir.path().join(ARCHIVE_NPZ);
        assert_eq!(read_archive_entry(&archive, "units").unwrap(), ctx.dataset.units);
        assert_eq!(read_archive_entry(&archive, "prices").unwrap(), ctx.dataset.prices);
        assert_eq!(read_archive_entry(&archive, "revenue").unwrap(), ctx.revenue);
        assert_eq!(read_archive_entry(&archive, "top5").unwrap(), ctx.top5);
    }

    #[test]
    fn verification_passes_on_a_clean_save() {
        let dir = TempDir::new().unwrap();
        let ctx = sample_context();
        save_all(dir.path(), &ctx).unwrap();
        let outcome = verify_roundtrip(dir.path(), &ctx).unwrap();
        assert!(outcome.passed);
        assert_eq!(
            outcome.archive_entries,
            vec!["prices", "revenue", "top5", "units"]
        );
        assert!((outcome.original_sum - outcome.reloaded_sum).abs() < 1e-12);
    }

    #[test]
    fn summary_csv_has_two_decimal_rows_and_no_quoting() {
        let dir = TempDir::new().unwrap();
        let ctx = sample_context();
        save_all(dir.path(), &ctx).unwrap();

        let text = std::fs::read_to_string(dir.path().join(SUMMARY_CSV)).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Units_Sold,Price,Revenue"));
        assert_eq!(lines.next(), Some("10.00,1.50,15.00"));
        assert!(!text.contains('"'));

        // Reload through the csv reader and compare to 2 decimals.
        let mut reader = csv::Reader::from_path(dir.path().join(SUMMARY_CSV)).unwrap();
        for (i, record) in reader.records().enumerate() {
            let record = record.unwrap();
            let revenue: f64 = record.get(2).unwrap().parse().unwrap();
            assert!((revenue - ctx.revenue[i]).abs() < 0.005 + 1e-12);
        }
    }
}
