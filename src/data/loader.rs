use std::path::Path;

use super::model::SalesDataset;
use crate::error::DataLoadError;

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Column names the input table must provide.
const UNITS_COLUMN: &str = "Units_Sold";
const PRICE_COLUMN: &str = "Price";

/// Load the sales table from a CSV file.
///
/// Layout: header row with column names; `Units_Sold` and `Price` must be
/// present and parse as numbers. Any other columns are ignored.
pub fn load_csv(path: &Path) -> Result<SalesDataset, DataLoadError> {
    let file = std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let units_idx = headers
        .iter()
        .position(|h| h == UNITS_COLUMN)
        .ok_or(DataLoadError::MissingColumn(UNITS_COLUMN))?;
    let price_idx = headers
        .iter()
        .position(|h| h == PRICE_COLUMN)
        .ok_or(DataLoadError::MissingColumn(PRICE_COLUMN))?;

    let mut units = Vec::new();
    let mut prices = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        units.push(parse_cell(&record, units_idx, UNITS_COLUMN, row_no)?);
        prices.push(parse_cell(&record, price_idx, PRICE_COLUMN, row_no)?);
    }

    Ok(SalesDataset::from_columns(units, prices))
}

fn parse_cell(
    record: &csv::StringRecord,
    idx: usize,
    column: &'static str,
    row: usize,
) -> Result<f64, DataLoadError> {
    let raw = record.get(idx).unwrap_or("").trim();
    raw.parse::<f64>().map_err(|_| DataLoadError::BadNumber {
        row,
        column,
        value: raw.to_string(),
    })
}
