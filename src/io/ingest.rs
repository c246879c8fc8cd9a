//! CSV ingest.
//!
//! Turns delimited text into a `Dataset`:
//!
//! - header row: every column but the last is a feature name; the last
//!   (output) column name is dropped
//! - data rows: every field but the last is an input, the last is the output
//!
//! Rows are not validated against the header width. A short row simply yields
//! a short input vector, a long one a long input vector.

use std::fs;
use std::path::Path;

use csv::StringRecord;
use log::debug;

use crate::domain::{Dataset, Experiment};
use crate::error::{AppError, ParseError};
use crate::math::Vector;

/// Parse CSV text into a `Dataset`.
pub fn parse_dataset(text: &str) -> Result<Dataset, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = reader.records();

    let header = records.next().ok_or(ParseError::MissingHeader)??;
    let features = feature_names(&header);

    let mut experiments = Vec::new();
    for result in records {
        let record = result?;
        experiments.push(parse_row(&record)?);
    }

    debug!(
        "parsed dataset: {} features, {} experiments",
        features.len(),
        experiments.len()
    );

    Ok(Dataset::new(features, experiments))
}

/// Read and parse a CSV file.
pub fn load_dataset(path: &Path) -> Result<Dataset, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    let dataset = parse_dataset(&text)
        .map_err(|e| AppError::new(2, format!("Failed to parse CSV '{}': {e}", path.display())))?;
    Ok(dataset)
}

fn feature_names(header: &StringRecord) -> Vec<String> {
    let n = header.len().saturating_sub(1);
    header
        .iter()
        .take(n)
        .map(normalize_header_name)
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn parse_row(record: &StringRecord) -> Result<Experiment, ParseError> {
    let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
    let n = record.len();

    let mut inputs = Vector::with_capacity(n.saturating_sub(1));
    let mut output = 0.0;
    for (idx, field) in record.iter().enumerate() {
        let value = parse_f64(field).ok_or_else(|| ParseError::InvalidNumber {
            line,
            column: idx + 1,
            value: field.to_string(),
        })?;
        if idx + 1 == n {
            output = value;
        } else {
            inputs.push(value);
        }
    }

    Ok(Experiment::new(inputs, output))
}

fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}
