//! CSV exports.
//!
//! - per-row residuals of a fit, easy to consume in spreadsheets
//! - whole datasets (used by `linreg generate`), in the same layout `ingest`
//!   reads back

use std::io::Write;
use std::path::Path;

use crate::domain::{Dataset, RowResidual};
use crate::error::AppError;

/// Write `row,<features...>,output,fitted,residual` for every experiment.
pub fn write_residuals_csv(
    path: &Path,
    features: &[String],
    residuals: &[RowResidual],
) -> Result<(), AppError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    let mut header = vec!["row".to_string()];
    header.extend(features.iter().cloned());
    header.extend(["output", "fitted", "residual"].map(str::to_string));
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in residuals {
        let mut record = vec![r.row.to_string()];
        record.extend(r.experiment.inputs.iter().map(|v| v.to_string()));
        record.push(r.experiment.output.to_string());
        record.push(r.fitted.to_string());
        record.push(r.residual.to_string());
        writer
            .write_record(&record)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write a dataset as `<features...>,<output_name>`.
pub fn write_dataset_csv<W: Write>(out: W, dataset: &Dataset, output_name: &str) -> Result<(), AppError> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);

    let mut header: Vec<String> = dataset.features().to_vec();
    header.push(output_name.to_string());
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write dataset header: {e}")))?;

    for e in dataset {
        let mut record: Vec<String> = e.inputs.iter().map(|v| v.to_string()).collect();
        record.push(e.output.to_string());
        writer
            .write_record(&record)
            .map_err(|e| AppError::new(2, format!("Failed to write dataset row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush dataset CSV: {e}")))?;
    Ok(())
}
