// neurastep-data/src/parsing/csv.rs

use super::TargetEncoding;
use crate::datasets::VecDataset;
use ::csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};
use neurastep_core::{NeuraStepError, Sample};
use std::path::Path;

/// Reads a CSV file: one header line, then rows of `input_size` inputs
/// followed by the target columns. Fields may be quoted.
///
/// Rows that are too short, hold a non-number, or carry a target
/// `encoding` rejects are skipped with a warning. Blank lines are ignored.
///
/// # Errors
/// `IoError` when the file cannot be read.
pub fn load_csv<P: AsRef<Path>>(
    path: P,
    input_size: usize,
    encoding: TargetEncoding,
) -> Result<VecDataset<Sample>, NeuraStepError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let dataset = read_csv_str(&content, input_size, encoding)?;
    info!("{} samples loaded from {}", dataset.as_slice().len(), path.as_ref().display());
    Ok(dataset)
}

/// [`load_csv`] on in-memory text.
pub fn read_csv_str(
    content: &str,
    input_size: usize,
    encoding: TargetEncoding,
) -> Result<VecDataset<Sample>, NeuraStepError> {
    if input_size == 0 {
        return Err(NeuraStepError::InvalidConfiguration(
            "CSV input size must be at least 1".to_string(),
        ));
    }
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());
    let header = reader
        .headers()
        .map_err(|e| NeuraStepError::IoError(format!("CSV header: {}", e)))?;
    debug!("CSV header: {:?}", header);

    let mut samples = Vec::new();
    let mut skipped = 0usize;
    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let parsed = result
            .map_err(|e| NeuraStepError::InvalidConfiguration(e.to_string()))
            .and_then(|record| parse_record(&record, row, input_size, encoding));
        match parsed {
            Ok(sample) => samples.push(sample),
            Err(e) => {
                warn!("CSV row {}: {}, skipped", row, e);
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        debug!("{} CSV rows skipped", skipped);
    }
    Ok(VecDataset::new(samples))
}

fn parse_record(
    record: &StringRecord,
    row: usize,
    input_size: usize,
    encoding: TargetEncoding,
) -> Result<Sample, NeuraStepError> {
    if record.len() < input_size + 1 {
        return Err(NeuraStepError::dimension(
            &format!("CSV row {} (columns)", row),
            input_size + 1,
            record.len(),
        ));
    }
    let values = record
        .iter()
        .map(|field| {
            field.parse::<f64>().map_err(|_| {
                NeuraStepError::InvalidConfiguration(format!("'{}' is not a number", field))
            })
        })
        .collect::<Result<Vec<f64>, _>>()?;
    let (input, raw_target) = values.split_at(input_size);
    Ok(Sample::new(input.to_vec(), encoding.encode(raw_target)?))
}

#[cfg(test)]
#[path = "csv_test.rs"]
mod tests;
