// neurastep-data/src/parsing/text.rs

use super::{parse_values, TargetEncoding};
use neurastep_core::{NeuraStepError, Sample};

fn rows(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split(';')
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| (i + 1, line))
}

/// Parses `"1,2;3,4"` into rows of exactly `width` values. Blank rows are
/// ignored.
///
/// # Errors
/// `InvalidConfiguration` for a value that is not a number,
/// `DimensionMismatch` for a row of the wrong length.
pub fn parse_samples(text: &str, width: usize) -> Result<Vec<Vec<f64>>, NeuraStepError> {
    rows(text)
        .map(|(n, line)| {
            let values = parse_values(line, n)?;
            if values.len() != width {
                return Err(NeuraStepError::dimension(
                    &format!("inline row {}", n),
                    width,
                    values.len(),
                ));
            }
            Ok(values)
        })
        .collect()
}

/// Like [`parse_samples`], with each row run through `encoding`.
pub fn parse_targets(text: &str, encoding: TargetEncoding) -> Result<Vec<Vec<f64>>, NeuraStepError> {
    rows(text)
        .map(|(n, line)| encoding.encode(&parse_values(line, n)?))
        .collect()
}

pub fn zip_samples(inputs: Vec<Vec<f64>>, targets: Vec<Vec<f64>>) -> Result<Vec<Sample>, NeuraStepError> {
    if inputs.len() != targets.len() {
        return Err(NeuraStepError::dimension("inline samples (targets)", inputs.len(), targets.len()));
    }
    Ok(inputs
        .into_iter()
        .zip(targets)
        .map(|(input, target)| Sample::new(input, target))
        .collect())
}

#[cfg(test)]
#[path = "text_test.rs"]
mod tests;
