//! Turning text into samples.
//!
//! Two sources: inline text where rows are separated by `;` and values by
//! `,` (`"0,0;0,1;1,0;1,1"`), and CSV files with a header line where each
//! row holds the inputs followed by the target.

pub mod csv;
pub mod target;
pub mod text;

pub use self::csv::{load_csv, read_csv_str};
pub use target::TargetEncoding;
pub use text::{parse_samples, parse_targets, zip_samples};

use neurastep_core::NeuraStepError;

pub(crate) fn parse_values(line: &str, line_number: usize) -> Result<Vec<f64>, NeuraStepError> {
    line.split(',')
        .map(|v| {
            let v = v.trim();
            v.parse::<f64>().map_err(|_| {
                NeuraStepError::InvalidConfiguration(format!(
                    "line {}: '{}' is not a number",
                    line_number, v
                ))
            })
        })
        .collect()
}
