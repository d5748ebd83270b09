// neurastep-data/src/parsing/target.rs

use neurastep_core::{Loss, NeuraStepError};
use serde::{Deserialize, Serialize};

/// How target rows are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetEncoding {
    /// Exactly this many values, taken as-is.
    Raw(usize),
    /// One-hot over this many classes. A row is either a single class
    /// index (`2`) or the full one-hot row (`0,0,1`).
    OneHot(usize),
}

impl TargetEncoding {
    /// One-hot for cross-entropy, raw otherwise.
    pub fn for_loss(loss: Loss, output_size: usize) -> Self {
        match loss {
            Loss::CrossEntropy => TargetEncoding::OneHot(output_size),
            _ => TargetEncoding::Raw(output_size),
        }
    }

    pub fn width(&self) -> usize {
        match *self {
            TargetEncoding::Raw(n) | TargetEncoding::OneHot(n) => n,
        }
    }

    pub fn encode(&self, values: &[f64]) -> Result<Vec<f64>, NeuraStepError> {
        match *self {
            TargetEncoding::Raw(width) => {
                if values.len() != width {
                    return Err(NeuraStepError::dimension("target row", width, values.len()));
                }
                Ok(values.to_vec())
            }
            TargetEncoding::OneHot(0) => Err(NeuraStepError::InvalidConfiguration(
                "one-hot targets need at least one class".to_string(),
            )),
            TargetEncoding::OneHot(classes) => match values {
                [index] if index.fract() == 0.0 && *index >= 0.0 && *index < classes as f64 => {
                    let mut row = vec![0.0; classes];
                    row[*index as usize] = 1.0;
                    Ok(row)
                }
                _ if values.len() == classes => Ok(values.to_vec()),
                _ => Err(NeuraStepError::InvalidConfiguration(format!(
                    "expected a class index below {} or a {}-value one-hot row, got {:?}",
                    classes, classes, values
                ))),
            },
        }
    }
}
