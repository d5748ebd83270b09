// neurastep-core/src/nn/loss.rs

use crate::error::NeuraStepError;
use crate::ops::vector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower bound applied to predictions before taking the log in cross-entropy.
pub const CROSS_ENTROPY_EPSILON: f64 = 1e-12;

/// Closed registry of loss functions.
///
/// Both the value (`compute`) and the gradient used by the generic backward
/// path (`gradient`) take `(target, prediction)` in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Loss {
    #[default]
    MeanSquaredError,
    CrossEntropy,
}

impl Loss {
    pub const ALL: [Loss; 2] = [Loss::MeanSquaredError, Loss::CrossEntropy];

    pub fn name(&self) -> &'static str {
        match self {
            Loss::MeanSquaredError => "mean_squared_error",
            Loss::CrossEntropy => "cross_entropy",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, NeuraStepError> {
        Loss::ALL
            .iter()
            .copied()
            .find(|l| l.name() == name)
            .ok_or_else(|| NeuraStepError::UnknownFunction(format!("loss '{}'", name)))
    }

    /// Loss value for one sample.
    ///
    /// * MSE: `0.5 * mean((ŷ - y)²)`
    /// * cross-entropy: `-Σ yᵢ · ln(max(ŷᵢ, 1e-12))`
    pub fn compute(&self, target: &[f64], prediction: &[f64]) -> Result<f64, NeuraStepError> {
        if target.len() != prediction.len() {
            return Err(NeuraStepError::dimension(
                self.name(),
                target.len(),
                prediction.len(),
            ));
        }
        if target.is_empty() {
            return Ok(0.0);
        }
        let value = match self {
            Loss::MeanSquaredError => {
                let squared: f64 = target
                    .iter()
                    .zip(prediction)
                    .map(|(y, p)| (y - p).powi(2))
                    .sum();
                0.5 * squared / target.len() as f64
            }
            Loss::CrossEntropy => {
                let mut loss = 0.0;
                for (y, p) in target.iter().zip(prediction) {
                    loss -= y * p.max(CROSS_ENTROPY_EPSILON).ln();
                }
                loss
            }
        };
        Ok(value)
    }

    /// Gradient consumed by the generic `loss_gradient ⊙ f'(z)` output delta.
    ///
    /// * MSE: `(ŷ - y) / n`, i.e. ∂L/∂ŷ.
    /// * cross-entropy: `ŷ - y`. This is ∂L/∂z for a softmax output, NOT ∂L/∂ŷ;
    ///   it is only correct through the combined softmax shortcut.
    pub fn gradient(&self, target: &[f64], prediction: &[f64]) -> Result<Vec<f64>, NeuraStepError> {
        match self {
            Loss::MeanSquaredError => {
                let diff = vector::sub(prediction, target)?;
                let n = target.len() as f64;
                Ok(diff.iter().map(|d| d / n).collect())
            }
            Loss::CrossEntropy => vector::sub(prediction, target),
        }
    }
}

impl fmt::Display for Loss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Loss {
    type Err = NeuraStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Loss::from_name(s)
    }
}

#[cfg(test)]
#[path = "loss_test.rs"]
mod tests;
