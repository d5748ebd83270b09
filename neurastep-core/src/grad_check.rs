// neurastep-core/src/grad_check.rs

//! Numerical gradient checking.
//!
//! Compares the gradients the backward engine would apply with central
//! finite differences of [`Loss::compute`]:
//! `(L(θ + ε) - L(θ - ε)) / 2ε` for every weight and bias.

use crate::config::Granularity;
use crate::engine::{analytical_gradients, ForwardPass, StepEngine};
use crate::error::NeuraStepError;
use crate::network::NetworkState;
use crate::nn::Loss;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient mismatch in layer {layer} for {parameter}: analytical {analytical}, numerical {numerical} (difference {difference})")]
    GradientMismatch {
        layer: usize,
        parameter: String,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },

    #[error(transparent)]
    Engine(#[from] NeuraStepError),
}

/// One analytical/numerical pair.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientComparison {
    pub layer: usize,
    /// `W[row][col]` or `b[index]`.
    pub parameter: String,
    pub analytical: f64,
    pub numerical: f64,
}

impl GradientComparison {
    pub fn difference(&self) -> f64 {
        (self.analytical - self.numerical).abs()
    }

    /// Absolute tolerance for small gradients, relative for large ones.
    pub fn within(&self, tolerance: f64) -> bool {
        let scale = self.analytical.abs().max(self.numerical.abs()).max(1.0);
        self.difference() <= tolerance * scale
    }
}

/// Every weight and bias gradient of `network` for one sample, analytical
/// next to numerical. `network` itself is left untouched.
pub fn compare_gradients(
    network: &NetworkState,
    input: &[f64],
    target: &[f64],
    loss: Loss,
    epsilon: f64,
) -> Result<Vec<GradientComparison>, NeuraStepError> {
    let mut probe = network.clone();
    ForwardPass::new(&probe, input.to_vec(), Granularity::Coarse)?.drain(&mut probe)?;
    let analytical = analytical_gradients(&probe, target, loss)?;

    let loss_at = |net: &NetworkState| -> Result<f64, NeuraStepError> {
        loss.compute(target, &net.predict(input)?)
    };

    let mut comparisons = Vec::new();
    for (l, grads) in analytical.iter().enumerate() {
        let (rows, cols) = grads.weights.shape();
        for r in 0..rows {
            for c in 0..cols {
                let original = probe.weights[l][(r, c)];
                probe.weights[l][(r, c)] = original + epsilon;
                let plus = loss_at(&probe)?;
                probe.weights[l][(r, c)] = original - epsilon;
                let minus = loss_at(&probe)?;
                probe.weights[l][(r, c)] = original;
                comparisons.push(GradientComparison {
                    layer: l,
                    parameter: format!("W[{}][{}]", r, c),
                    analytical: grads.weights[(r, c)],
                    numerical: (plus - minus) / (2.0 * epsilon),
                });
            }
        }
        for (i, &g) in grads.biases.iter().enumerate() {
            let original = probe.biases[l][i];
            probe.biases[l][i] = original + epsilon;
            let plus = loss_at(&probe)?;
            probe.biases[l][i] = original - epsilon;
            let minus = loss_at(&probe)?;
            probe.biases[l][i] = original;
            comparisons.push(GradientComparison {
                layer: l,
                parameter: format!("b[{}]", i),
                analytical: g,
                numerical: (plus - minus) / (2.0 * epsilon),
            });
        }
    }
    Ok(comparisons)
}

/// Fails on the first gradient outside `tolerance`.
pub fn check_network_gradients(
    network: &NetworkState,
    input: &[f64],
    target: &[f64],
    loss: Loss,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError> {
    for cmp in compare_gradients(network, input, target, loss, epsilon)? {
        if !cmp.within(tolerance) {
            return Err(GradCheckError::GradientMismatch {
                layer: cmp.layer,
                difference: cmp.difference(),
                parameter: cmp.parameter,
                analytical: cmp.analytical,
                numerical: cmp.numerical,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
