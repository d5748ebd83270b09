// neurastep-core/src/nn/activation.rs

//! # Activation Functions
//!
//! Closed registry of the activations a dense layer can use. Every variant
//! exposes the same capability set: [`Activation::forward`] and
//! [`Activation::derivative`], both vector → vector.
//!
//! `Softmax` is the odd one out: its "derivative" is an all-ones vector. The
//! real Jacobian is only ever consumed through the combined
//! softmax + cross-entropy output delta of the backward engine.

use crate::error::NeuraStepError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inputs beyond this magnitude are pinned to the asymptote of sigmoid/tanh.
pub const SATURATION_LIMIT: f64 = 700.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Sigmoid,
    Relu,
    Tanh,
    Linear,
    Softmax,
}

impl Activation {
    pub const ALL: [Activation; 5] = [
        Activation::Sigmoid,
        Activation::Relu,
        Activation::Tanh,
        Activation::Linear,
        Activation::Softmax,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Activation::Sigmoid => "sigmoid",
            Activation::Relu => "relu",
            Activation::Tanh => "tanh",
            Activation::Linear => "linear",
            Activation::Softmax => "softmax",
        }
    }

    /// Looks an activation up by its registry name.
    pub fn from_name(name: &str) -> Result<Self, NeuraStepError> {
        Activation::ALL
            .iter()
            .copied()
            .find(|a| a.name() == name)
            .ok_or_else(|| NeuraStepError::UnknownFunction(format!("activation '{}'", name)))
    }

    /// `false` only for softmax, whose output element depends on the whole vector.
    pub fn is_elementwise(&self) -> bool {
        !matches!(self, Activation::Softmax)
    }

    pub fn forward(&self, z: &[f64]) -> Vec<f64> {
        match self {
            Activation::Sigmoid => z.iter().map(|&x| sigmoid(x)).collect(),
            Activation::Relu => z.iter().map(|&x| relu(x)).collect(),
            Activation::Tanh => z.iter().map(|&x| tanh(x)).collect(),
            Activation::Linear => z.to_vec(),
            Activation::Softmax => softmax(z),
        }
    }

    /// Derivative evaluated at the pre-activation values `z`.
    pub fn derivative(&self, z: &[f64]) -> Vec<f64> {
        match self {
            Activation::Sigmoid => z
                .iter()
                .map(|&x| {
                    let s = sigmoid(x);
                    s * (1.0 - s)
                })
                .collect(),
            Activation::Relu => z.iter().map(|&x| if x > 0.0 { 1.0 } else { 0.0 }).collect(),
            Activation::Tanh => z.iter().map(|&x| 1.0 - tanh(x).powi(2)).collect(),
            Activation::Linear => vec![1.0; z.len()],
            Activation::Softmax => vec![1.0; z.len()],
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Activation {
    type Err = NeuraStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activation::from_name(s)
    }
}

pub fn sigmoid(x: f64) -> f64 {
    if x < -SATURATION_LIMIT {
        return 0.0;
    }
    if x > SATURATION_LIMIT {
        return 1.0;
    }
    1.0 / (1.0 + (-x).exp())
}

pub fn relu(x: f64) -> f64 {
    if x > 0.0 {
        x
    } else {
        0.0
    }
}

pub fn tanh(x: f64) -> f64 {
    if x < -SATURATION_LIMIT {
        return -1.0;
    }
    if x > SATURATION_LIMIT {
        return 1.0;
    }
    x.tanh()
}

/// Numerically stable softmax (the max is subtracted before exponentiating).
///
/// Degenerate inputs: an empty slice gives an empty vector, an infinite
/// maximum collapses to a one-hot vector at the first maximum, and an
/// all `-inf` input gives the uniform distribution.
pub fn softmax(z: &[f64]) -> Vec<f64> {
    if z.is_empty() {
        return Vec::new();
    }
    let max = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::INFINITY {
        let hot = z.iter().position(|&x| x == max).unwrap_or(0);
        return (0..z.len()).map(|i| if i == hot { 1.0 } else { 0.0 }).collect();
    }
    let uniform = 1.0 / z.len() as f64;
    if max == f64::NEG_INFINITY {
        return vec![uniform; z.len()];
    }
    let exps: Vec<f64> = z.iter().map(|&x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    if sum == 0.0 {
        return vec![uniform; z.len()];
    }
    exps.iter().map(|e| e / sum).collect()
}

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
