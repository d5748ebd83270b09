// neurastep-core/src/network.rs

//! # Network State
//!
//! [`NetworkState`] owns everything a feed-forward network carries between
//! steps: the topology, one weight matrix and one bias vector per dense
//! layer, the forward caches and the optimizer accumulators.
//!
//! Shapes are fixed at configuration time: `weights[l]` is
//! `fan_in × neuron_count` (with `fan_in` the previous layer's width, or the
//! input size for `l = 0`) and `biases[l]` has `neuron_count` entries. Only
//! the backward engine's update steps and [`NetworkState::replace_parameters`]
//! write the parameters afterwards.

use crate::config::NetworkConfig;
use crate::error::NeuraStepError;
use crate::nn::init::{bias_uniform, xavier_uniform};
use crate::nn::LayerConfig;
use crate::ops::{vec_mat_mul, vector, Matrix};
use crate::optim::OptimizerState;
use log::debug;
use rand::Rng;

/// A wholesale replacement for one layer's weights or biases.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterEdit {
    Weights(Matrix),
    Biases(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkState {
    input_size: usize,
    layer_configs: Vec<LayerConfig>,
    pub(crate) weights: Vec<Matrix>,
    pub(crate) biases: Vec<Vec<f64>>,
    /// Pre-activations, one per processed layer.
    pub(crate) z_cache: Vec<Vec<f64>>,
    /// `a_cache[0]` is the input, then one activation per processed layer.
    pub(crate) a_cache: Vec<Vec<f64>>,
    pub(crate) optimizer_state: OptimizerState,
}

impl NetworkState {
    /// Glorot-initialized network drawing from the thread-local RNG.
    pub fn new(config: &NetworkConfig) -> Result<Self, NeuraStepError> {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    /// Glorot-initialized network drawing from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(config: &NetworkConfig, rng: &mut R) -> Result<Self, NeuraStepError> {
        Self::configure(config, None, None, rng)
    }

    /// Network with fully caller-supplied parameters; no randomness involved.
    pub fn with_parameters(
        config: &NetworkConfig,
        weights: Vec<Matrix>,
        biases: Vec<Vec<f64>>,
    ) -> Result<Self, NeuraStepError> {
        config.validate()?;
        validate_weights(config, &weights)?;
        validate_biases(config, &biases)?;
        debug!(
            "Configured network {} -> {:?} with supplied parameters",
            config.input_size,
            config.layers.iter().map(|l| l.neuron_count).collect::<Vec<_>>()
        );
        Ok(Self::assemble(config, weights, biases))
    }

    /// General configuration routine.
    ///
    /// Supplied weights or biases replace the random initialization and must
    /// match the expected shapes exactly; whatever is not supplied is drawn
    /// from `rng` (weights first, then biases, layer by layer). Optimizer
    /// accumulators always start at zero.
    pub fn configure<R: Rng + ?Sized>(
        config: &NetworkConfig,
        weights: Option<Vec<Matrix>>,
        biases: Option<Vec<Vec<f64>>>,
        rng: &mut R,
    ) -> Result<Self, NeuraStepError> {
        config.validate()?;
        if let Some(w) = &weights {
            validate_weights(config, w)?;
        }
        if let Some(b) = &biases {
            validate_biases(config, b)?;
        }
        let init_mode = match (&weights, &biases) {
            (Some(_), Some(_)) => "supplied",
            (None, None) => "glorot-uniform",
            _ => "mixed",
        };

        let mut drawn_w = Vec::new();
        let mut drawn_b = Vec::new();
        for (rows, cols) in config.weight_shapes() {
            if weights.is_none() {
                drawn_w.push(xavier_uniform(rows, cols, rng));
            }
            if biases.is_none() {
                drawn_b.push(bias_uniform(cols, rng));
            }
        }

        debug!(
            "Configured network {} -> {:?} ({} init)",
            config.input_size,
            config.layers.iter().map(|l| l.neuron_count).collect::<Vec<_>>(),
            init_mode
        );
        Ok(Self::assemble(
            config,
            weights.unwrap_or(drawn_w),
            biases.unwrap_or(drawn_b),
        ))
    }

    fn assemble(config: &NetworkConfig, weights: Vec<Matrix>, biases: Vec<Vec<f64>>) -> Self {
        let optimizer_state = OptimizerState::zeros_like(&weights, &biases);
        NetworkState {
            input_size: config.input_size,
            layer_configs: config.layers.clone(),
            weights,
            biases,
            z_cache: Vec::new(),
            a_cache: Vec::new(),
            optimizer_state,
        }
    }

    pub fn config(&self) -> NetworkConfig {
        NetworkConfig::new(self.input_size, self.layer_configs.clone())
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn layer_configs(&self) -> &[LayerConfig] {
        &self.layer_configs
    }

    pub fn layer_count(&self) -> usize {
        self.layer_configs.len()
    }

    /// Width of the output layer, `None` for a network without layers.
    pub fn output_size(&self) -> Option<usize> {
        self.layer_configs.last().map(|l| l.neuron_count)
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    pub fn biases(&self) -> &[Vec<f64>] {
        &self.biases
    }

    pub fn z_cache(&self) -> &[Vec<f64>] {
        &self.z_cache
    }

    pub fn a_cache(&self) -> &[Vec<f64>] {
        &self.a_cache
    }

    pub fn optimizer_state(&self) -> &OptimizerState {
        &self.optimizer_state
    }

    /// True once every layer of the current sample has been activated.
    pub fn forward_complete(&self) -> bool {
        !self.layer_configs.is_empty() && self.a_cache.len() == self.layer_configs.len() + 1
    }

    /// Output of the last completed forward pass.
    pub fn output(&self) -> Option<&[f64]> {
        if self.forward_complete() {
            self.a_cache.last().map(Vec::as_slice)
        } else {
            None
        }
    }

    /// Forward pass without caching or step records. Same arithmetic as the
    /// step engines, so the result is bit-identical to a drained pass.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>, NeuraStepError> {
        self.check_forward_input(input)?;
        let mut activation = input.to_vec();
        for (l, layer) in self.layer_configs.iter().enumerate() {
            let z = self.pre_activation(l, &activation)?;
            activation = layer.activation.forward(&z);
        }
        Ok(activation)
    }

    /// `z_l = a_{l-1} · W_l + b_l`.
    pub(crate) fn pre_activation(&self, layer: usize, previous: &[f64]) -> Result<Vec<f64>, NeuraStepError> {
        let weighted = vec_mat_mul(previous, &self.weights[layer])?;
        vector::add(&weighted, &self.biases[layer])
    }

    /// Checks run before any forward step is produced.
    pub(crate) fn check_forward_input(&self, input: &[f64]) -> Result<(), NeuraStepError> {
        if self.layer_configs.is_empty() {
            return Err(NeuraStepError::dimension("forward pass (layer count)", 1, 0));
        }
        if input.len() != self.input_size {
            return Err(NeuraStepError::dimension(
                "forward pass input",
                self.input_size,
                input.len(),
            ));
        }
        Ok(())
    }

    /// Drops the previous sample's caches and seeds `a_cache[0]`.
    pub(crate) fn reset_caches(&mut self, input: &[f64]) {
        self.z_cache.clear();
        self.a_cache.clear();
        self.a_cache.push(input.to_vec());
    }

    /// Replaces one layer's weights or biases after checking the shape.
    ///
    /// All optimizer accumulators (and the Adam step counter) are reset to
    /// zero, for every layer.
    pub fn replace_parameters(&mut self, layer: usize, edit: ParameterEdit) -> Result<(), NeuraStepError> {
        if layer >= self.layer_count() {
            return Err(NeuraStepError::IndexOutOfBounds {
                index: layer,
                len: self.layer_count(),
            });
        }
        match edit {
            ParameterEdit::Weights(weights) => {
                let expected = self.weights[layer].shape();
                if weights.shape() != expected {
                    return Err(NeuraStepError::InvalidConfiguration(format!(
                        "weights[{}] must have shape {:?}, got {:?}",
                        layer,
                        expected,
                        weights.shape()
                    )));
                }
                self.weights[layer] = weights;
            }
            ParameterEdit::Biases(biases) => {
                let expected = self.biases[layer].len();
                if biases.len() != expected {
                    return Err(NeuraStepError::InvalidConfiguration(format!(
                        "biases[{}] must have length {}, got {}",
                        layer,
                        expected,
                        biases.len()
                    )));
                }
                self.biases[layer] = biases;
            }
        }
        self.reset_optimizer_state();
        debug!("Replaced parameters of layer {}; optimizer state reset", layer);
        Ok(())
    }

    pub fn reset_optimizer_state(&mut self) {
        self.optimizer_state = OptimizerState::zeros_like(&self.weights, &self.biases);
    }

    pub(crate) fn set_optimizer_state(&mut self, state: OptimizerState) -> Result<(), NeuraStepError> {
        state.validate_against(&self.weights, &self.biases)?;
        self.optimizer_state = state;
        Ok(())
    }
}

fn validate_weights(config: &NetworkConfig, weights: &[Matrix]) -> Result<(), NeuraStepError> {
    let shapes = config.weight_shapes();
    if weights.len() != shapes.len() {
        return Err(NeuraStepError::InvalidConfiguration(format!(
            "expected {} weight matrices, got {}",
            shapes.len(),
            weights.len()
        )));
    }
    for (l, (w, expected)) in weights.iter().zip(shapes).enumerate() {
        if w.shape() != expected {
            return Err(NeuraStepError::InvalidConfiguration(format!(
                "weights[{}] must have shape {:?}, got {:?}",
                l,
                expected,
                w.shape()
            )));
        }
    }
    Ok(())
}

fn validate_biases(config: &NetworkConfig, biases: &[Vec<f64>]) -> Result<(), NeuraStepError> {
    if biases.len() != config.layers.len() {
        return Err(NeuraStepError::InvalidConfiguration(format!(
            "expected {} bias vectors, got {}",
            config.layers.len(),
            biases.len()
        )));
    }
    for (l, (b, layer)) in biases.iter().zip(&config.layers).enumerate() {
        if b.len() != layer.neuron_count {
            return Err(NeuraStepError::InvalidConfiguration(format!(
                "biases[{}] must have length {}, got {}",
                l,
                layer.neuron_count,
                b.len()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "network_test.rs"]
mod tests;
