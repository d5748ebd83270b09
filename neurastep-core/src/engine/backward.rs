// neurastep-core/src/engine/backward.rs

//! Step-wise backpropagation and parameter update.
//!
//! The arithmetic lives in three pure helpers ([`output_delta`],
//! [`hidden_delta`], [`layer_gradients`]) shared with the gradient checker.
//! [`BackwardPass`] sequences them into steps:
//!
//! 1. one `OutputDelta` step,
//! 2. one `HiddenDelta` step per hidden layer, last to first,
//! 3. for each layer in forward order, a `Gradient` step followed by the
//!    `WeightUpdate` step that applies it,
//! 4. `BackwardComplete`.
//!
//! All deltas are computed from the pre-update weights. Updates land as soon
//! as their step is produced; abandoning the pass keeps them.

use crate::config::TrainingConfig;
use crate::engine::{cache_entry, DeltaMethod, StepEngine, StepRecord};
use crate::error::NeuraStepError;
use crate::network::NetworkState;
use crate::nn::{Activation, Loss};
use crate::ops::{outer, vec_mat_mul, vector, Matrix};
use crate::optim::{LayerGradients, LayerParams, Optimizer};
use log::{debug, trace, warn};

/// Result of the output-layer delta computation.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputDeltaParts {
    pub method: DeltaMethod,
    pub loss_gradient: Option<Vec<f64>>,
    pub activation_derivative: Option<Vec<f64>>,
    pub delta: Vec<f64>,
}

/// Result of one hidden-layer delta computation.
#[derive(Debug, Clone, PartialEq)]
pub struct HiddenDeltaParts {
    pub error_propagated: Vec<f64>,
    pub activation_derivative: Vec<f64>,
    pub delta: Vec<f64>,
}

/// `δ_L`.
///
/// Cross-entropy over a softmax output takes the combined shortcut
/// `a_L - target`. Every other pairing goes through
/// `loss.gradient(target, a_L) ⊙ activation.derivative(z_L)`.
pub fn output_delta(
    activation: Activation,
    loss: Loss,
    target: &[f64],
    output: &[f64],
    z: &[f64],
) -> Result<OutputDeltaParts, NeuraStepError> {
    if loss == Loss::CrossEntropy && activation == Activation::Softmax {
        return Ok(OutputDeltaParts {
            method: DeltaMethod::SoftmaxCrossEntropy,
            loss_gradient: None,
            activation_derivative: None,
            delta: vector::sub(output, target)?,
        });
    }
    let loss_gradient = loss.gradient(target, output)?;
    let derivative = activation.derivative(z);
    let delta = vector::mul(&loss_gradient, &derivative)?;
    Ok(OutputDeltaParts {
        method: DeltaMethod::ChainRule,
        loss_gradient: Some(loss_gradient),
        activation_derivative: Some(derivative),
        delta,
    })
}

/// `δ_l = (δ_{l+1} · W_{l+1}ᵀ) ⊙ f'(z_l)`.
pub fn hidden_delta(
    delta_next: &[f64],
    weights_next: &Matrix,
    activation: Activation,
    z: &[f64],
) -> Result<HiddenDeltaParts, NeuraStepError> {
    let error_propagated = vec_mat_mul(delta_next, &weights_next.transpose())?;
    let activation_derivative = activation.derivative(z);
    let delta = vector::mul(&error_propagated, &activation_derivative)?;
    Ok(HiddenDeltaParts {
        error_propagated,
        activation_derivative,
        delta,
    })
}

/// `grad_W = a_{l-1} ⊗ δ_l`, `grad_b = δ_l`.
pub fn layer_gradients(prev_activation: &[f64], delta: &[f64]) -> LayerGradients {
    LayerGradients {
        weights: outer(prev_activation, delta),
        biases: delta.to_vec(),
    }
}

/// Every layer's gradients for the cached forward pass, without touching
/// the parameters.
pub fn analytical_gradients(
    network: &NetworkState,
    target: &[f64],
    loss: Loss,
) -> Result<Vec<LayerGradients>, NeuraStepError> {
    check_backward_preconditions(network, target)?;
    let deltas = all_deltas(network, target, loss)?;
    deltas
        .iter()
        .enumerate()
        .map(|(l, delta)| Ok(layer_gradients(cache_entry(&network.a_cache, l, "a_cache")?, delta)))
        .collect()
}

fn all_deltas(network: &NetworkState, target: &[f64], loss: Loss) -> Result<Vec<Vec<f64>>, NeuraStepError> {
    let layer_count = network.layer_count();
    let last = layer_count - 1;
    let layers = network.layer_configs();
    let mut deltas = vec![Vec::new(); layer_count];
    deltas[last] = output_delta(
        layers[last].activation,
        loss,
        target,
        cache_entry(&network.a_cache, last + 1, "a_cache")?,
        cache_entry(&network.z_cache, last, "z_cache")?,
    )?
    .delta;
    for l in (0..last).rev() {
        deltas[l] = hidden_delta(
            &deltas[l + 1],
            &network.weights[l + 1],
            layers[l].activation,
            cache_entry(&network.z_cache, l, "z_cache")?,
        )?
        .delta;
    }
    Ok(deltas)
}

/// Logs a warning for loss/output pairings the backward pass handles only
/// approximately. Returns `true` when the pairing is exact.
pub fn check_loss_pairing(output_activation: Activation, loss: Loss) -> bool {
    match (loss, output_activation) {
        (Loss::CrossEntropy, Activation::Softmax) => true,
        (Loss::CrossEntropy, other) => {
            warn!(
                "cross_entropy with a {} output layer: the loss gradient is only valid for softmax outputs",
                other
            );
            false
        }
        (loss, Activation::Softmax) => {
            warn!(
                "{} with a softmax output layer: softmax derivative is treated as all ones",
                loss
            );
            false
        }
        _ => true,
    }
}

fn check_backward_preconditions(network: &NetworkState, target: &[f64]) -> Result<(), NeuraStepError> {
    if !network.forward_complete() {
        return Err(NeuraStepError::SequenceMisuse(
            "backward pass requires a completed forward pass".to_string(),
        ));
    }
    let output_size = network.output_size().unwrap_or(0);
    if target.len() != output_size {
        return Err(NeuraStepError::dimension(
            "backward pass target",
            output_size,
            target.len(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    OutputDelta,
    HiddenDelta { layer: usize },
    Gradient { layer: usize },
    Update { layer: usize },
    Complete,
    Finished,
}

/// Step-wise backward pass over the caches of a completed forward pass.
#[derive(Debug, Clone)]
pub struct BackwardPass {
    target: Vec<f64>,
    config: TrainingConfig,
    cursor: Cursor,
    deltas: Vec<Vec<f64>>,
    pending: Option<LayerGradients>,
}

impl BackwardPass {
    /// Fails with `SequenceMisuse` when the forward caches are incomplete and
    /// with `DimensionMismatch` when the target does not fit the output layer.
    /// Loss/output pairings are not checked here, see [`check_loss_pairing`].
    pub fn new(
        network: &NetworkState,
        target: Vec<f64>,
        config: &TrainingConfig,
    ) -> Result<Self, NeuraStepError> {
        config.validate()?;
        check_backward_preconditions(network, &target)?;
        Ok(BackwardPass {
            target,
            config: *config,
            cursor: Cursor::OutputDelta,
            deltas: vec![Vec::new(); network.layer_count()],
            pending: None,
        })
    }

    pub fn target(&self) -> &[f64] {
        &self.target
    }

    /// The network handed to `advance` must still hold the forward pass this
    /// one was built on.
    fn check_network(&self, network: &NetworkState) -> Result<(), NeuraStepError> {
        check_backward_preconditions(network, &self.target)?;
        if network.layer_count() != self.deltas.len() {
            return Err(NeuraStepError::SequenceMisuse(format!(
                "backward pass was built for {} layers, network has {}",
                self.deltas.len(),
                network.layer_count()
            )));
        }
        Ok(())
    }

    fn step(&mut self, network: &mut NetworkState) -> Result<Option<StepRecord>, NeuraStepError> {
        if self.cursor == Cursor::Finished {
            return Ok(None);
        }
        self.check_network(network)?;
        let layer_count = network.layer_count();
        let record = match self.cursor {
            Cursor::Finished => return Ok(None),
            Cursor::OutputDelta => {
                let last = layer_count - 1;
                if self.config.optimizer.is_adam() {
                    network.optimizer_state.advance_step();
                }
                let output = cache_entry(&network.a_cache, last + 1, "a_cache")?.to_vec();
                let parts = output_delta(
                    network.layer_configs()[last].activation,
                    self.config.loss,
                    &self.target,
                    &output,
                    cache_entry(&network.z_cache, last, "z_cache")?,
                )?;
                self.deltas[last] = parts.delta.clone();
                self.cursor = if last > 0 {
                    Cursor::HiddenDelta { layer: last - 1 }
                } else {
                    Cursor::Gradient { layer: 0 }
                };
                StepRecord::OutputDelta {
                    layer: last,
                    method: parts.method,
                    loss: self.config.loss,
                    target: self.target.clone(),
                    output,
                    loss_gradient: parts.loss_gradient,
                    activation_derivative: parts.activation_derivative,
                    delta: parts.delta,
                }
            }
            Cursor::HiddenDelta { layer } => {
                let delta_next = self.deltas[layer + 1].clone();
                let parts = hidden_delta(
                    &delta_next,
                    &network.weights[layer + 1],
                    network.layer_configs()[layer].activation,
                    cache_entry(&network.z_cache, layer, "z_cache")?,
                )?;
                self.deltas[layer] = parts.delta.clone();
                self.cursor = if layer > 0 {
                    Cursor::HiddenDelta { layer: layer - 1 }
                } else {
                    Cursor::Gradient { layer: 0 }
                };
                StepRecord::HiddenDelta {
                    layer,
                    delta_next,
                    error_propagated: parts.error_propagated,
                    activation_derivative: parts.activation_derivative,
                    delta: parts.delta,
                }
            }
            Cursor::Gradient { layer } => {
                let grads = layer_gradients(cache_entry(&network.a_cache, layer, "a_cache")?, &self.deltas[layer]);
                let record = StepRecord::Gradient {
                    layer,
                    weight_shape: grads.weights.shape(),
                    bias_len: grads.biases.len(),
                    grad_w: grads.weights.clone(),
                    grad_b: grads.biases.clone(),
                };
                self.pending = Some(grads);
                self.cursor = Cursor::Update { layer };
                record
            }
            Cursor::Update { layer } => {
                let grads = self.pending.take().ok_or_else(|| {
                    NeuraStepError::SequenceMisuse(format!("no gradient computed for layer {}", layer))
                })?;
                let params = LayerParams {
                    weights: &mut network.weights[layer],
                    biases: &mut network.biases[layer],
                };
                self.config.optimizer.update_layer(
                    layer,
                    params,
                    &grads,
                    self.config.learning_rate,
                    &mut network.optimizer_state,
                )?;
                self.cursor = if layer + 1 < layer_count {
                    Cursor::Gradient { layer: layer + 1 }
                } else {
                    Cursor::Complete
                };
                StepRecord::WeightUpdate {
                    layer,
                    optimizer: self.config.optimizer,
                    learning_rate: self.config.learning_rate,
                    weights: network.weights[layer].clone(),
                    biases: network.biases[layer].clone(),
                }
            }
            Cursor::Complete => {
                debug!(
                    "Backward pass complete ({}, {}, t = {})",
                    self.config.loss,
                    self.config.optimizer,
                    network.optimizer_state.step_count()
                );
                self.cursor = Cursor::Finished;
                StepRecord::BackwardComplete
            }
        };
        trace!("backward step: {:?}", record);
        Ok(Some(record))
    }
}

impl StepEngine for BackwardPass {
    fn advance(&mut self, network: &mut NetworkState) -> Result<Option<StepRecord>, NeuraStepError> {
        let result = self.step(network);
        if result.is_err() {
            self.cursor = Cursor::Finished;
        }
        result
    }

    fn is_finished(&self) -> bool {
        self.cursor == Cursor::Finished
    }
}

#[cfg(test)]
#[path = "backward_test.rs"]
mod tests;
