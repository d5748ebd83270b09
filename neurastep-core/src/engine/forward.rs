// neurastep-core/src/engine/forward.rs

use crate::config::Granularity;
use crate::engine::{cache_entry, StepEngine, StepRecord};
use crate::error::NeuraStepError;
use crate::network::NetworkState;
use log::{debug, trace};

/// Before layer `layer` is activated the caches must hold exactly the
/// layers this pass has already produced.
fn check_position(network: &NetworkState, layer: usize) -> Result<(), NeuraStepError> {
    if network.a_cache.len() != layer + 1 || network.z_cache.len() != layer {
        return Err(NeuraStepError::SequenceMisuse(format!(
            "forward caches hold {} layers while this pass is at layer {}; another pass ran on this network",
            network.z_cache.len(),
            layer
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Start,
    Accumulate { layer: usize, neuron: usize, prev: usize },
    Bias { layer: usize, neuron: usize },
    Activate { layer: usize },
    Complete,
    Finished,
}

/// Step-wise forward propagation of one input vector.
///
/// Built with [`ForwardPass::new`], which rejects a network without layers
/// or an input of the wrong width before any step exists. Each call to
/// [`StepEngine::advance`] computes exactly one [`StepRecord`] and writes the
/// caches of the network it is given. If those caches were rewritten by
/// another pass in the meantime, `advance` fails with `SequenceMisuse`.
/// Once finished (or after an error) the pass only returns `None`.
#[derive(Debug, Clone)]
pub struct ForwardPass {
    input: Vec<f64>,
    granularity: Granularity,
    cursor: Cursor,
    running_sum: f64,
    // pre-activations of the layer being accumulated (detailed mode)
    z_partial: Vec<f64>,
}

impl ForwardPass {
    pub fn new(
        network: &NetworkState,
        input: Vec<f64>,
        granularity: Granularity,
    ) -> Result<Self, NeuraStepError> {
        network.check_forward_input(&input)?;
        Ok(ForwardPass {
            input,
            granularity,
            cursor: Cursor::Start,
            running_sum: 0.0,
            z_partial: Vec::new(),
        })
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    fn first_cursor_of(&self, layer: usize) -> Cursor {
        match self.granularity {
            Granularity::Coarse => Cursor::Activate { layer },
            Granularity::Detailed => Cursor::Accumulate {
                layer,
                neuron: 0,
                prev: 0,
            },
        }
    }

    fn step(&mut self, network: &mut NetworkState) -> Result<Option<StepRecord>, NeuraStepError> {
        let layer_count = network.layer_count();
        let record = match self.cursor {
            Cursor::Finished => return Ok(None),
            Cursor::Start => {
                network.check_forward_input(&self.input)?;
                network.reset_caches(&self.input);
                self.cursor = self.first_cursor_of(0);
                StepRecord::Input {
                    values: self.input.clone(),
                }
            }
            Cursor::Accumulate { layer, neuron, prev } => {
                check_position(network, layer)?;
                let weights = network
                    .weights
                    .get(layer)
                    .ok_or(NeuraStepError::IndexOutOfBounds {
                        index: layer,
                        len: layer_count,
                    })?;
                let prev_activation = cache_entry(&network.a_cache, layer, "a_cache")?
                    .get(prev)
                    .copied()
                    .ok_or(NeuraStepError::IndexOutOfBounds {
                        index: prev,
                        len: weights.rows(),
                    })?;
                let weight = weights.get(prev, neuron).ok_or(NeuraStepError::IndexOutOfBounds {
                    index: neuron,
                    len: weights.cols(),
                })?;
                let product = prev_activation * weight;
                if prev == 0 {
                    self.running_sum = 0.0;
                }
                self.running_sum += product;
                self.cursor = if prev + 1 < weights.rows() {
                    Cursor::Accumulate {
                        layer,
                        neuron,
                        prev: prev + 1,
                    }
                } else {
                    Cursor::Bias { layer, neuron }
                };
                StepRecord::WeightMultiplication {
                    layer,
                    neuron,
                    prev_neuron: prev,
                    weight,
                    prev_activation,
                    product,
                    running_sum: self.running_sum,
                }
            }
            Cursor::Bias { layer, neuron } => {
                check_position(network, layer)?;
                let biases = network.biases.get(layer).ok_or(NeuraStepError::IndexOutOfBounds {
                    index: layer,
                    len: layer_count,
                })?;
                let bias = *biases.get(neuron).ok_or(NeuraStepError::IndexOutOfBounds {
                    index: neuron,
                    len: biases.len(),
                })?;
                let z = self.running_sum + bias;
                if neuron == 0 {
                    self.z_partial.clear();
                }
                self.z_partial.push(z);
                self.cursor = if neuron + 1 < biases.len() {
                    Cursor::Accumulate {
                        layer,
                        neuron: neuron + 1,
                        prev: 0,
                    }
                } else {
                    Cursor::Activate { layer }
                };
                StepRecord::BiasAddition {
                    layer,
                    neuron,
                    z_unbiased: self.running_sum,
                    bias,
                    z,
                }
            }
            Cursor::Activate { layer } => {
                check_position(network, layer)?;
                let inputs = cache_entry(&network.a_cache, layer, "a_cache")?.to_vec();
                let activation = network
                    .layer_configs()
                    .get(layer)
                    .map(|l| l.activation)
                    .ok_or(NeuraStepError::IndexOutOfBounds {
                        index: layer,
                        len: layer_count,
                    })?;
                let z = match self.granularity {
                    Granularity::Coarse => network.pre_activation(layer, &inputs)?,
                    Granularity::Detailed => std::mem::take(&mut self.z_partial),
                };
                let a = activation.forward(&z);
                network.z_cache.push(z.clone());
                network.a_cache.push(a.clone());
                self.cursor = if layer + 1 < layer_count {
                    self.first_cursor_of(layer + 1)
                } else {
                    Cursor::Complete
                };
                StepRecord::LayerActivation {
                    layer,
                    inputs,
                    z,
                    a,
                    activation,
                }
            }
            Cursor::Complete => {
                let output = network.a_cache.last().cloned().unwrap_or_default();
                debug!("Forward pass complete: output {:?}", output);
                self.cursor = Cursor::Finished;
                StepRecord::ForwardComplete { output }
            }
        };
        trace!("forward step: {:?}", record);
        Ok(Some(record))
    }
}

impl StepEngine for ForwardPass {
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
#[path = "forward_test.rs"]
mod tests;
