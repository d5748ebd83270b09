// neurastep-core/src/config.rs

//! Configuration types shared by the network, the engines and the trainer.

use crate::error::NeuraStepError;
use crate::nn::{LayerConfig, Loss};
use crate::optim::OptimizerConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

/// Topology of a network: the input width plus one entry per dense layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_size: usize,
    pub layers: Vec<LayerConfig>,
}

impl NetworkConfig {
    pub fn new(input_size: usize, layers: Vec<LayerConfig>) -> Self {
        NetworkConfig { input_size, layers }
    }

    /// Adds a layer, builder style.
    pub fn with_layer(mut self, layer: LayerConfig) -> Self {
        self.layers.push(layer);
        self
    }

    /// Width of the last layer (or of the input when there are no layers).
    pub fn output_size(&self) -> usize {
        self.layers
            .last()
            .map_or(self.input_size, |layer| layer.neuron_count)
    }

    /// Expected `(rows, cols)` of every weight matrix.
    pub fn weight_shapes(&self) -> Vec<(usize, usize)> {
        let mut previous = self.input_size;
        self.layers
            .iter()
            .map(|layer| {
                let shape = (previous, layer.neuron_count);
                previous = layer.neuron_count;
                shape
            })
            .collect()
    }

    /// An empty layer list is accepted here; the forward engine rejects it later.
    pub fn validate(&self) -> Result<(), NeuraStepError> {
        if self.input_size == 0 {
            return Err(NeuraStepError::InvalidConfiguration(
                "input size must be positive".to_string(),
            ));
        }
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }
}

/// How finely the forward engine splits a pass into steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One step per layer.
    #[default]
    Coarse,
    /// One step per weight, one per bias, then one per layer.
    Detailed,
}

/// Everything the backward engine needs besides the network and the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default)]
    pub loss: Loss,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    #[serde(default)]
    pub granularity: Granularity,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            learning_rate: DEFAULT_LEARNING_RATE,
            loss: Loss::default(),
            optimizer: OptimizerConfig::default(),
            granularity: Granularity::default(),
        }
    }
}

impl TrainingConfig {
    pub fn new(learning_rate: f64, loss: Loss, optimizer: OptimizerConfig) -> Self {
        TrainingConfig {
            learning_rate,
            loss,
            optimizer,
            granularity: Granularity::Coarse,
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn validate(&self) -> Result<(), NeuraStepError> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NeuraStepError::InvalidConfiguration(format!(
                "learning rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        self.optimizer.validate()
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
