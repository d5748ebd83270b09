use crate::error::NeuraStepError;
use crate::nn::activation::Activation;
use serde::{Deserialize, Serialize};

/// One dense layer of the topology: how many neurons and which activation.
///
/// The input layer has no `LayerConfig`; its size is stored separately on
/// the network because it carries no weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub neuron_count: usize,
    pub activation: Activation,
}

impl LayerConfig {
    pub fn new(neuron_count: usize, activation: Activation) -> Result<Self, NeuraStepError> {
        let config = LayerConfig {
            neuron_count,
            activation,
        };
        config.validate()?;
        Ok(config)
    }

    /// Name-based constructor, e.g. `LayerConfig::from_names(4, "relu")`.
    pub fn from_names(neuron_count: usize, activation: &str) -> Result<Self, NeuraStepError> {
        LayerConfig::new(neuron_count, Activation::from_name(activation)?)
    }

    pub fn validate(&self) -> Result<(), NeuraStepError> {
        if self.neuron_count == 0 {
            return Err(NeuraStepError::InvalidConfiguration(
                "layer neuron count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "layer_config_test.rs"]
mod tests;
