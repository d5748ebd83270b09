// neurastep-core/src/snapshot.rs

//! JSON persistence of a network together with its optimizer state.
//!
//! A snapshot holds everything needed to resume training numerically
//! identically: topology, parameters, loss, optimizer choice and
//! hyperparameters, every accumulator and the Adam step counter. Floats
//! round-trip bit-exactly (`serde_json` is built with `float_roundtrip`).

use crate::config::{NetworkConfig, TrainingConfig};
use crate::error::NeuraStepError;
use crate::network::NetworkState;
use crate::nn::{LayerConfig, Loss};
use crate::ops::Matrix;
use crate::optim::{OptimizerConfig, OptimizerState};
use crate::train::TrainingHistory;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub input_size: usize,
    pub layer_configs: Vec<LayerConfig>,
    pub weights: Vec<Matrix>,
    pub biases: Vec<Vec<f64>>,
    #[serde(default)]
    pub loss_function: Loss,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default)]
    pub velocity_w: Vec<Matrix>,
    #[serde(default)]
    pub velocity_b: Vec<Vec<f64>>,
    #[serde(default)]
    pub m_w: Vec<Matrix>,
    #[serde(default)]
    pub v_w: Vec<Matrix>,
    #[serde(default)]
    pub m_b: Vec<Vec<f64>>,
    #[serde(default)]
    pub v_b: Vec<Vec<f64>>,
    #[serde(default)]
    pub adam_t: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<TrainingHistory>,
}

fn default_learning_rate() -> f64 {
    crate::config::DEFAULT_LEARNING_RATE
}

impl NetworkSnapshot {
    pub fn with_history(mut self, history: TrainingHistory) -> Self {
        self.history = Some(history);
        self
    }

    pub fn network_config(&self) -> NetworkConfig {
        NetworkConfig::new(self.input_size, self.layer_configs.clone())
    }

    /// Training configuration stored alongside the parameters.
    pub fn training_config(&self) -> TrainingConfig {
        TrainingConfig::new(self.learning_rate, self.loss_function, self.optimizer)
    }

    /// Rebuilds the network and its training configuration.
    ///
    /// When `requested` names a different optimizer than the saved one, the
    /// requested configuration wins and the accumulators start from zero.
    pub fn restore(
        &self,
        requested: Option<&TrainingConfig>,
    ) -> Result<(NetworkState, TrainingConfig), NeuraStepError> {
        let mut network = NetworkState::from_snapshot(self)?;
        let saved = self.training_config();
        let config = match requested {
            Some(requested) => {
                if requested.optimizer.name() != saved.optimizer.name() {
                    warn!(
                        "Snapshot was trained with {} but {} was requested; optimizer state reset",
                        saved.optimizer, requested.optimizer
                    );
                    network.reset_optimizer_state();
                }
                *requested
            }
            None => saved,
        };
        config.validate()?;
        Ok((network, config))
    }

    pub fn to_json(&self) -> Result<String, NeuraStepError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, NeuraStepError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), NeuraStepError> {
        fs::write(path.as_ref(), self.to_json()?)?;
        debug!("Saved network snapshot to {}", path.as_ref().display());
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, NeuraStepError> {
        let json = fs::read_to_string(path.as_ref())?;
        let snapshot = Self::from_json(&json)?;
        debug!("Loaded network snapshot from {}", path.as_ref().display());
        Ok(snapshot)
    }
}

impl NetworkState {
    /// Captures parameters, optimizer state and `config`.
    pub fn snapshot(&self, config: &TrainingConfig) -> NetworkSnapshot {
        let state = self.optimizer_state();
        NetworkSnapshot {
            input_size: self.input_size(),
            layer_configs: self.layer_configs().to_vec(),
            weights: self.weights().to_vec(),
            biases: self.biases().to_vec(),
            loss_function: config.loss,
            optimizer: config.optimizer,
            learning_rate: config.learning_rate,
            velocity_w: state.velocity_w().to_vec(),
            velocity_b: state.velocity_b().to_vec(),
            m_w: state.m_w().to_vec(),
            v_w: state.v_w().to_vec(),
            m_b: state.m_b().to_vec(),
            v_b: state.v_b().to_vec(),
            adam_t: state.step_count(),
            history: None,
        }
    }

    /// Rebuilds a network from a snapshot.
    ///
    /// Parameters are shape-checked like externally supplied ones.
    /// Accumulator lists with the wrong number of layers (including absent
    /// ones) are replaced by zeros; a list with the right layer count but a
    /// wrongly shaped entry is an error.
    pub fn from_snapshot(snapshot: &NetworkSnapshot) -> Result<Self, NeuraStepError> {
        let mut network = NetworkState::with_parameters(
            &snapshot.network_config(),
            snapshot.weights.clone(),
            snapshot.biases.clone(),
        )?;
        let zeros = OptimizerState::zeros_like(network.weights(), network.biases());
        let layers = network.layer_count();
        let pick_mats = |label: &str, saved: &[Matrix], fallback: &[Matrix]| -> Vec<Matrix> {
            if saved.len() == layers {
                saved.to_vec()
            } else {
                if !saved.is_empty() {
                    warn!("Snapshot {} has {} layers, expected {}; using zeros", label, saved.len(), layers);
                }
                fallback.to_vec()
            }
        };
        let pick_vecs = |label: &str, saved: &[Vec<f64>], fallback: &[Vec<f64>]| -> Vec<Vec<f64>> {
            if saved.len() == layers {
                saved.to_vec()
            } else {
                if !saved.is_empty() {
                    warn!("Snapshot {} has {} layers, expected {}; using zeros", label, saved.len(), layers);
                }
                fallback.to_vec()
            }
        };
        let state = OptimizerState::from_parts(
            pick_mats("velocity_w", &snapshot.velocity_w, zeros.velocity_w()),
            pick_vecs("velocity_b", &snapshot.velocity_b, zeros.velocity_b()),
            pick_mats("m_w", &snapshot.m_w, zeros.m_w()),
            pick_mats("v_w", &snapshot.v_w, zeros.v_w()),
            pick_vecs("m_b", &snapshot.m_b, zeros.m_b()),
            pick_vecs("v_b", &snapshot.v_b, zeros.v_b()),
            snapshot.adam_t,
            network.weights(),
            network.biases(),
        )?;
        network.set_optimizer_state(state)?;
        Ok(network)
    }
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;
