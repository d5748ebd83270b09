// neurastep-core/src/optim/mod.rs

//! Parameter-update rules applied by the backward engine.
//!
//! This module provides the `Optimizer` trait, the per-layer accumulators
//! (`OptimizerState`) and the three rules the engine supports: plain SGD,
//! momentum and Adam. `OptimizerConfig` is the serializable choice of rule
//! and dispatches to the matching implementation.

pub mod adam;
pub mod momentum;
pub mod optimizer_config;
pub mod optimizer_state;
pub mod optimizer_trait;
pub mod sgd;

pub use adam::Adam;
pub use momentum::Momentum;
pub use optimizer_config::OptimizerConfig;
pub use optimizer_state::OptimizerState;
pub use optimizer_trait::{LayerGradients, LayerParams, Optimizer};
pub use sgd::Sgd;

use crate::error::NeuraStepError;

impl Optimizer for OptimizerConfig {
    fn update_layer(
        &self,
        layer: usize,
        params: LayerParams<'_>,
        grads: &LayerGradients,
        learning_rate: f64,
        state: &mut OptimizerState,
    ) -> Result<(), NeuraStepError> {
        match *self {
            OptimizerConfig::Sgd => Sgd.update_layer(layer, params, grads, learning_rate, state),
            OptimizerConfig::Momentum { beta } => {
                Momentum { beta }.update_layer(layer, params, grads, learning_rate, state)
            }
            OptimizerConfig::Adam {
                beta1,
                beta2,
                epsilon,
            } => Adam {
                beta1,
                beta2,
                epsilon,
            }
            .update_layer(layer, params, grads, learning_rate, state),
        }
    }
}

#[cfg(test)]
#[path = "optimizer_config_test.rs"]
mod optimizer_config_test;
