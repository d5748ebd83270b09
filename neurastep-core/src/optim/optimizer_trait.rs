use crate::error::NeuraStepError;
use crate::ops::Matrix;
use crate::optim::OptimizerState;
use serde::{Deserialize, Serialize};

/// Gradients of the loss for one layer, shaped like its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerGradients {
    pub weights: Matrix,
    pub biases: Vec<f64>,
}

/// Mutable view of one layer's parameters during an update.
pub struct LayerParams<'a> {
    pub weights: &'a mut Matrix,
    pub biases: &'a mut [f64],
}

/// A parameter-update rule.
///
/// Implementations read and write only the accumulators of `layer` in
/// `state`; the shared step counter is advanced by the backward engine, once
/// per pass, before the first layer is updated.
pub trait Optimizer {
    fn update_layer(
        &self,
        layer: usize,
        params: LayerParams<'_>,
        grads: &LayerGradients,
        learning_rate: f64,
        state: &mut OptimizerState,
    ) -> Result<(), NeuraStepError>;
}

/// Gradients must match the parameters they update, exactly.
pub(crate) fn check_gradient_shapes(
    params: &LayerParams<'_>,
    grads: &LayerGradients,
) -> Result<(), NeuraStepError> {
    if params.weights.shape() != grads.weights.shape() {
        return Err(NeuraStepError::ShapeMismatch {
            operation: "weight update".to_string(),
            expected: params.weights.shape(),
            actual: grads.weights.shape(),
        });
    }
    if params.biases.len() != grads.biases.len() {
        return Err(NeuraStepError::dimension(
            "bias update",
            params.biases.len(),
            grads.biases.len(),
        ));
    }
    Ok(())
}

/// Stateful rules need the layer to exist in the accumulators.
pub(crate) fn check_layer_index(layer: usize, state: &OptimizerState) -> Result<(), NeuraStepError> {
    if layer >= state.layer_count() {
        return Err(NeuraStepError::IndexOutOfBounds {
            index: layer,
            len: state.layer_count(),
        });
    }
    Ok(())
}
