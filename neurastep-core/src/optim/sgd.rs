use crate::error::NeuraStepError;
use crate::optim::optimizer_trait::{check_gradient_shapes, LayerGradients, LayerParams, Optimizer};
use crate::optim::OptimizerState;

/// Plain gradient descent: `W -= lr·grad_W`, `b -= lr·grad_b`.
///
/// Stateless; the accumulators are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sgd;

impl Optimizer for Sgd {
    fn update_layer(
        &self,
        _layer: usize,
        params: LayerParams<'_>,
        grads: &LayerGradients,
        learning_rate: f64,
        _state: &mut OptimizerState,
    ) -> Result<(), NeuraStepError> {
        check_gradient_shapes(&params, grads)?;
        let (rows, cols) = grads.weights.shape();
        for r in 0..rows {
            for c in 0..cols {
                params.weights[(r, c)] -= learning_rate * grads.weights[(r, c)];
            }
        }
        for (b, g) in params.biases.iter_mut().zip(&grads.biases) {
            *b -= learning_rate * g;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
