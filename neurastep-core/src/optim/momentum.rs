use crate::error::NeuraStepError;
use crate::optim::optimizer_trait::{
    check_gradient_shapes, check_layer_index, LayerGradients, LayerParams, Optimizer,
};
use crate::optim::OptimizerState;

/// Gradient descent with a velocity term.
///
/// `v = β·v + lr·grad`, then `param -= v`. Starting from zero velocity the
/// first update is exactly the SGD update, whatever `β` is.
#[derive(Debug, Clone, Copy)]
pub struct Momentum {
    pub beta: f64,
}

impl Optimizer for Momentum {
    fn update_layer(
        &self,
        layer: usize,
        params: LayerParams<'_>,
        grads: &LayerGradients,
        learning_rate: f64,
        state: &mut OptimizerState,
    ) -> Result<(), NeuraStepError> {
        check_gradient_shapes(&params, grads)?;
        check_layer_index(layer, state)?;

        let velocity_w = &mut state.velocity_w[layer];
        let (rows, cols) = grads.weights.shape();
        for r in 0..rows {
            for c in 0..cols {
                let v = self.beta * velocity_w[(r, c)] + learning_rate * grads.weights[(r, c)];
                velocity_w[(r, c)] = v;
                params.weights[(r, c)] -= v;
            }
        }

        let velocity_b = &mut state.velocity_b[layer];
        for ((b, g), vel) in params
            .biases
            .iter_mut()
            .zip(&grads.biases)
            .zip(velocity_b.iter_mut())
        {
            *vel = self.beta * *vel + learning_rate * g;
            *b -= *vel;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "momentum_test.rs"]
mod tests;
