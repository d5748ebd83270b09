use crate::error::NeuraStepError;
use crate::optim::optimizer_trait::{
    check_gradient_shapes, check_layer_index, LayerGradients, LayerParams, Optimizer,
};
use crate::optim::OptimizerState;

/// Replaces a bias-correction denominator that is exactly zero.
pub const BIAS_CORRECTION_FLOOR: f64 = 1e-8;

/// Adam with bias-corrected first and second moments.
///
/// Uses the shared step counter `t` of the [`OptimizerState`]; the caller
/// bumps it once per backward pass, before the first layer is updated.
#[derive(Debug, Clone, Copy)]
pub struct Adam {
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
}

impl Adam {
    /// `(1 - β1ᵗ, 1 - β2ᵗ)`, each floored away from an exact zero.
    pub fn bias_corrections(&self, t: u64) -> (f64, f64) {
        let exponent = i32::try_from(t).unwrap_or(i32::MAX);
        let correct = |beta: f64| {
            let denom = 1.0 - beta.powi(exponent);
            if denom == 0.0 {
                BIAS_CORRECTION_FLOOR
            } else {
                denom
            }
        };
        (correct(self.beta1), correct(self.beta2))
    }

    /// Updates the moments in place and returns the step to subtract.
    fn moment_step(
        &self,
        m: &mut f64,
        v: &mut f64,
        grad: f64,
        learning_rate: f64,
        corrections: (f64, f64),
    ) -> f64 {
        *m = self.beta1 * *m + (1.0 - self.beta1) * grad;
        *v = self.beta2 * *v + (1.0 - self.beta2) * grad * grad;
        let m_hat = *m / corrections.0;
        let v_hat = *v / corrections.1;
        learning_rate * m_hat / (v_hat.sqrt() + self.epsilon)
    }
}

impl Optimizer for Adam {
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
        let corrections = self.bias_corrections(state.t);

        let (rows, cols) = grads.weights.shape();
        for r in 0..rows {
            for c in 0..cols {
                let step = self.moment_step(
                    &mut state.m_w[layer][(r, c)],
                    &mut state.v_w[layer][(r, c)],
                    grads.weights[(r, c)],
                    learning_rate,
                    corrections,
                );
                params.weights[(r, c)] -= step;
            }
        }

        for (i, (b, &g)) in params.biases.iter_mut().zip(&grads.biases).enumerate() {
            let step = self.moment_step(
                &mut state.m_b[layer][i],
                &mut state.v_b[layer][i],
                g,
                learning_rate,
                corrections,
            );
            *b -= step;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "adam_test.rs"]
mod tests;
