#[cfg(test)]
mod tests {
    use crate::error::NeuraStepError;
    use crate::ops::Matrix;
    use crate::optim::{LayerGradients, LayerParams, Optimizer, OptimizerState, Sgd};
    use approx::assert_relative_eq;

    fn setup() -> Result<(Matrix, Vec<f64>, LayerGradients, OptimizerState), NeuraStepError> {
        let weights = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
        let biases = vec![0.5, -0.5];
        let grads = LayerGradients {
            weights: Matrix::from_rows(vec![vec![0.1, 0.2], vec![0.3, 0.4]])?,
            biases: vec![1.0, -1.0],
        };
        let state = OptimizerState::zeros_like(&[weights.clone()], &[biases.clone()]);
        Ok((weights, biases, grads, state))
    }

    #[test]
    fn test_sgd_basic_step() -> Result<(), NeuraStepError> {
        let (mut weights, mut biases, grads, mut state) = setup()?;
        let lr = 0.1;
        Sgd.update_layer(
            0,
            LayerParams {
                weights: &mut weights,
                biases: &mut biases,
            },
            &grads,
            lr,
            &mut state,
        )?;

        let expected = [1.0 - 0.01, 2.0 - 0.02, 3.0 - 0.03, 4.0 - 0.04];
        for (got, want) in weights.data().iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
        assert_relative_eq!(biases[0], 0.4, epsilon = 1e-12);
        assert_relative_eq!(biases[1], -0.4, epsilon = 1e-12);
        // SGD never touches the accumulators.
        assert_eq!(state, OptimizerState::zeros_like(&[weights.clone()], &[biases.clone()]));
        Ok(())
    }

    #[test]
    fn test_sgd_gradient_shape_mismatch() -> Result<(), NeuraStepError> {
        let (mut weights, mut biases, _, mut state) = setup()?;
        let grads = LayerGradients {
            weights: Matrix::zeros(3, 2),
            biases: vec![0.0, 0.0],
        };
        let result = Sgd.update_layer(
            0,
            LayerParams {
                weights: &mut weights,
                biases: &mut biases,
            },
            &grads,
            0.1,
            &mut state,
        );
        assert!(matches!(result, Err(NeuraStepError::ShapeMismatch { .. })));
        Ok(())
    }
}
