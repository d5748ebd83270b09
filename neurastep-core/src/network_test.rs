#[cfg(test)]
mod tests {
    use crate::config::NetworkConfig;
    use crate::error::NeuraStepError;
    use crate::network::{NetworkState, ParameterEdit};
    use crate::nn::{Activation, LayerConfig};
    use crate::ops::Matrix;
    use crate::optim::OptimizerState;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config_2_2_1() -> Result<NetworkConfig, NeuraStepError> {
        Ok(NetworkConfig::new(
            2,
            vec![
                LayerConfig::new(2, Activation::Relu)?,
                LayerConfig::new(1, Activation::Linear)?,
            ],
        ))
    }

    fn fixed_network() -> Result<NetworkState, NeuraStepError> {
        NetworkState::with_parameters(
            &config_2_2_1()?,
            vec![
                Matrix::from_rows(vec![vec![0.1, 0.2], vec![0.3, 0.4]])?,
                Matrix::from_rows(vec![vec![0.5], vec![0.6]])?,
            ],
            vec![vec![0.0, 0.0], vec![0.0]],
        )
    }

    #[test]
    fn test_random_init_shapes() -> Result<(), NeuraStepError> {
        let config = NetworkConfig::new(
            3,
            vec![
                LayerConfig::new(4, Activation::Tanh)?,
                LayerConfig::new(2, Activation::Softmax)?,
            ],
        );
        let net = NetworkState::with_rng(&config, &mut StdRng::seed_from_u64(1))?;
        assert_eq!(net.weights()[0].shape(), (3, 4));
        assert_eq!(net.weights()[1].shape(), (4, 2));
        assert_eq!(net.biases()[0].len(), 4);
        assert_eq!(net.biases()[1].len(), 2);
        assert_eq!(
            net.optimizer_state(),
            &OptimizerState::zeros_like(net.weights(), net.biases())
        );
        assert!(net.a_cache().is_empty());
        assert!(!net.forward_complete());
        Ok(())
    }

    #[test]
    fn test_seeded_init_is_reproducible() -> Result<(), NeuraStepError> {
        let config = config_2_2_1()?;
        let a = NetworkState::with_rng(&config, &mut StdRng::seed_from_u64(42))?;
        let b = NetworkState::with_rng(&config, &mut StdRng::seed_from_u64(42))?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_supplied_weights_shape_mismatch() -> Result<(), NeuraStepError> {
        let config = config_2_2_1()?;
        let result = NetworkState::with_parameters(
            &config,
            vec![Matrix::zeros(2, 2), Matrix::zeros(1, 2)],
            vec![vec![0.0, 0.0], vec![0.0]],
        );
        match result {
            Err(NeuraStepError::InvalidConfiguration(msg)) => {
                assert!(msg.contains("(2, 1)"), "message should name expected shape: {}", msg);
                assert!(msg.contains("(1, 2)"), "message should name actual shape: {}", msg);
            }
            other => panic!("expected InvalidConfiguration, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_supplied_bias_count_mismatch() -> Result<(), NeuraStepError> {
        let result = NetworkState::with_parameters(
            &config_2_2_1()?,
            vec![Matrix::zeros(2, 2), Matrix::zeros(2, 1)],
            vec![vec![0.0, 0.0]],
        );
        assert!(matches!(result, Err(NeuraStepError::InvalidConfiguration(_))));
        Ok(())
    }

    #[test]
    fn test_partial_supply_draws_the_rest() -> Result<(), NeuraStepError> {
        let config = config_2_2_1()?;
        let biases = vec![vec![1.0, 2.0], vec![3.0]];
        let net = NetworkState::configure(&config, None, Some(biases.clone()), &mut StdRng::seed_from_u64(5))?;
        assert_eq!(net.biases(), biases.as_slice());
        assert_eq!(net.weights()[1].shape(), (2, 1));
        Ok(())
    }

    #[test]
    fn test_zero_layers_configures_but_cannot_predict() -> Result<(), NeuraStepError> {
        let net = NetworkState::with_parameters(&NetworkConfig::new(2, vec![]), vec![], vec![])?;
        assert_eq!(net.output_size(), None);
        assert!(net.predict(&[1.0, 2.0]).unwrap_err().is_dimension_mismatch());
        Ok(())
    }

    #[test]
    fn test_predict_matches_hand_computation() -> Result<(), NeuraStepError> {
        let net = fixed_network()?;
        let out = net.predict(&[1.0, 2.0])?;
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0], 0.95, epsilon = 1e-12);
        // predict is pure
        assert!(net.a_cache().is_empty());
        Ok(())
    }

    #[test]
    fn test_predict_rejects_wrong_input_length() -> Result<(), NeuraStepError> {
        let net = fixed_network()?;
        assert_eq!(
            net.predict(&[1.0]),
            Err(NeuraStepError::dimension("forward pass input", 2, 1))
        );
        Ok(())
    }

    #[test]
    fn test_replace_parameters_resets_optimizer_state() -> Result<(), NeuraStepError> {
        let mut net = fixed_network()?;
        net.optimizer_state.velocity_w[0][(0, 0)] = 3.0;
        net.optimizer_state.m_b[1][0] = 1.0;
        net.optimizer_state.t = 7;

        net.replace_parameters(1, ParameterEdit::Biases(vec![0.25]))?;
        assert_eq!(net.biases()[1], vec![0.25]);
        assert_eq!(
            net.optimizer_state(),
            &OptimizerState::zeros_like(net.weights(), net.biases())
        );
        assert_eq!(net.optimizer_state().step_count(), 0);
        Ok(())
    }

    #[test]
    fn test_replace_parameters_validates() -> Result<(), NeuraStepError> {
        let mut net = fixed_network()?;
        let before = net.clone();
        assert!(matches!(
            net.replace_parameters(0, ParameterEdit::Weights(Matrix::zeros(3, 2))),
            Err(NeuraStepError::InvalidConfiguration(_))
        ));
        assert_eq!(
            net.replace_parameters(2, ParameterEdit::Biases(vec![0.0])),
            Err(NeuraStepError::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert_eq!(net, before);
        Ok(())
    }
}
