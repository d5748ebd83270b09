#[cfg(test)]
mod tests {
    use crate::config::TrainingConfig;
    use crate::engine::TrainingSession;
    use crate::error::NeuraStepError;
    use crate::network::NetworkState;
    use crate::nn::{Activation, Loss};
    use crate::ops::Matrix;
    use crate::optim::OptimizerConfig;
    use crate::snapshot::NetworkSnapshot;
    use crate::test_utils::seeded_network;
    use crate::train::TrainingHistory;

    fn trained_session() -> Result<(TrainingSession, TrainingConfig), NeuraStepError> {
        let net = seeded_network(2, &[(3, Activation::Tanh), (2, Activation::Softmax)], 21)?;
        let config = TrainingConfig::new(0.05, Loss::CrossEntropy, OptimizerConfig::adam());
        let mut session = TrainingSession::new(net, config)?;
        session.run_sample(vec![0.3, -0.7], vec![1.0, 0.0])?;
        session.run_sample(vec![-0.2, 0.9], vec![0.0, 1.0])?;
        Ok((session, config))
    }

    #[test]
    fn test_json_round_trip_is_bit_exact() -> Result<(), NeuraStepError> {
        let (session, config) = trained_session()?;
        let snapshot = session.network().snapshot(&config).with_history(TrainingHistory {
            epoch_losses: vec![0.6931471805599453, 0.1 + 0.2],
            epoch_accuracies: vec![0.5, 1.0],
            epochs_completed: 2,
        });
        let json = snapshot.to_json()?;
        let back = NetworkSnapshot::from_json(&json)?;
        assert_eq!(back, snapshot);
        assert_eq!(back.adam_t, 2);
        Ok(())
    }

    #[test]
    fn test_restore_keeps_optimizer_state() -> Result<(), NeuraStepError> {
        let (session, config) = trained_session()?;
        let snapshot = session.network().snapshot(&config);
        let (restored, restored_config) = snapshot.restore(None)?;
        assert_eq!(restored_config, config);
        assert_eq!(restored.weights(), session.network().weights());
        assert_eq!(restored.optimizer_state(), session.network().optimizer_state());
        Ok(())
    }

    #[test]
    fn test_restore_with_other_optimizer_resets_state() -> Result<(), NeuraStepError> {
        let (session, config) = trained_session()?;
        let snapshot = session.network().snapshot(&config);
        let requested = TrainingConfig::new(0.05, Loss::CrossEntropy, OptimizerConfig::momentum());
        let (restored, restored_config) = snapshot.restore(Some(&requested))?;
        assert_eq!(restored_config.optimizer, OptimizerConfig::momentum());
        assert_eq!(restored.optimizer_state().step_count(), 0);
        assert!(restored.optimizer_state().m_w()[0].data().iter().all(|&x| x == 0.0));
        Ok(())
    }

    #[test]
    fn test_missing_accumulators_become_zeros() -> Result<(), NeuraStepError> {
        let json = r#"{
            "input_size": 1,
            "layer_configs": [{"neuron_count": 1, "activation": "linear"}],
            "weights": [[[0.5]]],
            "biases": [[0.25]],
            "loss_function": "mean_squared_error",
            "optimizer": {"type": "momentum", "beta": 0.8}
        }"#;
        let snapshot = NetworkSnapshot::from_json(json)?;
        let net = NetworkState::from_snapshot(&snapshot)?;
        assert_eq!(net.weights()[0], Matrix::from_rows(vec![vec![0.5]])?);
        assert_eq!(net.optimizer_state().velocity_w()[0], Matrix::zeros(1, 1));
        assert_eq!(snapshot.training_config().optimizer, OptimizerConfig::Momentum { beta: 0.8 });
        assert_eq!(snapshot.learning_rate, 0.1);
        Ok(())
    }

    #[test]
    fn test_bad_parameter_shape_rejected() {
        let json = r#"{
            "input_size": 2,
            "layer_configs": [{"neuron_count": 1, "activation": "linear"}],
            "weights": [[[0.5]]],
            "biases": [[0.25]]
        }"#;
        let snapshot = NetworkSnapshot::from_json(json).unwrap();
        assert!(matches!(
            NetworkState::from_snapshot(&snapshot),
            Err(NeuraStepError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_unknown_activation_is_serialization_error() {
        let json = r#"{
            "input_size": 1,
            "layer_configs": [{"neuron_count": 1, "activation": "swish"}],
            "weights": [[[0.5]]],
            "biases": [[0.25]]
        }"#;
        assert!(matches!(
            NetworkSnapshot::from_json(json),
            Err(NeuraStepError::SerializationError(_))
        ));
    }

    #[test]
    fn test_save_and_load_file() -> Result<(), NeuraStepError> {
        let (session, config) = trained_session()?;
        let snapshot = session.network().snapshot(&config);
        let path = std::env::temp_dir().join(format!("neurastep_snapshot_{}.json", std::process::id()));
        snapshot.save(&path)?;
        let loaded = NetworkSnapshot::load(&path)?;
        std::fs::remove_file(&path)?;
        assert_eq!(loaded, snapshot);
        assert!(matches!(
            NetworkSnapshot::load(&path),
            Err(NeuraStepError::IoError(_))
        ));
        Ok(())
    }
}
