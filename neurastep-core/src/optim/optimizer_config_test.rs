use crate::error::NeuraStepError;
use crate::ops::Matrix;
use crate::optim::{LayerGradients, LayerParams, Optimizer, OptimizerConfig, OptimizerState};

#[test]
fn test_from_name_and_defaults() -> Result<(), NeuraStepError> {
    assert_eq!(OptimizerConfig::from_name("sgd")?, OptimizerConfig::Sgd);
    assert_eq!(
        "momentum".parse::<OptimizerConfig>()?,
        OptimizerConfig::Momentum { beta: 0.9 }
    );
    assert_eq!(
        OptimizerConfig::from_name("adam")?,
        OptimizerConfig::Adam {
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8
        }
    );
    assert!(matches!(
        OptimizerConfig::from_name("rmsprop"),
        Err(NeuraStepError::UnknownFunction(_))
    ));
    Ok(())
}

#[test]
fn test_serde_tagging() {
    let json = serde_json::to_string(&OptimizerConfig::Momentum { beta: 0.5 }).unwrap();
    assert_eq!(json, r#"{"type":"momentum","beta":0.5}"#);
    let sgd: OptimizerConfig = serde_json::from_str(r#"{"type":"sgd"}"#).unwrap();
    assert_eq!(sgd, OptimizerConfig::Sgd);
    let adam: OptimizerConfig = serde_json::from_str(r#"{"type":"adam","beta1":0.8}"#).unwrap();
    assert_eq!(
        adam,
        OptimizerConfig::Adam {
            beta1: 0.8,
            beta2: 0.999,
            epsilon: 1e-8
        }
    );
}

#[test]
fn test_config_dispatch_matches_rule() -> Result<(), NeuraStepError> {
    let grads = LayerGradients {
        weights: Matrix::from_rows(vec![vec![0.5]])?,
        biases: vec![0.5],
    };
    let mut weights = Matrix::from_rows(vec![vec![1.0]])?;
    let mut biases = vec![1.0];
    let mut state = OptimizerState::zeros_like(&[weights.clone()], &[biases.clone()]);
    OptimizerConfig::momentum().update_layer(
        0,
        LayerParams {
            weights: &mut weights,
            biases: &mut biases,
        },
        &grads,
        0.2,
        &mut state,
    )?;
    assert_eq!(weights[(0, 0)], 1.0 - 0.2 * 0.5);
    assert_eq!(state.velocity_b()[0][0], 0.2 * 0.5);
    Ok(())
}
