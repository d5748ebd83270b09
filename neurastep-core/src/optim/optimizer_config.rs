use crate::error::NeuraStepError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MOMENTUM_BETA: f64 = 0.9;
pub const DEFAULT_ADAM_BETA1: f64 = 0.9;
pub const DEFAULT_ADAM_BETA2: f64 = 0.999;
pub const DEFAULT_ADAM_EPSILON: f64 = 1e-8;

fn default_momentum_beta() -> f64 {
    DEFAULT_MOMENTUM_BETA
}
fn default_beta1() -> f64 {
    DEFAULT_ADAM_BETA1
}
fn default_beta2() -> f64 {
    DEFAULT_ADAM_BETA2
}
fn default_epsilon() -> f64 {
    DEFAULT_ADAM_EPSILON
}

/// Which update rule the backward pass applies, with its hyperparameters.
///
/// Serialized with an internal `type` tag: `{"type": "adam", "beta1": 0.9, ...}`.
/// Missing hyperparameters fall back to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptimizerConfig {
    #[default]
    Sgd,
    Momentum {
        #[serde(default = "default_momentum_beta")]
        beta: f64,
    },
    Adam {
        #[serde(default = "default_beta1")]
        beta1: f64,
        #[serde(default = "default_beta2")]
        beta2: f64,
        #[serde(default = "default_epsilon")]
        epsilon: f64,
    },
}

impl OptimizerConfig {
    pub fn momentum() -> Self {
        OptimizerConfig::Momentum {
            beta: DEFAULT_MOMENTUM_BETA,
        }
    }

    pub fn adam() -> Self {
        OptimizerConfig::Adam {
            beta1: DEFAULT_ADAM_BETA1,
            beta2: DEFAULT_ADAM_BETA2,
            epsilon: DEFAULT_ADAM_EPSILON,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OptimizerConfig::Sgd => "sgd",
            OptimizerConfig::Momentum { .. } => "momentum",
            OptimizerConfig::Adam { .. } => "adam",
        }
    }

    /// Name lookup with default hyperparameters.
    pub fn from_name(name: &str) -> Result<Self, NeuraStepError> {
        match name {
            "sgd" => Ok(OptimizerConfig::Sgd),
            "momentum" => Ok(OptimizerConfig::momentum()),
            "adam" => Ok(OptimizerConfig::adam()),
            _ => Err(NeuraStepError::UnknownFunction(format!("optimizer '{}'", name))),
        }
    }

    pub fn is_adam(&self) -> bool {
        matches!(self, OptimizerConfig::Adam { .. })
    }

    pub fn validate(&self) -> Result<(), NeuraStepError> {
        let check_beta = |label: &str, beta: f64| {
            if !(0.0..1.0).contains(&beta) {
                return Err(NeuraStepError::InvalidConfiguration(format!(
                    "{} must be in [0, 1), got {}",
                    label, beta
                )));
            }
            Ok(())
        };
        match *self {
            OptimizerConfig::Sgd => Ok(()),
            OptimizerConfig::Momentum { beta } => check_beta("momentum beta", beta),
            OptimizerConfig::Adam {
                beta1,
                beta2,
                epsilon,
            } => {
                check_beta("beta1", beta1)?;
                check_beta("beta2", beta2)?;
                if !(epsilon > 0.0) {
                    return Err(NeuraStepError::InvalidConfiguration(format!(
                        "epsilon must be positive, got {}",
                        epsilon
                    )));
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for OptimizerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OptimizerConfig {
    type Err = NeuraStepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptimizerConfig::from_name(s)
    }
}
