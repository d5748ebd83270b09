// Déclare les modules principaux de la crate
//! # NeuraStep core
//!
//! An inspectable feed-forward network engine: dense layers, forward and
//! backward propagation split into individually observable steps, and
//! SGD / momentum / Adam updates.
//!
//! ```no_run
//! use neurastep_core::{
//!     Activation, LayerConfig, Loss, NetworkConfig, NetworkState, OptimizerConfig,
//!     TrainingConfig, TrainingSession,
//! };
//!
//! # fn main() -> Result<(), neurastep_core::NeuraStepError> {
//! let config = NetworkConfig::new(2, vec![
//!     LayerConfig::new(3, Activation::Tanh)?,
//!     LayerConfig::new(1, Activation::Sigmoid)?,
//! ]);
//! let network = NetworkState::new(&config)?;
//! let training = TrainingConfig::new(0.1, Loss::MeanSquaredError, OptimizerConfig::adam());
//! let mut session = TrainingSession::new(network, training)?;
//! session.arm(vec![1.0, 0.0], vec![1.0])?;
//! while let Some(step) = session.step()? {
//!     println!("{:?}", step);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod grad_check;
pub mod network;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod snapshot;
pub mod train;

#[cfg(test)]
pub(crate) mod test_utils;

// Ré-exporte les types principaux
pub use config::{Granularity, NetworkConfig, TrainingConfig};
pub use engine::{BackwardPass, ForwardPass, Phase, StepEngine, StepRecord, TrainingSession};
pub use error::NeuraStepError;
pub use network::{NetworkState, ParameterEdit};
pub use nn::{Activation, LayerConfig, Loss};
pub use ops::Matrix;
pub use optim::{OptimizerConfig, OptimizerState};
pub use snapshot::NetworkSnapshot;
pub use train::{Sample, Trainer, TrainingHistory};
