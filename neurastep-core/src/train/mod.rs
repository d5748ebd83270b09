// neurastep-core/src/train/mod.rs
// Boucle d'entraînement par époques et métriques de classification.

pub mod metrics;
pub mod trainer;

pub use metrics::ClassificationMetrics;
pub use trainer::{evaluate, EpochReport, Trainer};

use serde::{Deserialize, Serialize};

/// One training example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl Sample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Self {
        Sample { input, target }
    }
}

/// Per-epoch curves kept across calls to [`Trainer::fit`] and persisted in
/// snapshots.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub epoch_losses: Vec<f64>,
    /// Only filled for softmax classifiers trained with cross-entropy.
    pub epoch_accuracies: Vec<f64>,
    pub epochs_completed: usize,
}

impl TrainingHistory {
    pub fn record(&mut self, report: &EpochReport) {
        self.epoch_losses.push(report.average_loss);
        if let Some(acc) = report.accuracy {
            self.epoch_accuracies.push(acc);
        }
        self.epochs_completed += 1;
    }

    pub fn last_loss(&self) -> Option<f64> {
        self.epoch_losses.last().copied()
    }
}
