// neurastep-core/src/train/trainer.rs

use crate::config::TrainingConfig;
use crate::engine::{check_loss_pairing, BackwardPass, ForwardPass, StepEngine, StepRecord};
use crate::error::NeuraStepError;
use crate::network::NetworkState;
use crate::nn::{Activation, Loss};
use crate::ops::vector::argmax;
use crate::train::{ClassificationMetrics, Sample, TrainingHistory};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Summary of one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochReport {
    /// 1-based.
    pub epoch: usize,
    pub average_loss: f64,
    /// Arg-max accuracy, only for softmax outputs trained with cross-entropy.
    pub accuracy: Option<f64>,
}

/// Epoch-based training driver.
///
/// Every epoch visits the samples in a fresh random order, one at a time:
/// a drained forward pass, the loss of its output, then a drained backward
/// pass. The history accumulates across calls to [`fit`](Self::fit).
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainingConfig,
    history: TrainingHistory,
    // (true, predicted) classes seen during the last epoch
    last_epoch_pairs: Vec<(usize, usize)>,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Result<Self, NeuraStepError> {
        config.validate()?;
        Ok(Trainer {
            config,
            history: TrainingHistory::default(),
            last_epoch_pairs: Vec::new(),
        })
    }

    /// Continues an earlier run, e.g. one restored from a snapshot.
    pub fn with_history(mut self, history: TrainingHistory) -> Self {
        self.history = history;
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }

    pub fn fit<R: Rng + ?Sized>(
        &mut self,
        network: &mut NetworkState,
        samples: &[Sample],
        epochs: usize,
        rng: &mut R,
    ) -> Result<Vec<EpochReport>, NeuraStepError> {
        self.fit_with_observer(network, samples, epochs, rng, |_| {})
    }

    /// Same as [`fit`](Self::fit), handing every step record to `observer`.
    pub fn fit_with_observer<R, F>(
        &mut self,
        network: &mut NetworkState,
        samples: &[Sample],
        epochs: usize,
        rng: &mut R,
        mut observer: F,
    ) -> Result<Vec<EpochReport>, NeuraStepError>
    where
        R: Rng + ?Sized,
        F: FnMut(&StepRecord),
    {
        if samples.is_empty() {
            return Err(NeuraStepError::InvalidConfiguration(
                "cannot train on an empty sample set".to_string(),
            ));
        }
        let output = network
            .layer_configs()
            .last()
            .map(|l| l.activation)
            .ok_or_else(|| NeuraStepError::dimension("training (layer count)", 1, 0))?;
        check_loss_pairing(output, self.config.loss);
        let classify = self.config.loss == Loss::CrossEntropy && output == Activation::Softmax;
        let log_every = (epochs / 20).max(1);

        let mut order: Vec<usize> = (0..samples.len()).collect();
        let mut reports = Vec::with_capacity(epochs);
        for epoch in 0..epochs {
            order.shuffle(rng);
            let mut loss_sum = 0.0;
            let mut correct = 0usize;
            self.last_epoch_pairs.clear();

            for &i in &order {
                let sample = &samples[i];
                let mut forward = ForwardPass::new(network, sample.input.clone(), self.config.granularity)?;
                while let Some(step) = forward.advance(network)? {
                    observer(&step);
                }
                let prediction = network.output().map(<[f64]>::to_vec).unwrap_or_default();
                loss_sum += self.config.loss.compute(&sample.target, &prediction)?;

                if classify && sample.target.iter().sum::<f64>() > 0.0 {
                    if let (Some(t), Some(p)) = (argmax(&sample.target), argmax(&prediction)) {
                        if t == p {
                            correct += 1;
                        }
                        self.last_epoch_pairs.push((t, p));
                    }
                }

                let mut backward = BackwardPass::new(network, sample.target.clone(), &self.config)?;
                while let Some(step) = backward.advance(network)? {
                    observer(&step);
                }
            }

            let report = EpochReport {
                epoch: self.history.epochs_completed + 1,
                average_loss: loss_sum / samples.len() as f64,
                accuracy: classify.then(|| correct as f64 / samples.len() as f64),
            };
            self.history.record(&report);
            if (epoch + 1) % log_every == 0 || epoch + 1 == epochs {
                match report.accuracy {
                    Some(acc) => info!(
                        "Epoch {}/{}, average loss: {:.6}, accuracy: {:.4}",
                        epoch + 1,
                        epochs,
                        report.average_loss,
                        acc
                    ),
                    None => info!(
                        "Epoch {}/{}, average loss: {:.6}",
                        epoch + 1,
                        epochs,
                        report.average_loss
                    ),
                }
            }
            reports.push(report);
        }
        debug!("Training finished after {} epochs", epochs);
        Ok(reports)
    }

    /// Classes seen during the last epoch of the last `fit`, as
    /// `(true, predicted)` pairs. Empty unless the network is a softmax
    /// classifier trained with cross-entropy.
    pub fn last_epoch_pairs(&self) -> &[(usize, usize)] {
        &self.last_epoch_pairs
    }

    /// Metrics over the last epoch's predictions.
    pub fn last_epoch_metrics(&self, num_classes: usize) -> Result<ClassificationMetrics, NeuraStepError> {
        ClassificationMetrics::from_class_pairs(&self.last_epoch_pairs, num_classes)
    }
}

/// Runs `network.predict` over `samples` and scores the arg-max classes.
pub fn evaluate(network: &NetworkState, samples: &[Sample]) -> Result<ClassificationMetrics, NeuraStepError> {
    let num_classes = network.output_size().unwrap_or(0);
    let targets: Vec<Vec<f64>> = samples.iter().map(|s| s.target.clone()).collect();
    let predictions = samples
        .iter()
        .map(|s| network.predict(&s.input))
        .collect::<Result<Vec<_>, _>>()?;
    ClassificationMetrics::from_predictions(&targets, &predictions, num_classes)
}

#[cfg(test)]
#[path = "trainer_test.rs"]
mod tests;
