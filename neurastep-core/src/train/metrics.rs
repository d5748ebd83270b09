use crate::error::NeuraStepError;
use crate::ops::vector::argmax;
use serde::{Deserialize, Serialize};

/// Confusion matrix and per-class scores for a multi-class classifier.
///
/// `confusion[true][pred]` counts samples. Precision, recall and F1 are 0
/// for a class where they are undefined; macro averages weight every class
/// equally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    pub num_classes: usize,
    pub confusion: Vec<Vec<usize>>,
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
    pub f1: Vec<f64>,
    pub macro_precision: f64,
    pub macro_recall: f64,
    pub macro_f1: f64,
}

impl ClassificationMetrics {
    /// Arg-max classes of one-hot targets vs. predicted probabilities.
    ///
    /// Pairs whose target row sums to zero (or less) are skipped.
    pub fn from_predictions(
        targets: &[Vec<f64>],
        predictions: &[Vec<f64>],
        num_classes: usize,
    ) -> Result<Self, NeuraStepError> {
        if targets.len() != predictions.len() {
            return Err(NeuraStepError::dimension(
                "classification metrics",
                targets.len(),
                predictions.len(),
            ));
        }
        let mut pairs = Vec::with_capacity(targets.len());
        for (target, prediction) in targets.iter().zip(predictions) {
            if target.iter().sum::<f64>() <= 0.0 {
                continue;
            }
            if let (Some(t), Some(p)) = (argmax(target), argmax(prediction)) {
                pairs.push((t, p));
            }
        }
        Self::from_class_pairs(&pairs, num_classes)
    }

    /// Builds the metrics from `(true_class, predicted_class)` pairs.
    pub fn from_class_pairs(pairs: &[(usize, usize)], num_classes: usize) -> Result<Self, NeuraStepError> {
        let mut confusion = vec![vec![0usize; num_classes]; num_classes];
        for &(t, p) in pairs {
            let worst = t.max(p);
            if worst >= num_classes {
                return Err(NeuraStepError::IndexOutOfBounds {
                    index: worst,
                    len: num_classes,
                });
            }
            confusion[t][p] += 1;
        }

        let mut precision = vec![0.0; num_classes];
        let mut recall = vec![0.0; num_classes];
        let mut f1 = vec![0.0; num_classes];
        for c in 0..num_classes {
            let tp = confusion[c][c] as f64;
            let predicted: usize = (0..num_classes).map(|t| confusion[t][c]).sum();
            let actual: usize = confusion[c].iter().sum();
            precision[c] = ratio(tp, predicted as f64);
            recall[c] = ratio(tp, actual as f64);
            f1[c] = ratio(2.0 * precision[c] * recall[c], precision[c] + recall[c]);
        }

        Ok(ClassificationMetrics {
            num_classes,
            macro_precision: mean(&precision),
            macro_recall: mean(&recall),
            macro_f1: mean(&f1),
            confusion,
            precision,
            recall,
            f1,
        })
    }

    pub fn total(&self) -> usize {
        self.confusion.iter().flatten().sum()
    }

    /// Fraction of samples on the diagonal, 0 when there are none.
    pub fn accuracy(&self) -> f64 {
        let correct: usize = (0..self.num_classes).map(|c| self.confusion[c][c]).sum();
        ratio(correct as f64, self.total() as f64)
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

fn mean(values: &[f64]) -> f64 {
    ratio(values.iter().sum(), values.len() as f64)
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
