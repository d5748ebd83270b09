// neurastep-data/src/datasets/vec_dataset.rs

use super::traits::Dataset;
use neurastep_core::{NeuraStepError, Sample};

/// A dataset backed by a `Vec`; `get` clones the item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VecDataset<T: Clone> {
    data: Vec<T>,
}

impl<T: Clone> VecDataset<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}

impl VecDataset<Sample> {
    /// Builds samples from parallel input/target rows.
    ///
    /// # Errors
    /// `DimensionMismatch` when the two lists differ in length.
    pub fn from_rows(inputs: Vec<Vec<f64>>, targets: Vec<Vec<f64>>) -> Result<Self, NeuraStepError> {
        if inputs.len() != targets.len() {
            return Err(NeuraStepError::dimension(
                "dataset rows (targets)",
                inputs.len(),
                targets.len(),
            ));
        }
        Ok(Self::new(
            inputs
                .into_iter()
                .zip(targets)
                .map(|(input, target)| Sample::new(input, target))
                .collect(),
        ))
    }
}

impl<T: Clone> From<Vec<T>> for VecDataset<T> {
    fn from(data: Vec<T>) -> Self {
        Self::new(data)
    }
}

impl<T: Clone> Dataset for VecDataset<T> {
    type Item = T;

    fn get(&self, index: usize) -> Result<Self::Item, NeuraStepError> {
        self.data.get(index).cloned().ok_or(NeuraStepError::IndexOutOfBounds {
            index,
            len: self.data.len(),
        })
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
#[path = "vec_dataset_test.rs"]
mod tests;
