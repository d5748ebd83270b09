// dataloader.rs
//! # DataLoader
//!
//! Parcourt un [`Dataset`] échantillon par échantillon, dans l'ordre donné
//! par un [`Sampler`].
//!
//! ```rust
//! use neurastep_data::dataloader::DataLoader;
//! use neurastep_data::datasets::VecDataset;
//! use neurastep_data::samplers::SequentialSampler;
//!
//! # fn main() -> Result<(), neurastep_core::NeuraStepError> {
//! let dataset = VecDataset::new(vec![1, 2, 3]);
//! for item in DataLoader::new(dataset, SequentialSampler::new()) {
//!     println!("Sample : {:?}", item?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`DataLoader::epoch`] returns a whole pass as one `Vec`, which is what
//! [`neurastep_core::Trainer::fit`] expects.

use crate::datasets::Dataset;
use crate::samplers::Sampler;
use neurastep_core::NeuraStepError;

pub struct DataLoader<D: Dataset, S: Sampler> {
    dataset: D,
    sampler: S,
    indices_iter: Box<dyn Iterator<Item = usize> + Send + Sync>,
}

impl<D: Dataset, S: Sampler> DataLoader<D, S> {
    pub fn new(dataset: D, sampler: S) -> Self {
        let indices_iter = sampler.iter(dataset.len());
        Self {
            dataset,
            sampler,
            indices_iter,
        }
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    /// Samples in one full pass.
    pub fn pass_len(&self) -> usize {
        self.sampler.len(self.dataset.len())
    }

    /// Starts a new pass; random samplers draw a fresh order.
    pub fn reset(&mut self) {
        self.indices_iter = self.sampler.iter(self.dataset.len());
    }

    /// Resets, then collects one whole pass in sampler order.
    pub fn epoch(&mut self) -> Result<Vec<D::Item>, NeuraStepError> {
        self.reset();
        self.by_ref().collect()
    }
}

impl<D: Dataset, S: Sampler> Iterator for DataLoader<D, S> {
    type Item = Result<D::Item, NeuraStepError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.indices_iter.next().map(|idx| self.dataset.get(idx))
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
