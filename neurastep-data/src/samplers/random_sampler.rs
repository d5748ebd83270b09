// neurastep-data/src/samplers/random_sampler.rs

use super::traits::Sampler;
use log::warn;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Random index order, with or without replacement.
///
/// A seeded sampler yields the same order on every call to `iter`; an
/// unseeded one draws from `thread_rng` each time.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    replacement: bool,
    num_samples: Option<usize>,
    seed: Option<u64>,
}

impl RandomSampler {
    /// `num_samples` defaults to the dataset size.
    pub fn new(replacement: bool, num_samples: Option<usize>) -> Self {
        RandomSampler {
            replacement,
            num_samples,
            seed: None,
        }
    }

    /// Shuffle without replacement, reproducibly.
    pub fn seeded(seed: u64) -> Self {
        Self::new(false, None).with_seed(seed)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn draw<R: Rng>(&self, dataset_len: usize, rng: &mut R) -> Vec<usize> {
        let count = self.num_samples.unwrap_or(dataset_len);
        if self.replacement {
            return (0..count).map(|_| rng.gen_range(0..dataset_len)).collect();
        }
        if count > dataset_len {
            warn!(
                "RandomSampler: num_samples ({}) > dataset_len ({}) without replacement, yielding nothing",
                count, dataset_len
            );
            return Vec::new();
        }
        let mut indices: Vec<usize> = (0..dataset_len).collect();
        indices.shuffle(rng);
        indices.truncate(count);
        indices
    }
}

impl Sampler for RandomSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        if dataset_len == 0 {
            return Box::new(std::iter::empty());
        }
        let indices = match self.seed {
            Some(seed) => self.draw(dataset_len, &mut StdRng::seed_from_u64(seed)),
            None => self.draw(dataset_len, &mut rand::thread_rng()),
        };
        Box::new(indices.into_iter())
    }

    fn len(&self, dataset_len: usize) -> usize {
        self.num_samples.unwrap_or(dataset_len)
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
