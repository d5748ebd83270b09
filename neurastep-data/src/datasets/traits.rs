// neurastep-data/src/datasets/traits.rs

use neurastep_core::NeuraStepError;

/// Indexed access to samples.
///
/// `Item` is usually a [`neurastep_core::Sample`], but any cloneable value
/// works, which keeps samplers and the loader testable on plain integers.
pub trait Dataset {
    type Item;

    /// Returns the sample at `index`.
    ///
    /// # Errors
    /// `NeuraStepError::IndexOutOfBounds` when `index >= self.len()`.
    fn get(&self, index: usize) -> Result<Self::Item, NeuraStepError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
