// neurastep-core/src/engine/mod.rs

//! Step engines: forward and backward propagation as explicit cursors.
//!
//! An engine owns its cursor but not the network; every call to
//! [`StepEngine::advance`] borrows the [`NetworkState`] mutably, computes one
//! [`StepRecord`] and returns it. `Ok(None)` marks the end of the pass. Engines
//! are not restartable: a new pass means a new engine.

pub mod backward;
pub mod forward;
pub mod session;
pub mod step;

pub use backward::{analytical_gradients, check_loss_pairing, BackwardPass};
pub use forward::ForwardPass;
pub use session::{Phase, TrainingSession};
pub use step::{DeltaMethod, StepRecord};

pub use crate::config::Granularity;

use crate::error::NeuraStepError;
use crate::network::NetworkState;

/// Cache entry `index`, or `SequenceMisuse` when another pass has rewritten
/// the caches since this one started.
pub(crate) fn cache_entry<'a>(
    cache: &'a [Vec<f64>],
    index: usize,
    name: &str,
) -> Result<&'a [f64], NeuraStepError> {
    cache.get(index).map(Vec::as_slice).ok_or_else(|| {
        NeuraStepError::SequenceMisuse(format!(
            "{}[{}] is missing; the network's caches changed during this pass",
            name, index
        ))
    })
}

pub trait StepEngine {
    /// Produces the next step, or `None` once the pass is over.
    ///
    /// After an error the engine is finished; parameters already updated
    /// stay updated.
    fn advance(&mut self, network: &mut NetworkState) -> Result<Option<StepRecord>, NeuraStepError>;

    fn is_finished(&self) -> bool;

    /// Runs the remaining steps and collects them.
    fn drain(&mut self, network: &mut NetworkState) -> Result<Vec<StepRecord>, NeuraStepError> {
        let mut steps = Vec::new();
        while let Some(step) = self.advance(network)? {
            steps.push(step);
        }
        Ok(steps)
    }

    /// Iterator view over the remaining steps.
    fn steps(self, network: &mut NetworkState) -> Stepper<'_, Self>
    where
        Self: Sized,
    {
        Stepper {
            engine: self,
            network,
            done: false,
        }
    }
}

/// Iterator adaptor returned by [`StepEngine::steps`]. Stops after the first
/// error.
pub struct Stepper<'a, E> {
    engine: E,
    network: &'a mut NetworkState,
    done: bool,
}

impl<E> Stepper<'_, E> {
    pub fn into_engine(self) -> E {
        self.engine
    }
}

impl<E: StepEngine> Iterator for Stepper<'_, E> {
    type Item = Result<StepRecord, NeuraStepError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.engine.advance(self.network) {
            Ok(Some(step)) => Some(Ok(step)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
