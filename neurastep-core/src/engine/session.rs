// neurastep-core/src/engine/session.rs

use crate::config::TrainingConfig;
use crate::engine::backward::check_loss_pairing;
use crate::engine::{BackwardPass, ForwardPass, StepEngine, StepRecord};
use crate::error::NeuraStepError;
use crate::network::{NetworkState, ParameterEdit};
use log::debug;

/// Where a [`TrainingSession`] stands within one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ForwardArmed,
    ForwardStepping,
    /// Forward done and nothing to train against (armed without a target).
    ForwardComplete,
    BackwardArmed,
    BackwardStepping,
    BackwardComplete,
}

impl Phase {
    /// True while a pass is in flight; parameters must not be edited then.
    pub fn is_mid_sequence(&self) -> bool {
        !matches!(self, Phase::Idle | Phase::ForwardComplete | Phase::BackwardComplete)
    }
}

/// Owns a network and drives one sample at a time through both engines.
///
/// `Idle → ForwardArmed → ForwardStepping → ForwardComplete → BackwardArmed
/// → BackwardStepping → BackwardComplete → Idle`. Finishing the forward pass
/// arms the backward pass at once when a target was given, so with a target
/// `ForwardComplete` is passed straight through. After `BackwardComplete`
/// (or a target-less `ForwardComplete`) one more [`step`](Self::step)
/// returns `None` and settles in `Idle`; [`arm`](Self::arm) is accepted
/// from any of those three phases.
///
/// Any error drops the in-flight engine and returns the session to `Idle`,
/// without undoing what was already written.
#[derive(Debug, Clone)]
pub struct TrainingSession {
    network: NetworkState,
    config: TrainingConfig,
    phase: Phase,
    forward: Option<ForwardPass>,
    backward: Option<BackwardPass>,
    target: Option<Vec<f64>>,
}

impl TrainingSession {
    pub fn new(network: NetworkState, config: TrainingConfig) -> Result<Self, NeuraStepError> {
        config.validate()?;
        if let Some(output) = network.layer_configs().last() {
            check_loss_pairing(output.activation, config.loss);
        }
        Ok(TrainingSession {
            network,
            config,
            phase: Phase::Idle,
            forward: None,
            backward: None,
            target: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn network(&self) -> &NetworkState {
        &self.network
    }

    pub fn into_network(self) -> NetworkState {
        self.network
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Swaps the training configuration between samples.
    pub fn set_config(&mut self, config: TrainingConfig) -> Result<(), NeuraStepError> {
        self.ensure_between_samples("change the training configuration")?;
        config.validate()?;
        if let Some(output) = self.network.layer_configs().last() {
            check_loss_pairing(output.activation, config.loss);
        }
        self.config = config;
        Ok(())
    }

    /// Arms a forward pass followed by a backward pass against `target`.
    pub fn arm(&mut self, input: Vec<f64>, target: Vec<f64>) -> Result<(), NeuraStepError> {
        self.arm_inner(input, Some(target))
    }

    /// Arms a forward pass only.
    pub fn arm_forward_only(&mut self, input: Vec<f64>) -> Result<(), NeuraStepError> {
        self.arm_inner(input, None)
    }

    fn arm_inner(&mut self, input: Vec<f64>, target: Option<Vec<f64>>) -> Result<(), NeuraStepError> {
        self.ensure_between_samples("arm a new sample")?;
        if let (Some(t), Some(size)) = (&target, self.network.output_size()) {
            if t.len() != size {
                return Err(NeuraStepError::dimension("session target", size, t.len()));
            }
        }
        let forward = ForwardPass::new(&self.network, input, self.config.granularity)?;
        self.forward = Some(forward);
        self.backward = None;
        self.target = target;
        self.phase = Phase::ForwardArmed;
        Ok(())
    }

    fn ensure_between_samples(&self, action: &str) -> Result<(), NeuraStepError> {
        if self.phase.is_mid_sequence() {
            return Err(NeuraStepError::SequenceMisuse(format!(
                "cannot {} while in {:?}",
                action, self.phase
            )));
        }
        Ok(())
    }

    /// Produces the next step of the current sample.
    pub fn step(&mut self) -> Result<Option<StepRecord>, NeuraStepError> {
        let result = self.step_inner();
        if result.is_err() {
            self.reset_to_idle();
        }
        result
    }

    fn step_inner(&mut self) -> Result<Option<StepRecord>, NeuraStepError> {
        match self.phase {
            Phase::Idle => Err(NeuraStepError::SequenceMisuse(
                "no sample armed; call arm() first".to_string(),
            )),
            Phase::ForwardComplete | Phase::BackwardComplete => {
                self.reset_to_idle();
                Ok(None)
            }
            Phase::ForwardArmed | Phase::ForwardStepping => {
                let forward = self
                    .forward
                    .as_mut()
                    .ok_or_else(|| NeuraStepError::SequenceMisuse("forward pass missing".to_string()))?;
                match forward.advance(&mut self.network)? {
                    Some(record) => {
                        self.phase = Phase::ForwardStepping;
                        if matches!(record, StepRecord::ForwardComplete { .. }) {
                            self.finish_forward()?;
                        }
                        Ok(Some(record))
                    }
                    None => {
                        self.finish_forward()?;
                        Ok(None)
                    }
                }
            }
            Phase::BackwardArmed | Phase::BackwardStepping => {
                let backward = self
                    .backward
                    .as_mut()
                    .ok_or_else(|| NeuraStepError::SequenceMisuse("backward pass missing".to_string()))?;
                match backward.advance(&mut self.network)? {
                    Some(record) => {
                        self.phase = if matches!(record, StepRecord::BackwardComplete) {
                            self.backward = None;
                            Phase::BackwardComplete
                        } else {
                            Phase::BackwardStepping
                        };
                        Ok(Some(record))
                    }
                    None => {
                        self.backward = None;
                        self.phase = Phase::BackwardComplete;
                        Ok(None)
                    }
                }
            }
        }
    }

    fn finish_forward(&mut self) -> Result<(), NeuraStepError> {
        self.forward = None;
        self.phase = Phase::ForwardComplete;
        if let Some(target) = self.target.take() {
            self.backward = Some(BackwardPass::new(&self.network, target, &self.config)?);
            self.phase = Phase::BackwardArmed;
        }
        Ok(())
    }

    /// Steps until the forward pass is over.
    pub fn drain_forward(&mut self) -> Result<Vec<StepRecord>, NeuraStepError> {
        if !matches!(self.phase, Phase::ForwardArmed | Phase::ForwardStepping) {
            return Err(NeuraStepError::SequenceMisuse(format!(
                "no forward pass to drain in {:?}",
                self.phase
            )));
        }
        let mut steps = Vec::new();
        while matches!(self.phase, Phase::ForwardArmed | Phase::ForwardStepping) {
            match self.step()? {
                Some(record) => steps.push(record),
                None => break,
            }
        }
        Ok(steps)
    }

    /// Steps until the backward pass is over.
    pub fn drain_backward(&mut self) -> Result<Vec<StepRecord>, NeuraStepError> {
        if !matches!(self.phase, Phase::BackwardArmed | Phase::BackwardStepping) {
            return Err(NeuraStepError::SequenceMisuse(format!(
                "no backward pass to drain in {:?}",
                self.phase
            )));
        }
        let mut steps = Vec::new();
        while matches!(self.phase, Phase::BackwardArmed | Phase::BackwardStepping) {
            match self.step()? {
                Some(record) => steps.push(record),
                None => break,
            }
        }
        Ok(steps)
    }

    /// Arms `input`/`target` and runs both passes to completion.
    pub fn run_sample(&mut self, input: Vec<f64>, target: Vec<f64>) -> Result<Vec<StepRecord>, NeuraStepError> {
        self.arm(input, target)?;
        let mut steps = self.drain_forward()?;
        steps.extend(self.drain_backward()?);
        self.reset_to_idle();
        Ok(steps)
    }

    /// Drops whatever pass is in flight. Nothing is rolled back.
    pub fn abandon(&mut self) {
        if self.phase.is_mid_sequence() {
            debug!("Abandoning sample in {:?}", self.phase);
        }
        self.reset_to_idle();
    }

    /// Replaces a layer's weights or biases between samples.
    pub fn edit_parameters(&mut self, layer: usize, edit: ParameterEdit) -> Result<(), NeuraStepError> {
        self.ensure_between_samples("edit parameters")?;
        self.network.replace_parameters(layer, edit)
    }

    fn reset_to_idle(&mut self) {
        self.forward = None;
        self.backward = None;
        self.target = None;
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
