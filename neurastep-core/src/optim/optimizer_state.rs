use crate::error::NeuraStepError;
use crate::ops::Matrix;
use serde::{Deserialize, Serialize};

/// Per-layer optimizer accumulators plus the shared Adam step counter.
///
/// Every accumulator is shaped exactly like the parameter it tracks:
/// `velocity_w`, `m_w`, `v_w` like the weights, `velocity_b`, `m_b`, `v_b`
/// like the biases. The state is always reset as a whole, never per layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OptimizerState {
    pub(crate) velocity_w: Vec<Matrix>,
    pub(crate) velocity_b: Vec<Vec<f64>>,
    pub(crate) m_w: Vec<Matrix>,
    pub(crate) v_w: Vec<Matrix>,
    pub(crate) m_b: Vec<Vec<f64>>,
    pub(crate) v_b: Vec<Vec<f64>>,
    /// Adam step counter, shared by all layers and bumped once per backward pass.
    pub(crate) t: u64,
}

impl OptimizerState {
    /// All-zero accumulators matching the given parameter shapes, `t = 0`.
    pub fn zeros_like(weights: &[Matrix], biases: &[Vec<f64>]) -> Self {
        let zero_w: Vec<Matrix> = weights
            .iter()
            .map(|w| Matrix::zeros(w.rows(), w.cols()))
            .collect();
        let zero_b: Vec<Vec<f64>> = biases.iter().map(|b| vec![0.0; b.len()]).collect();
        OptimizerState {
            velocity_w: zero_w.clone(),
            velocity_b: zero_b.clone(),
            m_w: zero_w.clone(),
            v_w: zero_w,
            m_b: zero_b.clone(),
            v_b: zero_b,
            t: 0,
        }
    }

    /// Rebuilds a state from persisted accumulators, validating every shape.
    #[allow(clippy::too_many_arguments)] // one argument per accumulator
    pub fn from_parts(
        velocity_w: Vec<Matrix>,
        velocity_b: Vec<Vec<f64>>,
        m_w: Vec<Matrix>,
        v_w: Vec<Matrix>,
        m_b: Vec<Vec<f64>>,
        v_b: Vec<Vec<f64>>,
        t: u64,
        weights: &[Matrix],
        biases: &[Vec<f64>],
    ) -> Result<Self, NeuraStepError> {
        let state = OptimizerState {
            velocity_w,
            velocity_b,
            m_w,
            v_w,
            m_b,
            v_b,
            t,
        };
        state.validate_against(weights, biases)?;
        Ok(state)
    }

    /// Checks that every accumulator matches the parameter shapes.
    pub fn validate_against(&self, weights: &[Matrix], biases: &[Vec<f64>]) -> Result<(), NeuraStepError> {
        for (label, mats) in [
            ("velocity_w", &self.velocity_w),
            ("m_w", &self.m_w),
            ("v_w", &self.v_w),
        ] {
            if mats.len() != weights.len() {
                return Err(NeuraStepError::InvalidConfiguration(format!(
                    "{} has {} layers, expected {}",
                    label,
                    mats.len(),
                    weights.len()
                )));
            }
            for (l, (acc, w)) in mats.iter().zip(weights).enumerate() {
                if acc.shape() != w.shape() {
                    return Err(NeuraStepError::InvalidConfiguration(format!(
                        "{}[{}] shape {:?} != expected {:?}",
                        label,
                        l,
                        acc.shape(),
                        w.shape()
                    )));
                }
            }
        }
        for (label, vecs) in [
            ("velocity_b", &self.velocity_b),
            ("m_b", &self.m_b),
            ("v_b", &self.v_b),
        ] {
            if vecs.len() != biases.len() {
                return Err(NeuraStepError::InvalidConfiguration(format!(
                    "{} has {} layers, expected {}",
                    label,
                    vecs.len(),
                    biases.len()
                )));
            }
            for (l, (acc, b)) in vecs.iter().zip(biases).enumerate() {
                if acc.len() != b.len() {
                    return Err(NeuraStepError::InvalidConfiguration(format!(
                        "{}[{}] length {} != expected {}",
                        label,
                        l,
                        acc.len(),
                        b.len()
                    )));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn advance_step(&mut self) {
        self.t += 1;
    }

    pub fn step_count(&self) -> u64 {
        self.t
    }

    pub fn velocity_w(&self) -> &[Matrix] {
        &self.velocity_w
    }

    pub fn velocity_b(&self) -> &[Vec<f64>] {
        &self.velocity_b
    }

    pub fn m_w(&self) -> &[Matrix] {
        &self.m_w
    }

    pub fn v_w(&self) -> &[Matrix] {
        &self.v_w
    }

    pub fn m_b(&self) -> &[Vec<f64>] {
        &self.m_b
    }

    pub fn v_b(&self) -> &[Vec<f64>] {
        &self.v_b
    }

    pub(crate) fn layer_count(&self) -> usize {
        self.velocity_w.len()
    }
}
