use crate::nn::{Activation, Loss};
use crate::ops::Matrix;
use crate::optim::OptimizerConfig;
use serde::{Deserialize, Serialize};

/// How the output-layer delta was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaMethod {
    /// Cross-entropy with a softmax output: `delta = a_L - target`.
    SoftmaxCrossEntropy,
    /// `loss_gradient ⊙ activation_derivative(z_L)`.
    ChainRule,
}

/// One atomic, renderable unit of a forward or backward pass.
///
/// Each variant carries the values a viewer needs to draw the step without
/// recomputing anything. Layer indices count dense layers from 0 (the input
/// has no index of its own).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepRecord {
    /// First forward step: the raw sample.
    Input { values: Vec<f64> },
    /// Detailed mode: `prev_activation · weight` added to the running sum.
    WeightMultiplication {
        layer: usize,
        neuron: usize,
        prev_neuron: usize,
        weight: f64,
        prev_activation: f64,
        product: f64,
        running_sum: f64,
    },
    /// Detailed mode: the bias closes one neuron's pre-activation.
    BiasAddition {
        layer: usize,
        neuron: usize,
        z_unbiased: f64,
        bias: f64,
        z: f64,
    },
    LayerActivation {
        layer: usize,
        inputs: Vec<f64>,
        z: Vec<f64>,
        a: Vec<f64>,
        activation: Activation,
    },
    ForwardComplete { output: Vec<f64> },
    OutputDelta {
        layer: usize,
        method: DeltaMethod,
        loss: Loss,
        target: Vec<f64>,
        output: Vec<f64>,
        /// Only set for the chain-rule path.
        loss_gradient: Option<Vec<f64>>,
        activation_derivative: Option<Vec<f64>>,
        delta: Vec<f64>,
    },
    HiddenDelta {
        layer: usize,
        delta_next: Vec<f64>,
        error_propagated: Vec<f64>,
        activation_derivative: Vec<f64>,
        delta: Vec<f64>,
    },
    Gradient {
        layer: usize,
        weight_shape: (usize, usize),
        bias_len: usize,
        grad_w: Matrix,
        grad_b: Vec<f64>,
    },
    /// Parameters of `layer` right after the update was applied.
    WeightUpdate {
        layer: usize,
        optimizer: OptimizerConfig,
        learning_rate: f64,
        weights: Matrix,
        biases: Vec<f64>,
    },
    BackwardComplete,
}

impl StepRecord {
    /// Layer the step belongs to, if any.
    pub fn layer(&self) -> Option<usize> {
        match self {
            StepRecord::WeightMultiplication { layer, .. }
            | StepRecord::BiasAddition { layer, .. }
            | StepRecord::LayerActivation { layer, .. }
            | StepRecord::OutputDelta { layer, .. }
            | StepRecord::HiddenDelta { layer, .. }
            | StepRecord::Gradient { layer, .. }
            | StepRecord::WeightUpdate { layer, .. } => Some(*layer),
            StepRecord::Input { .. }
            | StepRecord::ForwardComplete { .. }
            | StepRecord::BackwardComplete => None,
        }
    }

    pub fn is_forward(&self) -> bool {
        matches!(
            self,
            StepRecord::Input { .. }
                | StepRecord::WeightMultiplication { .. }
                | StepRecord::BiasAddition { .. }
                | StepRecord::LayerActivation { .. }
                | StepRecord::ForwardComplete { .. }
        )
    }

    /// Short tag, handy for logs and viewers.
    pub fn kind(&self) -> &'static str {
        match self {
            StepRecord::Input { .. } => "input",
            StepRecord::WeightMultiplication { .. } => "weight_multiplication",
            StepRecord::BiasAddition { .. } => "bias_addition",
            StepRecord::LayerActivation { .. } => "layer_activation",
            StepRecord::ForwardComplete { .. } => "forward_complete",
            StepRecord::OutputDelta { .. } => "output_delta",
            StepRecord::HiddenDelta { .. } => "hidden_delta",
            StepRecord::Gradient { .. } => "gradient",
            StepRecord::WeightUpdate { .. } => "weight_update",
            StepRecord::BackwardComplete => "backward_complete",
        }
    }
}
