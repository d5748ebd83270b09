// Fixtures shared by the unit tests.

use crate::config::NetworkConfig;
use crate::error::NeuraStepError;
use crate::network::NetworkState;
use crate::nn::{Activation, LayerConfig};
use crate::ops::Matrix;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// 2 → relu(2) → linear(1) with fixed weights and zero biases.
/// Input `[1, 2]` gives hidden `[0.7, 1.0]` and output `0.95`.
pub(crate) fn relu_linear_network() -> Result<NetworkState, NeuraStepError> {
    let config = NetworkConfig::new(
        2,
        vec![
            LayerConfig::new(2, Activation::Relu)?,
            LayerConfig::new(1, Activation::Linear)?,
        ],
    );
    NetworkState::with_parameters(
        &config,
        vec![
            Matrix::from_rows(vec![vec![0.1, 0.2], vec![0.3, 0.4]])?,
            Matrix::from_rows(vec![vec![0.5], vec![0.6]])?,
        ],
        vec![vec![0.0, 0.0], vec![0.0]],
    )
}

/// Seeded random network with the given hidden/output activations.
pub(crate) fn seeded_network(
    input_size: usize,
    layers: &[(usize, Activation)],
    seed: u64,
) -> Result<NetworkState, NeuraStepError> {
    let layers = layers
        .iter()
        .map(|&(n, act)| LayerConfig::new(n, act))
        .collect::<Result<Vec<_>, _>>()?;
    NetworkState::with_rng(
        &NetworkConfig::new(input_size, layers),
        &mut StdRng::seed_from_u64(seed),
    )
}
