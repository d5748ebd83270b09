use neurastep_core::{
    Activation, LayerConfig, Matrix, NetworkConfig, NetworkState, NeuraStepError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Installs env_logger once; RUST_LOG=debug shows the engine's logs.
#[allow(dead_code)]
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// 2 → relu(2) → linear(1), W0=[[0.1,0.2],[0.3,0.4]], W1=[[0.5],[0.6]], zero biases.
#[allow(dead_code)]
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

// Seeded Glorot network, e.g. `seeded_network(3, &[(4, Activation::Tanh), (2, Activation::Softmax)], 7)`.
#[allow(dead_code)]
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
