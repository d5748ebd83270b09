//! # Exemple pas à pas : XOR
//!
//! Walks one sample through the engine step by step, printing every
//! record, then trains the same network on XOR with [`Trainer`] and
//! saves a snapshot.
//!
//! ## Exécution
//! `RUST_LOG=info cargo run --example step_by_step_xor`

use neurastep_core::{
    Activation, Granularity, LayerConfig, Loss, NetworkConfig, NetworkState, NeuraStepError,
    OptimizerConfig, Sample, StepRecord, Trainer, TrainingConfig, TrainingSession,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn describe(step: &StepRecord) -> String {
    match step {
        StepRecord::Input { values } => format!("input {:?}", values),
        StepRecord::WeightMultiplication {
            layer,
            neuron,
            prev_neuron,
            weight,
            prev_activation,
            running_sum,
            ..
        } => format!(
            "L{} n{} += w[{}]={:.4} * a={:.4} -> {:.4}",
            layer, neuron, prev_neuron, weight, prev_activation, running_sum
        ),
        StepRecord::BiasAddition { layer, neuron, bias, z, .. } => {
            format!("L{} n{} + b={:.4} -> z={:.4}", layer, neuron, bias, z)
        }
        StepRecord::LayerActivation { layer, a, activation, .. } => {
            format!("L{} {} -> {:?}", layer, activation, a)
        }
        StepRecord::ForwardComplete { output } => format!("output {:?}", output),
        StepRecord::OutputDelta { layer, loss, delta, .. } => {
            format!("L{} output delta ({}) {:?}", layer, loss, delta)
        }
        StepRecord::HiddenDelta { layer, delta, .. } => format!("L{} hidden delta {:?}", layer, delta),
        StepRecord::Gradient { layer, grad_b, .. } => format!("L{} gradients, bias {:?}", layer, grad_b),
        StepRecord::WeightUpdate { layer, optimizer, .. } => format!("L{} updated with {}", layer, optimizer),
        StepRecord::BackwardComplete => "backward complete".to_string(),
    }
}

fn main() -> Result<(), NeuraStepError> {
    env_logger::init();

    let config = NetworkConfig::new(
        2,
        vec![
            LayerConfig::new(4, Activation::Tanh)?,
            LayerConfig::new(1, Activation::Sigmoid)?,
        ],
    );
    let mut rng = StdRng::seed_from_u64(42);
    let network = NetworkState::with_rng(&config, &mut rng)?;

    // 1. Un échantillon, étape par étape
    let training = TrainingConfig::new(0.5, Loss::MeanSquaredError, OptimizerConfig::adam())
        .with_granularity(Granularity::Detailed);
    let mut session = TrainingSession::new(network, training)?;
    session.arm(vec![1.0, 0.0], vec![1.0])?;
    while let Some(step) = session.step()? {
        println!("[{:?}] {}", session.phase(), describe(&step));
    }

    // 2. Entraînement complet
    let samples = vec![
        Sample::new(vec![0.0, 0.0], vec![0.0]),
        Sample::new(vec![0.0, 1.0], vec![1.0]),
        Sample::new(vec![1.0, 0.0], vec![1.0]),
        Sample::new(vec![1.0, 1.0], vec![0.0]),
    ];
    let mut network = session.into_network();
    let training = training.with_granularity(Granularity::Coarse);
    let mut trainer = Trainer::new(training)?;
    let reports = trainer.fit(&mut network, &samples, 500, &mut rng)?;
    if let Some(last) = reports.last() {
        println!("final average loss: {:.6}", last.average_loss);
    }
    for sample in &samples {
        println!("{:?} -> {:?}", sample.input, network.predict(&sample.input)?);
    }

    // 3. Sauvegarde
    let path = std::env::temp_dir().join("neurastep_xor.json");
    network
        .snapshot(&training)
        .with_history(trainer.history().clone())
        .save(&path)?;
    println!("snapshot written to {}", path.display());
    Ok(())
}
