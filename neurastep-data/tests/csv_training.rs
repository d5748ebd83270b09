use approx::assert_relative_eq;
use neurastep_core::{
    Activation, LayerConfig, Loss, NetworkConfig, NetworkState, NeuraStepError, OptimizerConfig,
    Trainer, TrainingConfig,
};
use neurastep_data::{read_csv_str, DataLoader, RandomSampler, TargetEncoding};
use rand::rngs::StdRng;
use rand::SeedableRng;

const BLOBS: &str = "x1,x2,class
0.1,0.2,0
0.2,0.1,0
0.0,0.0,0
0.9,1.0,1
1.0,0.8,1
0.8,0.9,1
oops,1,1
";

#[test]
fn test_csv_to_trainer() -> Result<(), NeuraStepError> {
    let _ = env_logger::builder().is_test(true).try_init();
    let dataset = read_csv_str(BLOBS, 2, TargetEncoding::for_loss(Loss::CrossEntropy, 2))?;
    let mut loader = DataLoader::new(dataset, RandomSampler::seeded(5));
    let samples = loader.epoch()?;
    assert_eq!(samples.len(), 6);

    let config = NetworkConfig::new(
        2,
        vec![
            LayerConfig::new(4, Activation::Tanh)?,
            LayerConfig::new(2, Activation::Softmax)?,
        ],
    );
    let mut rng = StdRng::seed_from_u64(1);
    let mut network = NetworkState::with_rng(&config, &mut rng)?;
    let training = TrainingConfig::new(0.05, Loss::CrossEntropy, OptimizerConfig::adam());
    let mut trainer = Trainer::new(training)?;
    let reports = trainer.fit(&mut network, &samples, 200, &mut rng)?;

    let first = reports[0].average_loss;
    let last = reports[reports.len() - 1].average_loss;
    assert!(last < first, "loss went from {} to {}", first, last);
    assert_eq!(reports[reports.len() - 1].accuracy, Some(1.0));

    let metrics = trainer.last_epoch_metrics(2)?;
    assert_eq!(metrics.total(), 6);
    assert_relative_eq!(metrics.accuracy(), 1.0);
    Ok(())
}
