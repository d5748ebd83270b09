//! Exemple d'utilisation du DataLoader avec des échantillons CSV et texte
//!
//! Charge un petit CSV de classification, le parcourt avec
//! SequentialSampler puis RandomSampler, et montre la saisie « inline ».

use neurastep_core::NeuraStepError;
use neurastep_data::{
    parse_samples, parse_targets, read_csv_str, zip_samples, DataLoader, RandomSampler,
    SequentialSampler, TargetEncoding,
};

const CSV: &str = "sepal,petal,species
5.1,1.4,0
7.0,4.7,1
6.3,6.0,2
4.9,1.4,0
6.4,4.5,1
5.8,5.1,2
bad,row,1
";

fn main() -> Result<(), NeuraStepError> {
    env_logger::init();

    let dataset = read_csv_str(CSV, 2, TargetEncoding::OneHot(3))?;

    // SequentialSampler : itération ordonnée
    let seq_loader = DataLoader::new(dataset.clone(), SequentialSampler::new());
    println!("\n--- SequentialSampler ---");
    for (i, sample) in seq_loader.enumerate() {
        let sample = sample?;
        println!("  {i} : {:?} -> {:?}", sample.input, sample.target);
    }

    // RandomSampler : itération aléatoire reproductible
    let mut rand_loader = DataLoader::new(dataset, RandomSampler::seeded(7));
    println!("\n--- RandomSampler ({} échantillons) ---", rand_loader.pass_len());
    for sample in rand_loader.epoch()? {
        println!("  {:?} -> {:?}", sample.input, sample.target);
    }

    // Saisie inline
    let samples = zip_samples(
        parse_samples("0,0;0,1;1,0;1,1", 2)?,
        parse_targets("0;1;1;0", TargetEncoding::Raw(1))?,
    )?;
    println!("\n--- XOR inline ---\n{:?}", samples);
    Ok(())
}
