// src/nn/mod.rs
// Module principal pour les fonctions d'activation, de perte et l'initialisation.

pub mod activation;
pub mod init;
pub mod layer_config;
pub mod loss;

// Re-export common items
pub use activation::Activation;
pub use layer_config::LayerConfig;
pub use loss::Loss;
