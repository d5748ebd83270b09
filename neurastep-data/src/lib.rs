//! # NeuraStep data
//!
//! Sample sources for the `neurastep-core` engine: datasets, index
//! samplers, a per-sample loader, and parsers for inline text and CSV.

pub mod dataloader;
pub mod datasets;
pub mod parsing;
pub mod samplers;

pub use dataloader::DataLoader;
pub use datasets::{Dataset, VecDataset};
pub use parsing::{load_csv, parse_samples, parse_targets, read_csv_str, zip_samples, TargetEncoding};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
