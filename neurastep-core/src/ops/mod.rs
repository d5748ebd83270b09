// src/ops/mod.rs

//! # Numeric primitives
//!
//! Pure, stateless arithmetic on vectors (`&[f64]`) and dense matrices
//! ([`Matrix`]). Shapes are validated before anything is computed.

pub mod matrix;
pub mod vector;

pub use matrix::{outer, vec_mat_mul, Matrix};
