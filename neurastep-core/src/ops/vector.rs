// neurastep-core/src/ops/vector.rs

//! Element-wise operations on plain `f64` vectors.
//!
//! Every binary operation checks that both operands have the same length
//! and fails with `NeuraStepError::DimensionMismatch` otherwise. Nothing is
//! truncated or padded.

use crate::error::NeuraStepError;

fn check_same_len(operation: &str, a: &[f64], b: &[f64]) -> Result<(), NeuraStepError> {
    if a.len() != b.len() {
        return Err(NeuraStepError::dimension(operation, a.len(), b.len()));
    }
    Ok(())
}

/// `a + b`, element-wise.
pub fn add(a: &[f64], b: &[f64]) -> Result<Vec<f64>, NeuraStepError> {
    check_same_len("vector add", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

/// `a - b`, element-wise.
pub fn sub(a: &[f64], b: &[f64]) -> Result<Vec<f64>, NeuraStepError> {
    check_same_len("vector sub", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

/// Hadamard product `a ⊙ b`.
pub fn mul(a: &[f64], b: &[f64]) -> Result<Vec<f64>, NeuraStepError> {
    check_same_len("vector mul", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).collect())
}

pub fn scale(scalar: f64, a: &[f64]) -> Vec<f64> {
    a.iter().map(|x| scalar * x).collect()
}

/// Index of the first maximal element, `None` for an empty slice.
pub fn argmax(a: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in a.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
#[path = "vector_test.rs"]
mod tests;
