use crate::ops::Matrix;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Biases are drawn from `[-BIAS_INIT_BOUND, BIAS_INIT_BOUND]`.
pub const BIAS_INIT_BOUND: f64 = 0.1;

/// Glorot/Xavier bound `sqrt(6 / (fan_in + fan_out))`.
///
/// Falls back to `0.5` when both fans are zero.
pub fn glorot_limit(fan_in: usize, fan_out: usize) -> f64 {
    let fans = fan_in + fan_out;
    if fans > 0 {
        (6.0 / fans as f64).sqrt()
    } else {
        0.5
    }
}

/// Fills a `fan_in × fan_out` weight matrix with Glorot-uniform values.
pub fn xavier_uniform<R: Rng + ?Sized>(fan_in: usize, fan_out: usize, rng: &mut R) -> Matrix {
    let limit = glorot_limit(fan_in, fan_out);
    let dist = Uniform::new_inclusive(-limit, limit);
    let mut weights = Matrix::zeros(fan_in, fan_out);
    for r in 0..fan_in {
        for c in 0..fan_out {
            weights[(r, c)] = dist.sample(rng);
        }
    }
    weights
}

/// Vector of `len` values drawn uniformly from `[-bound, bound]`.
pub fn uniform_vector<R: Rng + ?Sized>(len: usize, bound: f64, rng: &mut R) -> Vec<f64> {
    let dist = Uniform::new_inclusive(-bound, bound);
    (0..len).map(|_| dist.sample(rng)).collect()
}

/// Default bias initialization for a layer of `len` neurons.
pub fn bias_uniform<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f64> {
    uniform_vector(len, BIAS_INIT_BOUND, rng)
}

// --- Tests ---
#[cfg(test)]
#[path = "init_test.rs"]
mod tests; // Link to the test file
