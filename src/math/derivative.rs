//! Central-difference differentiation.
//!
//! All derivatives in the crate share the step [`EPSILON`]. The central
//! difference has O(ε²) truncation error, so for smooth functions such as
//! `sin`/`cos` the estimate stays within ~1e-8 of the analytic value; test
//! tolerances are calibrated against this step.

use crate::error::{FitError, Result};

/// Finite-difference step used by every derivative estimate.
pub const EPSILON: f64 = 1e-4;

/// Partial derivative of `f` at `xs` with respect to coordinate `index`:
/// `(f(xs + ε·e_i) − f(xs − ε·e_i)) / 2ε`.
pub fn partial_derivative<F>(f: F, xs: &[f64], index: usize) -> Result<f64>
where
    F: Fn(&[f64]) -> f64,
{
    if index >= xs.len() {
        return Err(FitError::IndexOutOfBounds { index, len: xs.len() });
    }

    let mut forward = xs.to_vec();
    forward[index] += EPSILON;

    let mut backward = xs.to_vec();
    backward[index] -= EPSILON;

    Ok((f(&forward) - f(&backward)) / (2.0 * EPSILON))
}

/// Every partial derivative of `f` at `xs`.
pub fn gradient<F>(f: F, xs: &[f64]) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let mut probe = xs.to_vec();
    (0..xs.len())
        .map(|i| {
            let x = probe[i];
            probe[i] = x + EPSILON;
            let up = f(&probe);
            probe[i] = x - EPSILON;
            let down = f(&probe);
            probe[i] = x;
            (up - down) / (2.0 * EPSILON)
        })
        .collect()
}

/// Returns the derivative of a single-variable function as a new function.
pub fn derivative<F>(f: F) -> impl Fn(f64) -> f64
where
    F: Fn(f64) -> f64,
{
    move |x| (f(x + EPSILON) - f(x - EPSILON)) / (2.0 * EPSILON)
}
