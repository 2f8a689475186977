use crate::data::dataset::Dataset;
use crate::error::{FitError, Result};
use crate::fit::fitter::{Fit, ModelFitter, Predictor};
use crate::loss::mae::MaeLoss;
use crate::optim::gradient_descent::GradientDescent;
use crate::optim::schedule::StepDecay;

/// `y = Σ c_k · x^k` over a single feature `x`.
pub struct Polynomial;

impl Predictor for Polynomial {
    fn predict(&self, coeffs: &[f64], features: &[f64]) -> f64 {
        let x = features[0];
        coeffs.iter()
            .enumerate()
            .map(|(k, c)| c * x.powi(k as i32))
            .sum()
    }

    fn validate(&self, param_count: usize, arity: usize) -> Result<()> {
        if arity != 1 {
            return Err(FitError::dimension("polynomial features", 1, arity));
        }
        if param_count == 0 {
            return Err(FitError::InvalidArgument("polynomial needs at least one coefficient".into()));
        }
        Ok(())
    }
}

/// Fits a polynomial of `degree` to `(xs, ys)` under mean absolute error.
///
/// Coefficients start at zero and are returned lowest power first. Uses step
/// decay (1.0, 0.5, 1024) over 16384 iterations.
pub fn polynomial_regression(xs: &[f64], ys: &[f64], degree: usize) -> Result<Fit> {
    let dataset = Dataset::from_scalars(xs, ys)?;
    let initial = vec![0.0; degree + 1];
    let mut schedule = StepDecay::new(1.0, 0.5, 1024)?;

    ModelFitter::new(Polynomial, MaeLoss)
        .with_optimizer(GradientDescent::new(16384))
        .fit(&dataset, &initial, &mut schedule)
}

/// Straight-line fit `y = c0 + c1 · x`.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Result<Fit> {
    polynomial_regression(xs, ys, 1)
}
