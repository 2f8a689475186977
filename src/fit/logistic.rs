use crate::activation::sigmoid::Sigmoid;
use crate::data::dataset::Dataset;
use crate::error::{FitError, Result};
use crate::fit::fitter::{Fit, ModelFitter, Predictor};
use crate::loss::bce::BceLoss;
use crate::optim::gradient_descent::GradientDescent;
use crate::optim::schedule::StepDecay;

/// `p = σ(Σ c_k · x_k + bias)`, with the bias stored as the last coefficient.
pub struct Logistic;

impl Logistic {
    /// Decision threshold applied by [`Logistic::classify`].
    pub const THRESHOLD: f64 = 0.5;

    /// Empty `coeffs` score every row as 0.5.
    pub fn probability(coeffs: &[f64], features: &[f64]) -> f64 {
        let (bias, weights) = coeffs.split_last().unwrap_or((&0.0, &[][..]));
        let h: f64 = features.iter().zip(weights.iter()).map(|(x, c)| x * c).sum();
        Sigmoid::function(h + bias)
    }

    pub fn classify(coeffs: &[f64], features: &[f64]) -> bool {
        Logistic::probability(coeffs, features) >= Logistic::THRESHOLD
    }

    /// Fraction of rows whose thresholded prediction matches the label.
    pub fn accuracy(coeffs: &[f64], dataset: &Dataset) -> f64 {
        let correct = dataset.features().iter().zip(dataset.labels().iter())
            .filter(|(x, &y)| Logistic::classify(coeffs, x) == (y >= Logistic::THRESHOLD))
            .count();
        correct as f64 / dataset.len() as f64
    }
}

impl Predictor for Logistic {
    fn predict(&self, coeffs: &[f64], features: &[f64]) -> f64 {
        Logistic::probability(coeffs, features)
    }

    fn validate(&self, param_count: usize, arity: usize) -> Result<()> {
        if param_count != arity + 1 {
            return Err(FitError::dimension("logistic coefficients", arity + 1, param_count));
        }
        Ok(())
    }
}

/// Fits a logistic model to 0/1 labels under clamped binary cross-entropy.
///
/// Returns one coefficient per feature followed by the bias. Uses step decay
/// (0.9, 0.99, 128) over 16348 iterations from all-zero coefficients.
pub fn logistic_regression(dataset: &Dataset) -> Result<Fit> {
    if let Some(bad) = dataset.labels().iter().find(|y| !(0.0..=1.0).contains(*y)) {
        return Err(FitError::InvalidArgument(format!(
            "logistic labels must lie in [0, 1], got {bad}"
        )));
    }

    let initial = vec![0.0; dataset.arity() + 1];
    let mut schedule = StepDecay::new(0.9, 0.99, 128)?;

    ModelFitter::new(Logistic, BceLoss)
        .with_optimizer(GradientDescent::new(16348))
        .fit(dataset, &initial, &mut schedule)
}
