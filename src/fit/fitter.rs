use tracing::info;

use crate::data::dataset::Dataset;
use crate::error::{FitError, Result};
use crate::fit::pretty::{prettify, PrettySearch};
use crate::loss::loss_fn::Loss;
use crate::optim::gradient_descent::{GradientDescent, Termination};
use crate::optim::objective::Objective;
use crate::optim::schedule::LearningRateSchedule;

/// Maps a parameter vector and one row of features to a prediction.
///
/// Any `Fn(&[f64], &[f64]) -> f64` closure is a predictor.
pub trait Predictor {
    fn predict(&self, params: &[f64], features: &[f64]) -> f64;

    /// Checks that `params` can be combined with rows of `arity` features.
    /// Runs once before optimizing, so `predict` may index without checks.
    fn validate(&self, _param_count: usize, _arity: usize) -> Result<()> {
        Ok(())
    }
}

impl<F> Predictor for F
where
    F: Fn(&[f64], &[f64]) -> f64,
{
    fn predict(&self, params: &[f64], features: &[f64]) -> f64 {
        self(params, features)
    }
}

/// Outcome of [`ModelFitter::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Fit {
    /// Fitted parameters (after the pretty-coefficient search).
    pub params: Vec<f64>,
    /// Loss of `params` over the full dataset.
    pub loss: f64,
    pub iterations: usize,
    pub termination: Termination,
    /// Whether the pretty-coefficient search replaced the optimizer's result.
    pub prettified: bool,
}

/// Fits a prediction function to a dataset by minimizing a loss with
/// gradient descent, optionally over cyclic minibatches.
pub struct ModelFitter<P, L> {
    predictor: P,
    loss: L,
    optimizer: GradientDescent,
    batch_size: Option<usize>,
}

impl<P: Predictor, L: Loss> ModelFitter<P, L> {
    pub fn new(predictor: P, loss: L) -> ModelFitter<P, L> {
        ModelFitter {
            predictor,
            loss,
            optimizer: GradientDescent::default(),
            batch_size: None,
        }
    }

    pub fn with_optimizer(mut self, optimizer: GradientDescent) -> ModelFitter<P, L> {
        self.optimizer = optimizer;
        self
    }

    /// Rows per objective evaluation; defaults to the whole dataset.
    pub fn with_batch_size(mut self, batch_size: usize) -> ModelFitter<P, L> {
        self.batch_size = Some(batch_size);
        self
    }

    /// Loss of `params` over every row of `dataset`, after the predictor has
    /// accepted the parameter count and feature arity.
    pub fn loss_on(&self, params: &[f64], dataset: &Dataset) -> Result<f64> {
        self.predictor.validate(params.len(), dataset.arity())?;
        Ok(self.full_loss(params, dataset))
    }

    fn full_loss(&self, params: &[f64], dataset: &Dataset) -> f64 {
        let predictions: Vec<f64> = dataset
            .features()
            .iter()
            .map(|x| self.predictor.predict(params, x))
            .collect();
        self.loss.evaluate(dataset.labels(), &predictions)
    }

    /// Optimizes `initial` against `dataset`, then runs the pretty-coefficient
    /// search over the full dataset.
    ///
    /// # Errors
    /// - `InvalidArgument` for a zero batch size or an empty parameter vector
    /// - whatever the predictor's `validate` reports for the parameter count
    /// - the optimizer's errors (`InvalidSchedule`, `NumericInstability`, ...)
    pub fn fit<S>(&self, dataset: &Dataset, initial: &[f64], schedule: &mut S) -> Result<Fit>
    where
        S: LearningRateSchedule + ?Sized,
    {
        let batch_size = self.batch_size.unwrap_or(dataset.len());
        if batch_size == 0 {
            return Err(FitError::InvalidArgument("batch_size must be positive".into()));
        }
        if initial.is_empty() {
            return Err(FitError::InvalidArgument("initial parameters must not be empty".into()));
        }
        self.predictor.validate(initial.len(), dataset.arity())?;

        let objective = BatchObjective {
            predictor: &self.predictor,
            loss: &self.loss,
            dataset,
            batch_size,
        };
        let minimum = self.optimizer.minimize(&objective, initial, schedule)?;

        let score = |params: &[f64]| self.full_loss(params, dataset);
        let (params, loss, prettified) = match prettify(&minimum.params, score) {
            PrettySearch::Improved { params, loss } => (params, loss, true),
            PrettySearch::Unchanged | PrettySearch::Skipped { .. } => {
                let loss = self.full_loss(&minimum.params, dataset);
                (minimum.params, loss, false)
            }
        };

        info!(
            rows = dataset.len(),
            batch_size,
            iterations = minimum.iterations,
            loss,
            prettified,
            "model fitted"
        );

        Ok(Fit {
            params,
            loss,
            iterations: minimum.iterations,
            termination: minimum.termination,
            prettified,
        })
    }
}

/// Loss over the minibatch selected by the optimizer iteration.
struct BatchObjective<'a, P, L> {
    predictor: &'a P,
    loss: &'a L,
    dataset: &'a Dataset,
    batch_size: usize,
}

impl<P: Predictor, L: Loss> Objective for BatchObjective<'_, P, L> {
    fn evaluate(&self, params: &[f64], iteration: usize) -> f64 {
        let features = self.dataset.features();
        let labels = self.dataset.labels();

        let (batch_labels, predictions): (Vec<f64>, Vec<f64>) = self
            .dataset
            .batch_indices(iteration, self.batch_size)
            .map(|i| (labels[i], self.predictor.predict(params, &features[i])))
            .unzip();

        self.loss.evaluate(&batch_labels, &predictions)
    }
}
