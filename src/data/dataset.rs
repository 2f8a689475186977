use crate::error::{FitError, Result};

/// Ordered `(features, label)` rows sharing one feature arity.
///
/// Construction validates the rows, so every `Dataset` in hand is non-empty,
/// has one label per row and a uniform feature width.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    labels: Vec<f64>,
}

impl Dataset {
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<f64>) -> Result<Dataset> {
        if features.is_empty() || labels.is_empty() {
            return Err(FitError::InvalidArgument("dataset must not be empty".into()));
        }
        if features.len() != labels.len() {
            return Err(FitError::InvalidArgument(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        let arity = features[0].len();
        if let Some(row) = features.iter().position(|row| row.len() != arity) {
            return Err(FitError::InvalidArgument(format!(
                "row {} has {} features, expected {}",
                row,
                features[row].len(),
                arity
            )));
        }

        Ok(Dataset { features, labels })
    }

    /// One-feature dataset from parallel `xs` / `ys` slices.
    pub fn from_scalars(xs: &[f64], ys: &[f64]) -> Result<Dataset> {
        Dataset::new(xs.iter().map(|&x| vec![x]).collect(), ys.to_vec())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of features per row.
    pub fn arity(&self) -> usize {
        self.features[0].len()
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Labels as single-column rows, the target shape the network expects.
    pub fn label_rows(&self) -> Vec<Vec<f64>> {
        self.labels.iter().map(|&y| vec![y]).collect()
    }

    /// Row indices of the minibatch used at `iteration`.
    ///
    /// The window starts at `(iteration * batch_size) mod len` and wraps around
    /// the end of the dataset, so the batch is a pure function of the
    /// iteration index. `batch_size` is clamped to the dataset length.
    pub fn batch_indices(&self, iteration: usize, batch_size: usize) -> impl Iterator<Item = usize> {
        let n = self.len();
        let size = batch_size.min(n);
        let start = (iteration % n) * (size % n) % n;
        (0..size).map(move |k| (start + k) % n)
    }
}
