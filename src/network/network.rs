use rand::Rng;
use tracing::debug;

use crate::activation::sigmoid::Sigmoid;
use crate::error::{FitError, Result};
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::trace::ActivationTrace;

/// Fully connected sigmoid network without biases.
///
/// Weight matrix `l` is `width(l) x width(l + 1)`; adjacent matrices always
/// chain (`cols` of one equals `rows` of the next). The stack is owned by the
/// caller and is not synchronized: concurrent training over one network needs
/// external locking.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    weights: Vec<Matrix>,
}

impl Network {
    /// Builds a network for `layer_sizes` (at least two widths, all positive)
    /// with every weight drawn uniformly from `[0, 1)`.
    pub fn new<R: Rng + ?Sized>(layer_sizes: &[usize], rng: &mut R) -> Result<Network> {
        if layer_sizes.len() < 2 {
            return Err(FitError::InvalidArgument(format!(
                "a network needs at least two layers, got {}",
                layer_sizes.len()
            )));
        }
        if layer_sizes.contains(&0) {
            return Err(FitError::InvalidArgument("layer widths must be positive".into()));
        }

        let weights = layer_sizes
            .windows(2)
            .map(|pair| Matrix::random(pair[0], pair[1], &mut *rng))
            .collect();

        debug!(?layer_sizes, "initialized network");
        Ok(Network { weights })
    }

    /// Wraps an existing weight stack after checking its connectivity.
    pub fn from_weights(weights: Vec<Matrix>) -> Result<Network> {
        if weights.is_empty() {
            return Err(FitError::InvalidArgument("weight stack must not be empty".into()));
        }
        if let Some(m) = weights.iter().find(|m| m.rows == 0 || m.cols == 0) {
            return Err(FitError::InvalidArgument(format!(
                "weight matrix has empty shape {}x{}",
                m.rows, m.cols
            )));
        }
        for pair in weights.windows(2) {
            if pair[0].cols != pair[1].rows {
                return Err(FitError::dimension("weight stack connectivity", pair[0].cols, pair[1].rows));
            }
        }

        Ok(Network { weights })
    }

    pub fn weights(&self) -> &[Matrix] {
        &self.weights
    }

    /// Widths of every layer, input first.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.weights.iter().map(|w| w.rows).collect();
        sizes.push(self.output_size());
        sizes
    }

    pub fn input_size(&self) -> usize {
        self.weights[0].rows
    }

    pub fn output_size(&self) -> usize {
        self.weights[self.weights.len() - 1].cols
    }

    /// Forward pass over one or more input rows, recording every
    /// pre-activation and activation.
    pub fn feedforward(&self, inputs: &Matrix) -> Result<ActivationTrace> {
        if inputs.cols != self.input_size() {
            return Err(FitError::dimension("network input", self.input_size(), inputs.cols));
        }

        let mut pre_activations = Vec::with_capacity(self.weights.len());
        let mut activations = Vec::with_capacity(self.weights.len() + 1);
        activations.push(inputs.clone());

        for w in &self.weights {
            let z = activations[activations.len() - 1].matmul(w)?;
            activations.push(z.map(Sigmoid::function));
            pre_activations.push(z);
        }

        Ok(ActivationTrace { pre_activations, activations })
    }

    /// Output activations for a single input row.
    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        let trace = self.feedforward(&Matrix::row(input.to_vec()))?;
        Ok(trace.output().data[0].clone())
    }

    /// One online update from a single example; returns the example's mean
    /// squared error measured before the update.
    ///
    /// Sign convention: the output error is `target − output`, and weight
    /// updates are *added*:
    ///
    /// ```text
    /// δ_out = (target − a_out) ⊙ a_out(1 − a_out)
    /// δ_l   = (δ_{l+1} · W_lᵀ) ⊙ a_l(1 − a_l)
    /// W_l  += rate · a_lᵀ · δ_{l+1}
    /// ```
    ///
    /// which is gradient descent on ½·squared error. Flipping only one of the
    /// two signs makes training ascend the error.
    pub fn backpropagation(&mut self, features: &[f64], target: &[f64], learning_rate: f64) -> Result<f64> {
        if target.len() != self.output_size() {
            return Err(FitError::dimension("network target", self.output_size(), target.len()));
        }
        if learning_rate.is_nan() || learning_rate < 0.0 {
            return Err(FitError::InvalidArgument(format!(
                "learning rate must be non-negative, got {learning_rate}"
            )));
        }

        let trace = self.feedforward(&Matrix::row(features.to_vec()))?;
        let output = trace.output();
        let target = Matrix::row(target.to_vec());
        let loss = MseLoss::loss(&target.data[0], &output.data[0]);

        let depth = self.weights.len();
        // deltas[k] is the error signal of activation `depth - k`.
        let mut deltas: Vec<Matrix> = Vec::with_capacity(depth);
        deltas.push(
            target.sub(output)?
                .hadamard(&output.map(Sigmoid::derivative_from_output))?,
        );

        for l in (1..depth).rev() {
            let downstream = &deltas[deltas.len() - 1];
            let delta = downstream
                .matmul(&self.weights[l].transpose())?
                .hadamard(&trace.activations[l].map(Sigmoid::derivative_from_output))?;
            deltas.push(delta);
        }
        deltas.reverse();

        for (l, delta) in deltas.iter().enumerate() {
            let update = trace.activations[l].transpose().matmul(delta)?.scale(learning_rate);
            self.weights[l] = self.weights[l].add(&update)?;
        }

        Ok(loss)
    }

    /// Mean squared error of the network over `inputs` / `targets`.
    pub fn mean_squared_error(&self, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<f64> {
        check_examples(inputs, targets)?;

        let trace = self.feedforward(&Matrix::from_data(inputs.to_vec())?)?;
        let expected = Matrix::from_data(targets.to_vec())?;
        let output = trace.output();
        if expected.cols != output.cols {
            return Err(FitError::dimension("network target", output.cols, expected.cols));
        }

        Ok(expected.sub(output)?.map(|e| e * e).mean())
    }
}

/// Shared validation for paired input/target rows.
pub(crate) fn check_examples(inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
    if inputs.is_empty() {
        return Err(FitError::InvalidArgument("dataset must not be empty".into()));
    }
    if inputs.len() != targets.len() {
        return Err(FitError::InvalidArgument(format!(
            "{} inputs but {} targets",
            inputs.len(),
            targets.len()
        )));
    }
    Ok(())
}
