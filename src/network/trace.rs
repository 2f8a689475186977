use crate::math::matrix::Matrix;

/// Everything one forward pass computed, kept for the paired backward pass.
///
/// `activations[0]` is the input itself, so a network with `depth` weight
/// matrices yields `depth + 1` activations and `depth` pre-activations.
/// A trace belongs to a single forward/backward call and is dropped with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationTrace {
    /// `z_l = a_l · W_l`, one per weight matrix.
    pub pre_activations: Vec<Matrix>,
    /// `a_0 = input`, `a_{l+1} = σ(z_l)`.
    pub activations: Vec<Matrix>,
}

impl ActivationTrace {
    /// Activation of the last layer, one row per input row.
    pub fn output(&self) -> &Matrix {
        &self.activations[self.activations.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.pre_activations.len()
    }
}
