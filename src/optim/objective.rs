use crate::math::derivative;

/// Scalar objective minimized by [`GradientDescent`](super::GradientDescent).
///
/// `iteration` lets minibatched objectives pick their batch as a pure function
/// of the optimizer step; plain objectives ignore it. The default gradient is
/// the central-difference estimate; objectives that know their gradient
/// analytically override it.
pub trait Objective {
    fn evaluate(&self, params: &[f64], iteration: usize) -> f64;

    fn gradient(&self, params: &[f64], iteration: usize) -> Vec<f64> {
        derivative::gradient(|p| self.evaluate(p, iteration), params)
    }
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64,
{
    fn evaluate(&self, params: &[f64], _iteration: usize) -> f64 {
        self(params)
    }
}

/// An objective paired with a caller-supplied analytic gradient.
pub struct AnalyticObjective<F, G> {
    loss: F,
    gradient: G,
}

impl<F, G> AnalyticObjective<F, G>
where
    F: Fn(&[f64]) -> f64,
    G: Fn(&[f64]) -> Vec<f64>,
{
    pub fn new(loss: F, gradient: G) -> Self {
        AnalyticObjective { loss, gradient }
    }
}

impl<F, G> Objective for AnalyticObjective<F, G>
where
    F: Fn(&[f64]) -> f64,
    G: Fn(&[f64]) -> Vec<f64>,
{
    fn evaluate(&self, params: &[f64], _iteration: usize) -> f64 {
        (self.loss)(params)
    }

    fn gradient(&self, params: &[f64], _iteration: usize) -> Vec<f64> {
        (self.gradient)(params)
    }
}
