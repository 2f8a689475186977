/// Scalar loss over a batch: `labels` are the ground truth, `predictions` the
/// model output for the same rows, in the same order.
pub trait Loss {
    fn evaluate(&self, labels: &[f64], predictions: &[f64]) -> f64;
}

impl<F> Loss for F
where
    F: Fn(&[f64], &[f64]) -> f64,
{
    fn evaluate(&self, labels: &[f64], predictions: &[f64]) -> f64 {
        self(labels, predictions)
    }
}
