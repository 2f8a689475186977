use crate::loss::loss_fn::Loss;

pub struct BceLoss;

/// Predictions are clamped into `[PRED_MIN, PRED_MAX]` before taking logs.
pub const PRED_MIN: f64 = 0.001;
pub const PRED_MAX: f64 = 0.999;

impl BceLoss {
    /// Scalar BCE: -mean(y·log(p) + (1-y)·log(1-p)) with p clamped.
    pub fn loss(labels: &[f64], predictions: &[f64]) -> f64 {
        let n = labels.len() as f64;
        labels.iter().zip(predictions.iter())
            .map(|(y, p)| {
                let p = p.clamp(PRED_MIN, PRED_MAX);
                -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
            })
            .sum::<f64>() / n
    }
}

impl Loss for BceLoss {
    fn evaluate(&self, labels: &[f64], predictions: &[f64]) -> f64 {
        BceLoss::loss(labels, predictions)
    }
}
