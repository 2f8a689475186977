use crate::loss::loss_fn::Loss;

pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((label - prediction)²)
    pub fn loss(labels: &[f64], predictions: &[f64]) -> f64 {
        let n = labels.len() as f64;
        labels.iter().zip(predictions.iter())
            .map(|(y, p)| (y - p).powi(2))
            .sum::<f64>() / n
    }
}

impl Loss for MseLoss {
    fn evaluate(&self, labels: &[f64], predictions: &[f64]) -> f64 {
        MseLoss::loss(labels, predictions)
    }
}
