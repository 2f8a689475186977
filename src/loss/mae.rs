use crate::loss::loss_fn::Loss;

pub struct MaeLoss;

impl MaeLoss {
    /// Scalar MAE: mean(|label - prediction|)
    pub fn loss(labels: &[f64], predictions: &[f64]) -> f64 {
        let n = labels.len() as f64;
        labels.iter().zip(predictions.iter())
            .map(|(y, p)| (y - p).abs())
            .sum::<f64>() / n
    }
}

impl Loss for MaeLoss {
    fn evaluate(&self, labels: &[f64], predictions: &[f64]) -> f64 {
        MaeLoss::loss(labels, predictions)
    }
}
