use crate::error::Result;
use crate::network::network::{check_examples, Network};

/// One online pass: a `backpropagation` call per example, in dataset order,
/// all at `learning_rate`. Returns the mean pre-update loss.
pub fn train_epoch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    learning_rate: f64,
) -> Result<f64> {
    check_examples(inputs, targets)?;

    let mut total_loss = 0.0;

    for (input, target) in inputs.iter().zip(targets.iter()) {
        total_loss += network.backpropagation(input, target, learning_rate)?;
    }

    Ok(total_loss / inputs.len() as f64)
}
