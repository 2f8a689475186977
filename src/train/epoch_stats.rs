use serde::{Serialize, Deserialize};

/// Per-epoch training statistics recorded by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Epoch budget of this run (may grow under an adaptive schedule).
    pub total_epochs: usize,
    /// Mean per-example squared error over the epoch, measured before each
    /// example's update.
    pub train_loss: f64,
    pub learning_rate: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

/// Summary returned by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    /// Training loss of the last completed epoch.
    pub final_loss: f64,
    pub epochs_run: usize,
    pub history: Vec<EpochStats>,
}
