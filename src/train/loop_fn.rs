use std::time::Instant;

use tracing::{debug, info};

use crate::error::{FitError, Result};
use crate::network::network::{check_examples, Network};
use crate::optim::schedule::{checked_rate, LearningRateSchedule};
use crate::train::epoch_stats::{EpochStats, TrainReport};
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_epoch;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` as described by `config`.
pub fn train_network(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<TrainReport> {
    let mut schedule = config.schedule.build()?;
    train_loop(network, inputs, targets, &mut *schedule, config.epochs, config.log_every)
}

/// Runs `epochs` online epochs over `inputs` / `targets`.
///
/// # Arguments
/// - `network`   — modified in place
/// - `inputs`    — one row per example, `network.input_size()` wide
/// - `targets`   — one row per example, `network.output_size()` wide
/// - `schedule`  — evaluated once per epoch with the 0-based epoch index
/// - `epochs`    — epoch budget; an adaptive schedule may extend it up to 2x
/// - `log_every` — `debug!` cadence in epochs; `0` disables
///
/// Every row is validated before any weight changes, so a malformed dataset
/// leaves the network untouched.
///
/// # Errors
/// - `InvalidArgument` for empty or unequal-length data or `epochs == 0`
/// - `DimensionMismatch` if a row's width disagrees with the network
/// - `InvalidSchedule` if the schedule yields a negative rate
/// - `NumericInstability` if an epoch's loss is not finite
pub fn train_loop<S>(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    schedule: &mut S,
    epochs: usize,
    log_every: usize,
) -> Result<TrainReport>
where
    S: LearningRateSchedule + ?Sized,
{
    check_examples(inputs, targets)?;
    if epochs == 0 {
        return Err(FitError::InvalidArgument("epochs must be positive".into()));
    }
    check_widths(network, inputs, targets)?;

    let budget_cap = epochs.saturating_mul(2);
    let mut budget = epochs;
    let mut history = Vec::new();
    let mut previous_loss = f64::INFINITY;
    let mut epoch = 0;

    while epoch < budget {
        let learning_rate = checked_rate(schedule, epoch)?;
        let t_start = Instant::now();

        let train_loss = train_epoch(network, inputs, targets, learning_rate)?;
        if !train_loss.is_finite() {
            return Err(FitError::NumericInstability(format!(
                "training loss became {train_loss} in epoch {}",
                epoch + 1
            )));
        }

        let stats = EpochStats {
            epoch: epoch + 1,
            total_epochs: budget,
            train_loss,
            learning_rate,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        if log_every > 0 && stats.epoch % log_every == 0 {
            debug!(epoch = stats.epoch, loss = train_loss, learning_rate, "epoch finished");
        }
        history.push(stats);

        let granted = schedule.record_step(train_loss < previous_loss);
        budget = budget.saturating_add(granted).min(budget_cap);
        previous_loss = train_loss;
        epoch += 1;
    }

    info!(epochs = epoch, final_loss = previous_loss, "training finished");

    Ok(TrainReport {
        final_loss: previous_loss,
        epochs_run: epoch,
        history,
    })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn check_widths(network: &Network, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
    if let Some(row) = inputs.iter().find(|row| row.len() != network.input_size()) {
        return Err(FitError::dimension("network input", network.input_size(), row.len()));
    }
    if let Some(row) = targets.iter().find(|row| row.len() != network.output_size()) {
        return Err(FitError::dimension("network target", network.output_size(), row.len()));
    }
    Ok(())
}
