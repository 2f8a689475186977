use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

use crate::error::{FitError, Result};
use crate::optim::objective::Objective;
use crate::optim::schedule::{checked_rate, LearningRateSchedule, StepDecay};

/// Rates below this stop the run when `stop_on_tiny_rate` is set.
pub const RATE_FLOOR: f64 = 1e-16;

/// Why an optimizer run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Every gradient coordinate was exactly zero.
    ZeroGradient,
    /// The schedule dropped below [`RATE_FLOOR`].
    RateFloor,
    /// The iteration budget ran out.
    MaxIterations,
    /// The loss became NaN or infinite; the best point seen so far is kept.
    Diverged,
}

/// Best point visited during one run. This is not necessarily the final
/// iterate: steps that overshoot are taken but never returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    pub params: Vec<f64>,
    pub loss: f64,
    pub iterations: usize,
    pub termination: Termination,
}

/// Gradient-descent settings.
///
/// # Fields
/// - `max_iterations`        — iteration budget (an adaptive schedule may
///                             extend it, at most doubling it)
/// - `stop_on_zero_gradient` — stop once every partial derivative is `0.0`
/// - `stop_on_tiny_rate`     — stop once the rate drops below [`RATE_FLOOR`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientDescent {
    pub max_iterations: usize,
    pub stop_on_zero_gradient: bool,
    pub stop_on_tiny_rate: bool,
}

impl Default for GradientDescent {
    fn default() -> Self {
        GradientDescent {
            max_iterations: 16384,
            stop_on_zero_gradient: true,
            stop_on_tiny_rate: true,
        }
    }
}

impl GradientDescent {
    pub fn new(max_iterations: usize) -> GradientDescent {
        GradientDescent { max_iterations, ..GradientDescent::default() }
    }

    pub fn stop_on_zero_gradient(mut self, enabled: bool) -> GradientDescent {
        self.stop_on_zero_gradient = enabled;
        self
    }

    pub fn stop_on_tiny_rate(mut self, enabled: bool) -> GradientDescent {
        self.stop_on_tiny_rate = enabled;
        self
    }

    /// Minimizes `objective` starting from `initial`.
    ///
    /// Every step `x -= rate * grad` is applied even if it raises the loss;
    /// the lowest-loss point seen is what gets returned, so the result is
    /// never worse than `initial`.
    ///
    /// # Errors
    /// - `InvalidArgument` if `initial` is empty or `max_iterations == 0`
    /// - `NumericInstability` if the loss at `initial` is not finite
    /// - `InvalidSchedule` if the schedule yields a negative rate
    /// - `DimensionMismatch` if the objective's gradient has the wrong length
    pub fn minimize<O, S>(&self, objective: &O, initial: &[f64], schedule: &mut S) -> Result<Minimum>
    where
        O: Objective + ?Sized,
        S: LearningRateSchedule + ?Sized,
    {
        if initial.is_empty() {
            return Err(FitError::InvalidArgument("parameter vector must not be empty".into()));
        }
        if self.max_iterations == 0 {
            return Err(FitError::InvalidArgument("max_iterations must be positive".into()));
        }

        let mut xs = initial.to_vec();
        let mut best_xs = xs.clone();
        let mut best_y = objective.evaluate(&xs, 0);
        if !best_y.is_finite() {
            return Err(FitError::NumericInstability(format!(
                "loss at the initial parameters is {best_y}"
            )));
        }

        let mut previous_y = best_y;
        let mut rate = checked_rate(schedule, 0)?;
        let budget_cap = self.max_iterations.saturating_mul(2);
        let mut budget = self.max_iterations;
        let mut iterations = 0;
        let mut termination = Termination::MaxIterations;

        while iterations < budget {
            let j = iterations;
            iterations += 1;

            let grad = objective.gradient(&xs, j);
            if grad.len() != xs.len() {
                return Err(FitError::dimension("objective gradient", xs.len(), grad.len()));
            }

            for (x, g) in xs.iter_mut().zip(grad.iter()) {
                *x -= rate * g;
            }

            let y = objective.evaluate(&xs, j);
            if !y.is_finite() {
                warn!(iteration = j, "loss became non-finite, keeping best point");
                termination = Termination::Diverged;
                break;
            }
            if y < best_y {
                best_y = y;
                best_xs.copy_from_slice(&xs);
            }

            let granted = schedule.record_step(y < previous_y);
            budget = budget.saturating_add(granted).min(budget_cap);
            previous_y = y;

            rate = checked_rate(schedule, j)?;

            if self.stop_on_tiny_rate && rate < RATE_FLOOR {
                termination = Termination::RateFloor;
                break;
            }

            if self.stop_on_zero_gradient && grad.iter().all(|&g| g == 0.0) {
                termination = Termination::ZeroGradient;
                break;
            }
        }

        debug!(iterations, loss = best_y, ?termination, "gradient descent finished");

        Ok(Minimum {
            params: best_xs,
            loss: best_y,
            iterations,
            termination,
        })
    }
}

/// Minimizes a single-variable function from `x0` with step decay
/// (1.0, 0.5, 1024) over 16384 iterations.
pub fn minimize_scalar<F>(f: F, x0: f64) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    let objective = |xs: &[f64]| f(xs[0]);
    let mut schedule = StepDecay::new(1.0, 0.5, 1024)?;
    let minimum = GradientDescent::new(16384).minimize(&objective, &[x0], &mut schedule)?;
    Ok(minimum.params[0])
}
