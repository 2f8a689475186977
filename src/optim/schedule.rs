use serde::{Serialize, Deserialize};

use crate::error::{FitError, Result};

/// Maps an iteration (or epoch) index to a learning rate.
///
/// Rates must be non-negative; the optimizer and the network trainer reject a
/// negative rate with `FitError::InvalidSchedule`. Any `Fn(usize) -> f64`
/// closure is a schedule.
pub trait LearningRateSchedule {
    fn rate(&self, iteration: usize) -> f64;

    /// Feedback from the optimizer after each step: `improved` is whether the
    /// step lowered the loss relative to the previous iterate. Returns the
    /// number of extra iterations the schedule asks the optimizer to grant.
    fn record_step(&mut self, _improved: bool) -> usize {
        0
    }
}

impl<F> LearningRateSchedule for F
where
    F: Fn(usize) -> f64,
{
    fn rate(&self, iteration: usize) -> f64 {
        self(iteration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantRate {
    pub rate: f64,
}

impl ConstantRate {
    pub fn new(rate: f64) -> ConstantRate {
        ConstantRate { rate }
    }
}

impl LearningRateSchedule for ConstantRate {
    fn rate(&self, _iteration: usize) -> f64 {
        self.rate
    }
}

/// `initial` at iteration 0, then `initial * decay^((1 + j) / epochs_drop)`.
///
/// The exponent is real-valued, so the rate decays smoothly and halves (for
/// `decay = 0.5`) every `epochs_drop` iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepDecay {
    pub initial: f64,
    pub decay: f64,
    pub epochs_drop: usize,
}

impl StepDecay {
    pub fn new(initial: f64, decay: f64, epochs_drop: usize) -> Result<StepDecay> {
        if epochs_drop == 0 {
            return Err(FitError::InvalidArgument("epochs_drop must be at least 1".into()));
        }
        Ok(StepDecay { initial, decay, epochs_drop })
    }
}

impl LearningRateSchedule for StepDecay {
    fn rate(&self, iteration: usize) -> f64 {
        if iteration == 0 {
            return self.initial;
        }
        let exponent = (1 + iteration) as f64 / self.epochs_drop as f64;
        self.initial * self.decay.powf(exponent)
    }
}

/// Halves the rate after every step that fails to improve the loss and asks
/// for one replacement iteration each time. The rate stays within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveRate {
    current: f64,
}

impl AdaptiveRate {
    pub fn new(initial: f64) -> AdaptiveRate {
        AdaptiveRate { current: initial.clamp(0.0, 1.0) }
    }

    pub fn current(&self) -> f64 {
        self.current
    }
}

impl LearningRateSchedule for AdaptiveRate {
    fn rate(&self, _iteration: usize) -> f64 {
        self.current
    }

    fn record_step(&mut self, improved: bool) -> usize {
        if improved {
            return 0;
        }
        self.current = (self.current * 0.5).clamp(0.0, 1.0);
        1
    }
}

/// Serializable description of a schedule, used by `TrainConfig` and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleConfig {
    Constant { rate: f64 },
    StepDecay { initial: f64, decay: f64, epochs_drop: usize },
    Adaptive { initial: f64 },
}

impl ScheduleConfig {
    pub fn build(&self) -> Result<Box<dyn LearningRateSchedule>> {
        Ok(match *self {
            ScheduleConfig::Constant { rate } => Box::new(ConstantRate::new(rate)),
            ScheduleConfig::StepDecay { initial, decay, epochs_drop } => {
                Box::new(StepDecay::new(initial, decay, epochs_drop)?)
            }
            ScheduleConfig::Adaptive { initial } => Box::new(AdaptiveRate::new(initial)),
        })
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig::Constant { rate: 0.1 }
    }
}

/// Reads the rate for `iteration`, rejecting negative (or NaN) values.
pub(crate) fn checked_rate<S>(schedule: &S, iteration: usize) -> Result<f64>
where
    S: LearningRateSchedule + ?Sized,
{
    let rate = schedule.rate(iteration);
    if rate >= 0.0 {
        Ok(rate)
    } else {
        Err(FitError::InvalidSchedule { iteration, rate })
    }
}
