pub mod schedule;
pub mod objective;
pub mod gradient_descent;

pub use schedule::{AdaptiveRate, ConstantRate, LearningRateSchedule, ScheduleConfig, StepDecay};
pub use objective::{AnalyticObjective, Objective};
pub use gradient_descent::{minimize_scalar, GradientDescent, Minimum, Termination, RATE_FLOOR};
