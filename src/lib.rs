pub mod error;
pub mod math;
pub mod activation;
pub mod loss;
pub mod optim;
pub mod data;
pub mod fit;
pub mod network;
pub mod train;
pub mod embedding;

// Convenience re-exports
pub use error::{FitError, Result};
pub use math::matrix::Matrix;
pub use math::derivative::{derivative, gradient, partial_derivative};
pub use optim::{
    minimize_scalar, AdaptiveRate, ConstantRate, GradientDescent, LearningRateSchedule, Minimum,
    Objective, ScheduleConfig, StepDecay, Termination,
};
pub use data::{read_dataset, Dataset};
pub use fit::{linear_regression, logistic_regression, polynomial_regression, Fit, ModelFitter};
pub use network::network::Network;
pub use loss::{BceLoss, MaeLoss, MseLoss};
pub use train::{train_network, TrainConfig, TrainReport};
