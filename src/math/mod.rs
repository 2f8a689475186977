pub mod matrix;
pub mod derivative;

pub use matrix::Matrix;
pub use derivative::{derivative, gradient, partial_derivative, EPSILON};
