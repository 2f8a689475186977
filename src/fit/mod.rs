pub mod fitter;
pub mod pretty;
pub mod polynomial;
pub mod logistic;

pub use fitter::{Fit, ModelFitter, Predictor};
pub use pretty::{prettify, PrettySearch, MAX_PRETTY_PARAMS};
pub use polynomial::{linear_regression, polynomial_regression, Polynomial};
pub use logistic::{logistic_regression, Logistic};
