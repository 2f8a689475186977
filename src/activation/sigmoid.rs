use std::f64::consts::E;

/// Logistic activation `1 / (1 + e^-x)`, bounded in `(0, 1)`.
pub struct Sigmoid;

impl Sigmoid {
    pub fn function(x: f64) -> f64 {
        1.0 / (1.0 + E.powf(-x))
    }

    /// Derivative expressed through the already-activated value `a = σ(z)`:
    /// `σ'(z) = a · (1 − a)`. Only valid when `a` is itself a sigmoid output.
    pub fn derivative_from_output(a: f64) -> f64 {
        a * (1.0 - a)
    }
}
