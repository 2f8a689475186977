// Central-difference derivative checks against analytic derivatives.

use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use gradfit::{derivative, gradient, partial_derivative, FitError};

#[test]
fn sin_derivative_matches_cos_over_full_turn() {
    let d_sin = derivative(f64::sin);
    for degree in 0..360 {
        let x = degree as f64 * PI / 180.0;
        assert!((d_sin(x) - x.cos()).abs() < 1e-3, "x = {x}");
    }
}

#[test]
fn cos_derivative_matches_negative_sin_over_full_turn() {
    let d_cos = derivative(f64::cos);
    for degree in 0..360 {
        let x = degree as f64 * PI / 180.0;
        assert!((d_cos(x) + x.sin()).abs() < 1e-3, "x = {x}");
    }
}

#[test]
fn partial_derivatives_of_a_product() {
    let f = |xs: &[f64]| xs[0] * xs[0] * xs[1];
    let at = [3.0, 2.0];
    assert_abs_diff_eq!(partial_derivative(f, &at, 0).unwrap(), 12.0, epsilon = 1e-6);
    assert_abs_diff_eq!(partial_derivative(f, &at, 1).unwrap(), 9.0, epsilon = 1e-6);
}

#[test]
fn gradient_agrees_with_partials() {
    let f = |xs: &[f64]| xs[0].sin() + xs[1] * xs[2];
    let at = [0.3, -1.5, 2.0];
    let g = gradient(f, &at);
    assert_eq!(g.len(), 3);
    for (i, gi) in g.iter().enumerate() {
        assert_abs_diff_eq!(*gi, partial_derivative(f, &at, i).unwrap(), epsilon = 1e-12);
    }
    assert_abs_diff_eq!(g[0], 0.3f64.cos(), epsilon = 1e-6);
}

#[test]
fn partial_derivative_rejects_bad_index() {
    let f = |xs: &[f64]| xs[0];
    match partial_derivative(f, &[1.0, 2.0], 2) {
        Err(FitError::IndexOutOfBounds { index, len }) => {
            assert_eq!(index, 2);
            assert_eq!(len, 2);
        }
        other => panic!("expected IndexOutOfBounds, got {other:?}"),
    }
}
