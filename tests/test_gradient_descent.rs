// Optimizer behaviour: convergence, best-point tracking and termination.

use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use gradfit::optim::AnalyticObjective;
use gradfit::{
    minimize_scalar, AdaptiveRate, ConstantRate, FitError, GradientDescent, StepDecay, Termination,
};

fn shifted_square(xs: &[f64]) -> f64 {
    (xs[0] - 1.0).powi(2)
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn minimize_scalar_finds_cosine_minimum() {
    let x = minimize_scalar(f64::cos, 2.0).unwrap();
    assert!((x - PI).abs() < 1e-2, "x = {x}");
    assert_abs_diff_eq!(x.cos(), -1.0, epsilon = 1e-3);
}

#[test]
fn quadratic_bowl_converges_with_step_decay() {
    let f = |xs: &[f64]| (xs[0] - 3.0).powi(2) + 2.0 * (xs[1] + 1.0).powi(2);
    let mut schedule = StepDecay::new(0.1, 0.5, 1024).unwrap();
    let min = GradientDescent::new(4096).minimize(&f, &[0.0, 0.0], &mut schedule).unwrap();
    assert_abs_diff_eq!(min.params[0], 3.0, epsilon = 1e-4);
    assert_abs_diff_eq!(min.params[1], -1.0, epsilon = 1e-4);
}

#[test]
fn closure_schedule_is_accepted() {
    let mut schedule = |_j: usize| 0.25;
    let min = GradientDescent::new(200).minimize(&shifted_square, &[5.0], &mut schedule).unwrap();
    assert_abs_diff_eq!(min.params[0], 1.0, epsilon = 1e-6);
}

#[test]
fn analytic_gradient_is_used() {
    let objective = AnalyticObjective::new(shifted_square, |xs: &[f64]| vec![2.0 * (xs[0] - 1.0)]);
    let mut schedule = ConstantRate::new(0.5);
    let min = GradientDescent::new(10).minimize(&objective, &[7.0], &mut schedule).unwrap();
    // Rate 0.5 on this objective lands on the minimum in one step.
    assert_eq!(min.params, vec![1.0]);
    assert_eq!(min.loss, 0.0);
    assert_eq!(min.termination, Termination::ZeroGradient);
    assert_eq!(min.iterations, 2);
}

// ============================================================================
// Overshoot and divergence
// ============================================================================

#[test]
fn overshooting_rate_never_returns_worse_than_initial() {
    let initial_loss = shifted_square(&[3.0]);
    let mut schedule = ConstantRate::new(1.5);
    let min = GradientDescent::new(50).minimize(&shifted_square, &[3.0], &mut schedule).unwrap();
    assert!(min.loss <= initial_loss);
    assert_eq!(min.params, vec![3.0]);
}

#[test]
fn divergence_keeps_best_point() {
    let objective = AnalyticObjective::new(shifted_square, |xs: &[f64]| vec![2.0 * (xs[0] - 1.0)]);
    let mut schedule = ConstantRate::new(1.5);
    let min = GradientDescent::new(2000).minimize(&objective, &[3.0], &mut schedule).unwrap();
    assert_eq!(min.termination, Termination::Diverged);
    assert_eq!(min.params, vec![3.0]);
    assert_eq!(min.loss, 4.0);
    assert!(min.iterations < 2000);
}

#[test]
fn adaptive_rate_recovers_from_overshoot() {
    let mut schedule = AdaptiveRate::new(1.5);
    assert_eq!(schedule.current(), 1.0);
    let min = GradientDescent::new(100).minimize(&shifted_square, &[3.0], &mut schedule).unwrap();
    assert_abs_diff_eq!(min.params[0], 1.0, epsilon = 1e-6);
    assert!(schedule.current() < 1.0);
}

// ============================================================================
// Termination and validation
// ============================================================================

#[test]
fn max_iterations_is_reported() {
    let mut schedule = ConstantRate::new(1e-6);
    let min = GradientDescent::new(5).minimize(&shifted_square, &[3.0], &mut schedule).unwrap();
    assert_eq!(min.termination, Termination::MaxIterations);
    assert_eq!(min.iterations, 5);
    assert!(min.loss < 4.0);
}

#[test]
fn rate_floor_stops_the_run() {
    let mut schedule = |j: usize| if j == 0 { 0.1 } else { 1e-20 };
    let min = GradientDescent::new(100).minimize(&shifted_square, &[3.0], &mut schedule).unwrap();
    assert_eq!(min.termination, Termination::RateFloor);
    // Step j runs at schedule(j - 1) (schedule(0) for the first two steps),
    // so the tiny rate is first read after the second step.
    assert_eq!(min.iterations, 2);
}

#[test]
fn rate_floor_check_can_be_disabled() {
    let mut schedule = |j: usize| if j == 0 { 0.1 } else { 1e-20 };
    let min = GradientDescent::new(20)
        .stop_on_tiny_rate(false)
        .minimize(&shifted_square, &[3.0], &mut schedule)
        .unwrap();
    assert_eq!(min.termination, Termination::MaxIterations);
    assert_eq!(min.iterations, 20);
}

#[test]
fn negative_rate_is_rejected() {
    let mut schedule = |_j: usize| -0.1;
    match GradientDescent::new(10).minimize(&shifted_square, &[3.0], &mut schedule) {
        Err(FitError::InvalidSchedule { iteration, rate }) => {
            assert_eq!(iteration, 0);
            assert_eq!(rate, -0.1);
        }
        other => panic!("expected InvalidSchedule, got {other:?}"),
    }
}

#[test]
fn empty_parameters_and_zero_budget_are_rejected() {
    let mut schedule = ConstantRate::new(0.1);
    assert!(matches!(
        GradientDescent::new(10).minimize(&shifted_square, &[], &mut schedule),
        Err(FitError::InvalidArgument(_))
    ));
    assert!(matches!(
        GradientDescent::new(0).minimize(&shifted_square, &[1.0], &mut schedule),
        Err(FitError::InvalidArgument(_))
    ));
}

#[test]
fn non_finite_initial_loss_is_numeric_instability() {
    let f = |xs: &[f64]| xs[0].ln();
    let mut schedule = ConstantRate::new(0.1);
    assert!(matches!(
        GradientDescent::new(10).minimize(&f, &[-1.0], &mut schedule),
        Err(FitError::NumericInstability(_))
    ));
}

#[test]
fn wrong_gradient_length_is_dimension_mismatch() {
    let objective = AnalyticObjective::new(shifted_square, |_xs: &[f64]| vec![0.0, 0.0]);
    let mut schedule = ConstantRate::new(0.1);
    assert!(matches!(
        GradientDescent::new(10).minimize(&objective, &[3.0], &mut schedule),
        Err(FitError::DimensionMismatch { .. })
    ));
}
