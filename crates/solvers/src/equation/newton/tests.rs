use std::convert::Infallible;

use approx::assert_relative_eq;
use ndarray::{Array1, array};
use thiserror::Error;

use flexion_core::{BatchEquationProblem, Model};

use super::{
    Action, BoundsError, Config, ConfigError, EntryStatus, Error, Event, Status, solve,
    solve_unobserved,
};

/// Passes the batch through unchanged.
struct Identity;

impl Model for Identity {
    type Input = Array1<f64>;
    type Output = Array1<f64>;
    type Error = Infallible;

    fn call(&self, x: &Array1<f64>) -> Result<Array1<f64>, Self::Error> {
        Ok(x.clone())
    }
}

/// Residual for entry `i` is `f(i, x_i)`.
struct PerEntry<F>(F);

impl<F> BatchEquationProblem for PerEntry<F>
where
    F: Fn(usize, f64) -> f64,
{
    type Input = Array1<f64>;
    type Output = Array1<f64>;
    type Error = Infallible;

    fn input(&self, x: &Array1<f64>) -> Result<Self::Input, Self::Error> {
        Ok(x.clone())
    }

    fn residuals(
        &self,
        _input: &Array1<f64>,
        output: &Array1<f64>,
    ) -> Result<Array1<f64>, Self::Error> {
        Ok(output
            .iter()
            .enumerate()
            .map(|(index, &x)| (self.0)(index, x))
            .collect())
    }
}

#[test]
fn solves_square_roots_per_entry() {
    let targets = [4.0, 9.0, 16.0];
    let problem = PerEntry(|i: usize, x: f64| x * x - targets[i]);

    let solution = solve_unobserved(
        &Identity,
        &problem,
        array![1.0, 1.0, 1.0],
        [0.0, 10.0],
        &Config::default(),
    )
    .expect("should solve");

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.unconverged().count(), 0);
    assert_relative_eq!(solution.x[0], 2.0, epsilon = 1e-9);
    assert_relative_eq!(solution.x[1], 3.0, epsilon = 1e-9);
    assert_relative_eq!(solution.x[2], 4.0, epsilon = 1e-9);
    assert_eq!(solution.snapshot.output, solution.x);
}

#[test]
fn converged_seed_is_left_untouched() {
    let targets = [4.0, 9.0];
    let problem = PerEntry(|i: usize, x: f64| x * x - targets[i]);

    let solution = solve_unobserved(
        &Identity,
        &problem,
        array![2.0, 1.0],
        [0.0, 10.0],
        &Config::default(),
    )
    .expect("should solve");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x[0], 2.0);
    assert_relative_eq!(solution.x[1], 3.0, epsilon = 1e-9);
}

#[test]
fn halving_rescues_overshooting_newton() {
    // Plain Newton on atan diverges from |x| > 1.39.
    let problem = PerEntry(|_: usize, x: f64| x.atan());

    let solution = solve_unobserved(
        &Identity,
        &problem,
        array![3.0, -2.5],
        [-10.0, 10.0],
        &Config::default(),
    )
    .expect("should solve");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x[0], 0.0, epsilon = 1e-9);
    assert_relative_eq!(solution.x[1], 0.0, epsilon = 1e-9);
}

#[test]
fn seeds_are_projected_onto_bounds() {
    let problem = PerEntry(|_: usize, x: f64| x - 1.0);

    let solution = solve_unobserved(
        &Identity,
        &problem,
        array![-5.0, 7.0],
        [0.0, 2.0],
        &Config::default(),
    )
    .expect("should solve");

    assert_eq!(solution.status, Status::Converged);
    assert!(solution.x.iter().all(|&x| (0.0..=2.0).contains(&x)));
    assert_relative_eq!(solution.x[0], 1.0, epsilon = 1e-10);
    assert_relative_eq!(solution.x[1], 1.0, epsilon = 1e-10);
}

#[test]
fn entry_pinned_at_bound_stalls_early() {
    // Minimum sits below the lower bound, so every step points outward from 0.
    let problem = PerEntry(|i: usize, x: f64| if i == 0 { x * x + 1.0 } else { x - 3.0 });

    let solution = solve_unobserved(
        &Identity,
        &problem,
        array![1.0, 8.0],
        [0.0, 10.0],
        &Config::default(),
    )
    .expect("should run");

    assert_eq!(solution.status, Status::Stalled);
    assert!(solution.iters < Config::default().max_iters);
    assert_eq!(
        solution.entries,
        vec![EntryStatus::Stalled, EntryStatus::Converged]
    );
    assert_relative_eq!(solution.x[0], 0.0);
    assert_relative_eq!(solution.residuals[0], 1.0);
    assert_relative_eq!(solution.x[1], 3.0, epsilon = 1e-10);
}

#[test]
fn moving_entries_exhaust_the_budget() {
    let problem = PerEntry(|_: usize, x: f64| x * x - 2.0);
    let config = Config {
        max_iters: 2,
        ..Config::default()
    };

    let solution = solve_unobserved(&Identity, &problem, array![10.0], [0.0, 100.0], &config)
        .expect("should run");

    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(solution.iters, 2);
    assert_eq!(solution.entries, vec![EntryStatus::Unconverged]);
    assert!(solution.x[0] > 2.0_f64.sqrt());
}

#[test]
fn flat_residual_stalls_without_blocking_others() {
    let problem = PerEntry(|i: usize, x: f64| if i == 0 { x - 1.0 } else { 1.0 });

    let solution = solve_unobserved(
        &Identity,
        &problem,
        array![0.0, 0.5],
        [0.0, 2.0],
        &Config::default(),
    )
    .expect("should run");

    assert_eq!(solution.status, Status::Stalled);
    assert_eq!(
        solution.entries,
        vec![EntryStatus::Converged, EntryStatus::Stalled]
    );
    assert!(solution.is_converged(0));
    assert!(!solution.is_converged(1));
    assert_eq!(solution.unconverged().collect::<Vec<_>>(), vec![1]);
    assert_relative_eq!(solution.x[0], 1.0, epsilon = 1e-10);
    assert_relative_eq!(solution.x[1], 0.5);
}

#[test]
fn observer_sees_shrinking_residuals() {
    let problem = PerEntry(|_: usize, x: f64| x * x - 2.0);
    let mut history = Vec::new();

    let observer = |event: &Event<'_>| {
        history.push((event.iter, event.max_abs_residual(), event.unconverged()));
        None
    };

    let solution = solve(
        &Identity,
        &problem,
        array![1.0],
        [0.0, 4.0],
        &Config::default(),
        observer,
    )
    .expect("should solve");

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(history.len(), solution.iters);
    assert!(history.windows(2).all(|w| w[1].1 <= w[0].1));
    assert_eq!(history.last().map(|h| h.2), Some(0));
}

#[test]
fn observer_can_stop_early() {
    let problem = PerEntry(|_: usize, x: f64| x * x + 1.0);

    let observer = |event: &Event<'_>| (event.iter >= 2).then_some(Action::StopEarly);

    let solution = solve(
        &Identity,
        &problem,
        array![1.0],
        [0.0, 10.0],
        &Config::default(),
        observer,
    )
    .expect("should stop");

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters, 2);
}

#[test]
fn rejects_invalid_inputs() {
    let problem = PerEntry(|_: usize, x: f64| x);
    let config = Config::default();

    let err = solve_unobserved(&Identity, &problem, Array1::zeros(0), [0.0, 1.0], &config)
        .expect_err("empty batch");
    assert!(matches!(err, Error::EmptyBatch));

    let err = solve_unobserved(&Identity, &problem, array![0.5, f64::NAN], [0.0, 1.0], &config)
        .expect_err("non-finite seed");
    assert!(matches!(err, Error::NonFiniteSeed { index: 1, .. }));

    let err = solve_unobserved(&Identity, &problem, array![0.5], [1.0, 1.0], &config)
        .expect_err("zero-width bounds");
    assert!(matches!(err, Error::InvalidBounds(BoundsError::ZeroWidth)));

    let bad = Config {
        x_abs_tol: -1.0,
        ..Config::default()
    };
    let err = solve_unobserved(&Identity, &problem, array![0.5], [0.0, 1.0], &bad)
        .expect_err("invalid config");
    assert!(matches!(err, Error::InvalidConfig(ConfigError::XAbs)));
}

#[derive(Debug, Error)]
#[error("input out of range")]
struct OutOfRange;

/// Fails for any entry above five.
struct Limited;

impl Model for Limited {
    type Input = Array1<f64>;
    type Output = Array1<f64>;
    type Error = OutOfRange;

    fn call(&self, x: &Array1<f64>) -> Result<Array1<f64>, Self::Error> {
        if x.iter().any(|&v| v > 5.0) {
            return Err(OutOfRange);
        }
        Ok(x.clone())
    }
}

#[test]
fn model_errors_propagate() {
    let problem = PerEntry(|_: usize, x: f64| x - 1.0);

    let err = solve_unobserved(&Limited, &problem, array![6.0], [0.0, 10.0], &Config::default())
        .expect_err("model should fail");

    assert!(matches!(err, Error::Model(_)));
}

/// Returns a single residual regardless of batch size.
struct Collapsed;

impl BatchEquationProblem for Collapsed {
    type Input = Array1<f64>;
    type Output = Array1<f64>;
    type Error = Infallible;

    fn input(&self, x: &Array1<f64>) -> Result<Self::Input, Self::Error> {
        Ok(x.clone())
    }

    fn residuals(
        &self,
        _input: &Array1<f64>,
        output: &Array1<f64>,
    ) -> Result<Array1<f64>, Self::Error> {
        Ok(array![output.sum()])
    }
}

#[test]
fn mismatched_residuals_are_rejected() {
    let err = solve_unobserved(
        &Identity,
        &Collapsed,
        array![0.5, 0.5],
        [0.0, 1.0],
        &Config::default(),
    )
    .expect_err("length mismatch");

    assert!(matches!(
        err,
        Error::ResidualLength {
            expected: 2,
            actual: 1
        }
    ));
}
