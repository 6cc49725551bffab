//! Projected Newton iteration for batches of independent scalar equations.
//!
//! # Algorithm
//!
//! Every batch entry runs its own scalar Newton iteration, but all entries
//! share each model evaluation. Per iteration the solver:
//!
//! 1. Estimates each entry's slope with a central finite difference of width
//!    `fd_rel_step * max(|x|, bounds width)`, falling back to a one-sided
//!    difference when a bound is touched.
//! 2. Computes the Newton step `-r / slope` and projects the update onto the
//!    bounds.
//! 3. Halves the step of any entry whose residual magnitude grew, up to
//!    `max_halvings` times.
//! 4. Freezes entries that converged, either on `|r| <= residual_tol` or on a
//!    full Newton step no larger than `x_abs_tol + x_rel_tol * |x|`.
//!
//! Entries whose slope is zero or non-finite cannot make progress and are
//! frozen as [`EntryStatus::Stalled`]. So are entries pinned at a bound, whose
//! projected update leaves them exactly in place. Entries still iterating when
//! `max_iters` is reached are returned as [`EntryStatus::Unconverged`] with
//! their last iterate. Neither aborts the other entries.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] after each accepted iteration. Observers can
//! return [`Action::StopEarly`] to halt and receive the current iterate.

mod action;
mod bounds;
mod config;
mod error;
mod event;
mod solution;
mod state;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use bounds::{Bounds, BoundsError};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{EntryStatus, Solution, Status};

use flexion_core::{BatchEquationProblem, Model, Observer};
use ndarray::{Array1, Zip};

use crate::equation::{Evaluation, evaluate};

use state::State;

/// Drives every residual of a batch equation problem toward zero.
///
/// `x0` holds one seed per batch entry and is projected onto `bounds` before
/// the first evaluation. The observer receives an [`Event`] after each
/// iteration.
///
/// # Errors
///
/// Returns an error if the config, bounds, or seeds are invalid, or if the
/// model or problem fails during any evaluation.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    x0: Array1<f64>,
    bounds: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: BatchEquationProblem<Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    config.validate()?;
    let bounds = Bounds::new(bounds)?;

    if x0.is_empty() {
        return Err(Error::EmptyBatch);
    }
    if let Some(index) = x0.iter().position(|value| !value.is_finite()) {
        return Err(Error::NonFiniteSeed {
            index,
            value: x0[index],
        });
    }

    let seed = x0.mapv(|value| bounds.project(value));
    let mut state = State::new(evaluate(model, problem, seed)?, config);

    for iter in 1..=config.max_iters {
        if !state.has_unconverged() {
            return Ok(state.into_solution(iter - 1));
        }

        let slopes = slopes(model, problem, state.x(), &bounds, config)?;
        let steps = state.newton_steps(&slopes);
        let trial = line_search(model, problem, &state, &steps, &bounds, config)?;
        state.accept(trial, &steps, config);

        let event = Event {
            iter,
            x: state.x(),
            residuals: state.residuals(),
            steps: &steps,
            entries: state.entries(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(state.into_stopped(iter));
        }
    }

    Ok(state.into_solution(config.max_iters))
}

/// Runs the batched Newton solver without observation.
///
/// # Errors
///
/// Returns an error if the config, bounds, or seeds are invalid, or if the
/// model or problem fails during any evaluation.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    x0: Array1<f64>,
    bounds: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: BatchEquationProblem<Input = M::Input, Output = M::Output>,
{
    solve(model, problem, x0, bounds, config, ())
}

/// Estimates `dr/dx` for every entry from two perturbed batch evaluations.
fn slopes<M, P>(
    model: &M,
    problem: &P,
    x: &Array1<f64>,
    bounds: &Bounds,
    config: &Config,
) -> Result<Array1<f64>, Error>
where
    M: Model,
    P: BatchEquationProblem<Input = M::Input, Output = M::Output>,
{
    let width = bounds.width();
    let delta = x.mapv(|value| config.fd_rel_step * value.abs().max(width));

    let upper = Zip::from(x)
        .and(&delta)
        .map_collect(|&value, &d| bounds.project(value + d));
    let lower = Zip::from(x)
        .and(&delta)
        .map_collect(|&value, &d| bounds.project(value - d));

    let r_upper = evaluate(model, problem, upper.clone())?.residuals;
    let r_lower = evaluate(model, problem, lower.clone())?.residuals;

    Ok(Zip::from(&r_upper)
        .and(&r_lower)
        .and(&upper)
        .and(&lower)
        .map_collect(|&ru, &rl, &u, &l| (ru - rl) / (u - l)))
}

/// Applies the Newton steps, halving per entry while the residual grows.
fn line_search<M, P>(
    model: &M,
    problem: &P,
    state: &State<M::Input, M::Output>,
    steps: &Array1<f64>,
    bounds: &Bounds,
    config: &Config,
) -> Result<Evaluation<M::Input, M::Output>, Error>
where
    M: Model,
    P: BatchEquationProblem<Input = M::Input, Output = M::Output>,
{
    let mut scale = Array1::<f64>::ones(steps.len());
    let candidate = |scale: &Array1<f64>| {
        Zip::from(state.x())
            .and(steps)
            .and(scale)
            .map_collect(|&x, &step, &s| bounds.project(x + s * step))
    };

    let mut trial = evaluate(model, problem, candidate(&scale))?;

    for _ in 0..config.max_halvings {
        let worse = state.worsened(&trial.residuals);
        if worse.is_empty() {
            break;
        }
        for index in worse {
            scale[index] *= 0.5;
        }
        trial = evaluate(model, problem, candidate(&scale))?;
    }

    Ok(trial)
}
