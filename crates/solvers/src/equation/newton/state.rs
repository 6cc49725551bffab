use ndarray::{Array1, Zip};

use crate::equation::Evaluation;

use super::{Config, EntryStatus, Solution, Status};

/// Current iterate plus per-entry convergence bookkeeping.
pub(super) struct State<I, O> {
    current: Evaluation<I, O>,
    entries: Vec<EntryStatus>,
}

impl<I, O> State<I, O> {
    /// Classifies the seed evaluation.
    pub(super) fn new(current: Evaluation<I, O>, config: &Config) -> Self {
        let entries = current
            .residuals
            .iter()
            .map(|r| {
                if !r.is_finite() {
                    EntryStatus::Stalled
                } else if r.abs() <= config.residual_tol {
                    EntryStatus::Converged
                } else {
                    EntryStatus::Unconverged
                }
            })
            .collect();

        Self { current, entries }
    }

    pub(super) fn x(&self) -> &Array1<f64> {
        &self.current.x
    }

    pub(super) fn residuals(&self) -> &Array1<f64> {
        &self.current.residuals
    }

    pub(super) fn entries(&self) -> &[EntryStatus] {
        &self.entries
    }

    pub(super) fn has_unconverged(&self) -> bool {
        self.entries.contains(&EntryStatus::Unconverged)
    }

    /// Computes full Newton steps, stalling entries without a usable slope.
    ///
    /// Frozen entries get a zero step so their iterate stays put.
    pub(super) fn newton_steps(&mut self, slopes: &Array1<f64>) -> Array1<f64> {
        let mut steps = Array1::zeros(slopes.len());

        for (index, status) in self.entries.iter_mut().enumerate() {
            if *status != EntryStatus::Unconverged {
                continue;
            }
            let slope = slopes[index];
            if slope.is_finite() && slope != 0.0 {
                steps[index] = -self.current.residuals[index] / slope;
            } else {
                *status = EntryStatus::Stalled;
            }
        }

        steps
    }

    /// Returns the iterating entries whose residual magnitude grew in `trial`.
    pub(super) fn worsened(&self, trial: &Array1<f64>) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(index, status)| {
                let new = trial[*index];
                **status == EntryStatus::Unconverged
                    && (!new.is_finite() || new.abs() > self.current.residuals[*index].abs())
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Accepts a trial evaluation and updates entry convergence.
    ///
    /// An unconverged entry whose projected update leaves it exactly where it
    /// was is stalled: its slope and step would repeat on every iteration.
    pub(super) fn accept(&mut self, trial: Evaluation<I, O>, steps: &Array1<f64>, config: &Config) {
        Zip::from(&trial.x)
            .and(&self.current.x)
            .and(&trial.residuals)
            .and(steps)
            .and(&mut self.entries[..])
            .for_each(|&x, &previous, &r, &step, status| {
                if *status != EntryStatus::Unconverged {
                    return;
                }
                #[allow(clippy::float_cmp)]
                let pinned = x == previous;
                if !r.is_finite() {
                    *status = EntryStatus::Stalled;
                } else if r.abs() <= config.residual_tol
                    || step.abs() <= config.x_abs_tol + config.x_rel_tol * x.abs()
                {
                    *status = EntryStatus::Converged;
                } else if pinned {
                    *status = EntryStatus::Stalled;
                }
            });

        self.current = trial;
    }

    /// Finishes with a status derived from the entry states.
    pub(super) fn into_solution(self, iters: usize) -> Solution<I, O> {
        let status = if self.has_unconverged() {
            Status::MaxIters
        } else if self.entries.contains(&EntryStatus::Stalled) {
            Status::Stalled
        } else {
            Status::Converged
        };
        self.finish(status, iters)
    }

    pub(super) fn into_stopped(self, iters: usize) -> Solution<I, O> {
        self.finish(Status::StoppedByObserver, iters)
    }

    fn finish(self, status: Status, iters: usize) -> Solution<I, O> {
        Solution {
            status,
            x: self.current.x,
            residuals: self.current.residuals,
            entries: self.entries,
            snapshot: self.current.snapshot,
            iters,
        }
    }
}
