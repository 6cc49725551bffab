use flexion_core::Snapshot;
use ndarray::Array1;

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every entry converged according to the configured tolerances.
    Converged,

    /// No entry is iterating any more, but at least one stalled.
    Stalled,

    /// Reached the iteration limit with entries still iterating.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// Convergence state of a single batch entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// The entry met the residual or step tolerance.
    Converged,

    /// No usable step: the slope was zero or non-finite, the residual was
    /// non-finite, or the projected update left the entry in place.
    Stalled,

    /// The entry is still iterating (or ran out of iterations).
    Unconverged,
}

/// The result of a batched Newton solve.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// Final solver status.
    pub status: Status,

    /// Last iterate for every entry.
    pub x: Array1<f64>,

    /// Residuals at the last iterate.
    pub residuals: Array1<f64>,

    /// Per-entry convergence state.
    pub entries: Vec<EntryStatus>,

    /// Snapshot at the last iterate.
    pub snapshot: Snapshot<I, O>,

    /// Iteration count when the solver finished.
    pub iters: usize,
}

impl<I, O> Solution<I, O> {
    /// Returns true if the entry at `index` converged.
    #[must_use]
    pub fn is_converged(&self, index: usize) -> bool {
        self.entries.get(index) == Some(&EntryStatus::Converged)
    }

    /// Returns the indices of entries that did not converge.
    pub fn unconverged(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, status)| **status != EntryStatus::Converged)
            .map(|(index, _)| index)
    }
}
