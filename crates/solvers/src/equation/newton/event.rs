use ndarray::Array1;

use super::EntryStatus;

/// Event emitted by the Newton solver after each iteration.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Iteration counter (1-based).
    pub iter: usize,
    /// Accepted iterate for every batch entry.
    pub x: &'a Array1<f64>,
    /// Residuals at the accepted iterate.
    pub residuals: &'a Array1<f64>,
    /// Full Newton steps computed this iteration (zero for frozen entries).
    pub steps: &'a Array1<f64>,
    /// Per-entry status after this iteration.
    pub entries: &'a [EntryStatus],
}

impl Event<'_> {
    /// Returns the largest residual magnitude across the batch.
    #[must_use]
    pub fn max_abs_residual(&self) -> f64 {
        self.residuals
            .iter()
            .fold(0.0_f64, |acc, r| acc.max(r.abs()))
    }

    /// Returns how many entries are still iterating.
    #[must_use]
    pub fn unconverged(&self) -> usize {
        self.entries
            .iter()
            .filter(|status| **status == EntryStatus::Unconverged)
            .count()
    }
}
