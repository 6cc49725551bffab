use flexion_core::Observer;

use crate::traits::{HasIteration, HasResidual, HasUnconverged};

/// Progress of one solver iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub iter: usize,
    pub residual: f64,
    pub unconverged: usize,
}

/// Records a [`Record`] for every observed event and never acts.
///
/// Pass `&mut history` to a solver to inspect the records after it returns.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<Record>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent record, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    /// Returns true if the residual never grew between consecutive records.
    #[must_use]
    pub fn is_monotone(&self) -> bool {
        self.records
            .windows(2)
            .all(|pair| pair[1].residual <= pair[0].residual)
    }
}

impl<E, A> Observer<E, A> for History
where
    E: HasIteration + HasResidual + HasUnconverged,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.records.push(Record {
            iter: event.iteration(),
            residual: event.residual(),
            unconverged: event.unconverged(),
        });
        None
    }
}

impl<E, A> Observer<E, A> for &mut History
where
    E: HasIteration + HasResidual + HasUnconverged,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).observe(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use flexion_solvers::equation::newton::{self, EntryStatus};
    use ndarray::array;

    fn feed(history: &mut History, iter: usize, residuals: ndarray::Array1<f64>) {
        let x = ndarray::Array1::zeros(residuals.len());
        let entries: Vec<_> = residuals
            .iter()
            .map(|r| {
                if r.abs() < 1e-9 {
                    EntryStatus::Converged
                } else {
                    EntryStatus::Unconverged
                }
            })
            .collect();
        let event = newton::Event {
            iter,
            x: &x,
            residuals: &residuals,
            steps: &x,
            entries: &entries,
        };
        let _: Option<newton::Action> = history.observe(&event);
    }

    #[test]
    fn records_newton_progress() {
        let mut history = History::new();
        assert!(history.is_empty());

        feed(&mut history, 1, array![0.5, -2.0, 0.0]);
        feed(&mut history, 2, array![0.1, 0.0, 0.0]);

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.records()[0],
            Record {
                iter: 1,
                residual: 2.0,
                unconverged: 2
            }
        );
        assert_eq!(history.last().map(|r| r.unconverged), Some(1));
        assert!(history.is_monotone());

        feed(&mut history, 3, array![0.3, 0.0, 0.0]);
        assert!(!history.is_monotone());
    }
}
