use flexion_core::Observer;

use crate::traits::{HasIteration, HasResidual, HasUnconverged};

/// Emits one `tracing` info event per solver iteration.
///
/// The event carries `iter`, `max_residual`, and `unconverged` fields under
/// the given `label`, so a subscriber can filter one solve from another.
#[derive(Debug, Clone, Copy)]
pub struct TracingObserver {
    label: &'static str,
}

impl TracingObserver {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new("solver")
    }
}

impl<E, A> Observer<E, A> for TracingObserver
where
    E: HasIteration + HasResidual + HasUnconverged,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        tracing::info!(
            label = self.label,
            iter = event.iteration(),
            max_residual = event.residual(),
            unconverged = event.unconverged(),
            "solver_iteration"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Step(usize);

    impl HasIteration for Step {
        fn iteration(&self) -> usize {
            self.0
        }
    }

    impl HasResidual for Step {
        fn residual(&self) -> f64 {
            1.0 / self.0 as f64
        }
    }

    impl HasUnconverged for Step {
        fn unconverged(&self) -> usize {
            3 - self.0.min(3)
        }
    }

    #[test]
    fn logs_without_acting() {
        let mut observer = TracingObserver::new("test");
        assert_eq!(observer.label(), "test");
        for i in 1..=3 {
            let action: Option<()> = observer.observe(&Step(i));
            assert!(action.is_none());
        }
        assert_eq!(TracingObserver::default().label(), "solver");
    }
}
