use flexion_core::Observer;

use crate::traits::{CanStopEarly, HasResidual};

/// Stops a solver once its residual drops to `target`.
///
/// Useful for a coarse first pass where the solver's own tolerances are
/// tighter than the caller needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualTarget {
    pub target: f64,
}

impl ResidualTarget {
    #[must_use]
    pub fn new(target: f64) -> Self {
        Self { target }
    }
}

impl<E: HasResidual, A: CanStopEarly> Observer<E, A> for ResidualTarget {
    fn observe(&mut self, event: &E) -> Option<A> {
        (event.residual() <= self.target).then(A::stop_early)
    }
}
