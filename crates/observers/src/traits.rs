//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, enabling
//! observers to work generically across different solvers.
//!
//! # Event traits
//!
//! - [`HasIteration`]: events that carry an iteration counter
//! - [`HasResidual`]: events that carry a residual magnitude
//! - [`HasUnconverged`]: batch events that count entries still iterating
//!
//! # Action traits
//!
//! - [`CanStopEarly`]: actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use flexion_core::Observer;
//! use flexion_observers::traits::{CanStopEarly, HasUnconverged};
//!
//! /// Stops once at most `tail` entries are still iterating.
//! struct FewLeft {
//!     tail: usize,
//! }
//!
//! impl<E: HasUnconverged, A: CanStopEarly> Observer<E, A> for FewLeft {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.unconverged() <= self.tail).then(A::stop_early)
//!     }
//! }
//! ```

use flexion_solvers::equation::newton;

/// An event that carries a 1-based iteration counter.
pub trait HasIteration {
    fn iteration(&self) -> usize;
}

/// An event that carries a residual value.
pub trait HasResidual {
    /// Returns the residual for this event.
    ///
    /// Batch solvers report the largest magnitude across the batch.
    fn residual(&self) -> f64;
}

/// A batch event that knows how many entries are still iterating.
pub trait HasUnconverged {
    fn unconverged(&self) -> usize;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

// --- newton::Event ---

impl HasIteration for newton::Event<'_> {
    fn iteration(&self) -> usize {
        self.iter
    }
}

impl HasResidual for newton::Event<'_> {
    fn residual(&self) -> f64 {
        self.max_abs_residual()
    }
}

impl HasUnconverged for newton::Event<'_> {
    fn unconverged(&self) -> usize {
        newton::Event::unconverged(self)
    }
}

// --- CanStopEarly impls ---

impl CanStopEarly for newton::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
