//! Numerical solvers for the Flexion workspace.
//!
//! Solvers are generic over a [`Model`] and a problem trait from
//! `flexion-core`, and report progress through an [`Observer`].
//!
//! - [`equation`]: root finding for batches of independent equations
//!
//! [`Model`]: flexion_core::Model
//! [`Observer`]: flexion_core::Observer

pub mod equation;
