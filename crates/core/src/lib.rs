//! Core traits and types for the Flexion workspace.
//!
//! This crate defines the shared abstractions that solvers, observers, and
//! section models build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`BatchEquationProblem`]: adapts a batch of solver variables to a model
//!   input and extracts one residual per batch entry from the output

mod model;
mod observer;
mod problems;

pub use model::{Model, Snapshot};
pub use observer::Observer;
pub use problems::BatchEquationProblem;
