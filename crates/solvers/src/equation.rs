//! Solvers for batch equation problems: finding roots of many independent
//! scalar equations at once.
//!
//! A [`BatchEquationProblem`] maps solver variables `x: Array1<f64>` to a model
//! input, calls the model, and computes one residual per batch entry. Solvers
//! in this module drive those residuals toward zero, treating the batch as a
//! data-parallel set of scalar problems.
//!
//! # Solvers
//!
//! - [`newton`]: projected Newton iteration with finite-difference slopes
//!
//! [`BatchEquationProblem`]: flexion_core::BatchEquationProblem

mod evaluate;

pub use evaluate::{EvalError, EvaluateResult, Evaluation, evaluate};

pub mod newton;
