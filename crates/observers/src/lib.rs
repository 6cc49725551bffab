//! Reusable observers for Flexion solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work with any solver whose events expose iteration progress.
//!
//! # Modules
//!
//! - [`traits`]: Capability traits for cross-solver observers
//!   ([`HasIteration`], [`HasResidual`], [`HasUnconverged`], [`CanStopEarly`])
//! - [`History`]: records one [`Record`] per iteration
//! - [`TracingObserver`]: emits one `tracing` event per iteration
//! - [`ResidualTarget`]: stops early once residuals fall below a target
//!
//! # Features
//!
//! - `plot`: Enables [`PlotObserver`] for visualizing solver behavior via egui.
//!   This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`Observer`]: flexion_core::Observer
//! [`HasIteration`]: traits::HasIteration
//! [`HasResidual`]: traits::HasResidual
//! [`HasUnconverged`]: traits::HasUnconverged
//! [`CanStopEarly`]: traits::CanStopEarly

mod history;
mod stop;
mod trace;
pub mod traits;

#[cfg(feature = "plot")]
mod plot;

pub use history::{History, Record};
pub use stop::ResidualTarget;
pub use trace::TracingObserver;

#[cfg(feature = "plot")]
pub use plot::{PlotObserver, Plottable, ShowConfig};
