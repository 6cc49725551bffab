//! Moment-curvature equilibrium of rectangular sections.
//!
//! A section is made of a compression material and a tension material, each
//! described by a piecewise-linear stress-strain law. For every prescribed
//! curvature the centroidal strain is adjusted until compressive and tensile
//! resultants balance, then the section is evaluated for its moment, zone
//! heights, and lever arms.
//!
//! # Pieces
//!
//! - [`MaterialLaw`]: validated curve with strict-domain interpolation and
//!   clipping into [`ClippedPolygon`]s or a [`PaddedPolygons`] batch.
//! - [`StrainProfile`]: extreme-fiber strains, zone heights, and Jacobians.
//! - [`SectionModel`] and [`ForceEquilibrium`]: the [`Model`] and
//!   [`BatchEquationProblem`] pair solved by the batched Newton solver.
//! - [`SectionState`]: diagnostics at a strain state.
//! - [`MomentCurvature`]: solve and evaluate in one call.
//! - [`RunConfig`] and [`TargetCurve`]: serde run description and reference
//!   comparison.
//!
//! [`Model`]: flexion_core::Model
//! [`BatchEquationProblem`]: flexion_core::BatchEquationProblem

mod area_moment;
mod config;
mod equilibrium;
mod error;
mod geometry;
mod material;
mod moment_curvature;
mod state;
mod strain;
mod target;

pub use area_moment::{ClippedPolygon, PaddedPolygons};
pub use config::{CurvatureConfig, GeometryConfig, Run, RunConfig, SeedKind, SolverConfig};
pub use equilibrium::{ForceBalance, ForceEquilibrium, SectionModel, StrainState};
pub use error::{CurveError, DomainError, Error, GeometryError, InputError};
pub use geometry::SectionGeometry;
pub use material::{MaterialCurve, MaterialLaw};
pub use moment_curvature::{MomentCurvature, Seed};
pub use state::SectionState;
pub use strain::StrainProfile;
pub use target::{TargetCurve, TargetPoints};
