use flexion_core::Observer;
use flexion_solvers::equation::newton::{self, Action, Event};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::{
    MaterialCurve, MaterialLaw, MomentCurvature, SectionGeometry, SectionModel, Seed,
    equilibrium::{validate_curvature, validate_strain_limit},
    error::{Error, InputError},
};

/// Serializable description of a moment-curvature run.
///
/// ```toml
/// compression = [[0.0, 0.0], [0.003, 180.0], [0.010, 180.0]]
/// tension = [[0.0, 0.0], [0.002, 50.0], [0.004, 50.0], [0.008, 75.0]]
/// eps_ca_max = 0.002
/// curvature = { start = 6.25e-7, stop = 2.5e-5, count = 40 }
/// seed = "elastic"
///
/// [geometry]
/// h = 300.0
///
/// [solver]
/// max_iters = 80
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub compression: MaterialCurve,
    pub tension: MaterialCurve,
    pub geometry: GeometryConfig,
    pub curvature: CurvatureConfig,
    pub eps_ca_max: f64,
    #[serde(default)]
    pub seed: SeedKind,
    #[serde(default)]
    pub solver: SolverConfig,
}

/// How the equilibrium search is seeded; see [`Seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedKind {
    #[default]
    Linear,
    Elastic,
}

impl From<SeedKind> for Seed {
    fn from(kind: SeedKind) -> Self {
        match kind {
            SeedKind::Linear => Seed::Linear,
            SeedKind::Elastic => Seed::Elastic,
        }
    }
}

/// Section dimensions; half-heights default to `h / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeometryConfig {
    pub h: f64,
    #[serde(default)]
    pub h_u: Option<f64>,
    #[serde(default)]
    pub h_d: Option<f64>,
    #[serde(default = "default_width")]
    pub b: f64,
    #[serde(default = "default_modulus")]
    pub e: f64,
    #[serde(default = "default_span")]
    pub l: f64,
}

/// Curvature batch, either listed or evenly spaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurvatureConfig {
    Values(Vec<f64>),
    Span { start: f64, stop: f64, count: usize },
}

/// Optional overrides of the default Newton configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverConfig {
    pub max_iters: Option<usize>,
    pub x_abs_tol: Option<f64>,
    pub x_rel_tol: Option<f64>,
    pub residual_tol: Option<f64>,
    pub fd_rel_step: Option<f64>,
    pub max_halvings: Option<usize>,
}

/// A validated run, ready to solve.
#[derive(Debug)]
pub struct Run {
    pub model: SectionModel,
    pub kappa: Array1<f64>,
    pub eps_ca_max: f64,
    pub seed: Seed,
    pub config: newton::Config,
}

impl RunConfig {
    /// Validates every part of the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first curve, geometry, input, or solver config error.
    pub fn build(&self) -> Result<Run, Error> {
        let compression = MaterialLaw::new(&self.compression)?;
        let tension = MaterialLaw::new(&self.tension)?;
        let geometry = self.geometry.build()?;

        let kappa = self.curvature.build()?;
        validate_curvature(&kappa)?;
        validate_strain_limit(self.eps_ca_max)?;

        let config = self.solver.apply(newton::Config::default());
        config.validate().map_err(newton::Error::from)?;

        Ok(Run {
            model: SectionModel::new(compression, tension, geometry),
            kappa,
            eps_ca_max: self.eps_ca_max,
            seed: self.seed.into(),
            config,
        })
    }
}

impl Run {
    /// # Errors
    ///
    /// See [`MomentCurvature::solve`].
    pub fn solve(&self) -> Result<MomentCurvature, Error> {
        self.solve_observed(())
    }

    /// # Errors
    ///
    /// See [`MomentCurvature::solve`].
    pub fn solve_observed<Obs>(&self, observer: Obs) -> Result<MomentCurvature, Error>
    where
        Obs: for<'a> Observer<Event<'a>, Action>,
    {
        MomentCurvature::solve_observed(
            &self.model,
            self.kappa.clone(),
            &self.seed,
            self.eps_ca_max,
            &self.config,
            observer,
        )
    }
}

impl GeometryConfig {
    /// # Errors
    ///
    /// Returns a [`GeometryError`](crate::GeometryError) for invalid dimensions.
    pub fn build(&self) -> Result<SectionGeometry, Error> {
        let geometry = match (self.h_u, self.h_d) {
            (None, None) => SectionGeometry::symmetric(self.h)?,
            (Some(h_u), None) => SectionGeometry::new(self.h, h_u, self.h - h_u)?,
            (None, Some(h_d)) => SectionGeometry::new(self.h, self.h - h_d, h_d)?,
            (Some(h_u), Some(h_d)) => SectionGeometry::new(self.h, h_u, h_d)?,
        };
        Ok(geometry
            .with_width(self.b)?
            .with_modulus(self.e)?
            .with_span(self.l)?)
    }
}

impl CurvatureConfig {
    /// # Errors
    ///
    /// Returns [`InputError::EmptySpan`] for a span without points.
    pub fn build(&self) -> Result<Array1<f64>, InputError> {
        match self {
            Self::Values(values) => Ok(Array1::from(values.clone())),
            Self::Span { count: 0, .. } => Err(InputError::EmptySpan),
            Self::Span { start, stop, count } => Ok(Array1::linspace(*start, *stop, *count)),
        }
    }
}

impl SolverConfig {
    /// Overlays the set fields onto `base`.
    #[must_use]
    pub fn apply(&self, base: newton::Config) -> newton::Config {
        newton::Config {
            max_iters: self.max_iters.unwrap_or(base.max_iters),
            x_abs_tol: self.x_abs_tol.unwrap_or(base.x_abs_tol),
            x_rel_tol: self.x_rel_tol.unwrap_or(base.x_rel_tol),
            residual_tol: self.residual_tol.unwrap_or(base.residual_tol),
            fd_rel_step: self.fd_rel_step.unwrap_or(base.fd_rel_step),
            max_halvings: self.max_halvings.unwrap_or(base.max_halvings),
        }
    }
}

fn default_width() -> f64 {
    SectionGeometry::DEFAULT_WIDTH
}

fn default_modulus() -> f64 {
    SectionGeometry::DEFAULT_MODULUS
}

fn default_span() -> f64 {
    SectionGeometry::DEFAULT_SPAN
}
