use flexion_solvers::equation::newton;
use ninterp::error::ValidateError;
use thiserror::Error;

/// Errors raised while building a [`MaterialLaw`](crate::MaterialLaw).
#[derive(Debug, Error)]
pub enum CurveError {
    #[error("material curve needs at least two points, got {len}")]
    TooFewPoints { len: usize },

    #[error("point {index} is not finite")]
    NonFinite { index: usize },

    #[error("strain at point {index} does not increase ({previous} -> {strain})")]
    NotAscending {
        index: usize,
        previous: f64,
        strain: f64,
    },

    #[error("strain columns ({strains}) and stress columns ({stresses}) differ in length")]
    ColumnLength { strains: usize, stresses: usize },

    #[error(transparent)]
    Interpolator(#[from] ValidateError),
}

/// A strain outside the range a material curve covers.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("strain {strain} lies outside the material domain [{min}, {max}]")]
pub struct DomainError {
    pub strain: f64,
    pub min: f64,
    pub max: f64,
}

/// Errors raised while describing section geometry.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("{name} must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("half-heights {h_u} + {h_d} do not sum to the section height {h}")]
    HalfHeights { h: f64, h_u: f64, h_d: f64 },
}

/// Errors raised by invalid curvature batches, strain limits, or seeds.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InputError {
    #[error("curvature batch is empty")]
    EmptyBatch,

    #[error("curvature at entry {index} must be finite and positive, got {value}")]
    InvalidCurvature { index: usize, value: f64 },

    #[error("centroidal strain at entry {index} is not finite")]
    NonFiniteStrain { index: usize },

    #[error("eps_ca_max must be finite and positive, got {0}")]
    InvalidStrainLimit(f64),

    #[error("expected {expected} batch entries, got {actual}")]
    BatchLength { expected: usize, actual: usize },

    #[error("curvature span needs at least one point")]
    EmptySpan,
}

/// Any error produced by the section crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed material curve: {0}")]
    Curve(#[from] CurveError),

    #[error("material domain: {0}")]
    Domain(#[from] DomainError),

    #[error("invalid geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("solver failed: {0}")]
    Solver(#[from] newton::Error),
}
