use std::error::Error as StdError;

use thiserror::Error;

use crate::equation::EvalError;

use super::{BoundsError, ConfigError};

/// Errors that can occur during Newton solving.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("invalid bounds: {0}")]
    InvalidBounds(#[from] BoundsError),

    #[error("seed batch is empty")]
    EmptyBatch,

    #[error("seed {index} is not finite: {value}")]
    NonFiniteSeed { index: usize, value: f64 },

    #[error("expected {expected} residuals, got {actual}")]
    ResidualLength { expected: usize, actual: usize },

    #[error("problem error")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),

    #[error("model call failed")]
    Model(#[source] Box<dyn StdError + Send + Sync>),
}

impl<ME, PE> From<EvalError<ME, PE>> for Error
where
    ME: StdError + Send + Sync + 'static,
    PE: StdError + Send + Sync + 'static,
{
    fn from(err: EvalError<ME, PE>) -> Self {
        match err {
            EvalError::Model(e) => Self::Model(Box::new(e)),
            EvalError::Problem(e) => Self::Problem(Box::new(e)),
            EvalError::ResidualLength { expected, actual } => {
                Self::ResidualLength { expected, actual }
            }
        }
    }
}
