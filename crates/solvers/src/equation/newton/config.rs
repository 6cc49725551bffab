use thiserror::Error;

/// Configuration for the batched Newton solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Iteration budget shared by all batch entries.
    pub max_iters: usize,
    /// Absolute tolerance on the full Newton step.
    pub x_abs_tol: f64,
    /// Relative tolerance on the full Newton step.
    pub x_rel_tol: f64,
    /// Absolute tolerance on the residual.
    pub residual_tol: f64,
    /// Finite-difference width relative to `max(|x|, bounds width)`.
    pub fd_rel_step: f64,
    /// Maximum number of step halvings per iteration.
    pub max_halvings: usize,
}

/// Errors that can occur when validating a Newton solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("x_abs_tol must be finite and non-negative")]
    XAbs,

    #[error("x_rel_tol must be finite and non-negative")]
    XRel,

    #[error("residual_tol must be finite and non-negative")]
    Residual,

    #[error("fd_rel_step must be finite and positive")]
    FdStep,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 50,
            x_abs_tol: 1e-10,
            x_rel_tol: 0.0,
            residual_tol: 1e-10,
            fd_rel_step: 1e-7,
            max_halvings: 8,
        }
    }
}

impl Config {
    /// Validates that all tolerances are finite and non-negative and that the
    /// finite-difference width is positive.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.x_abs_tol.is_finite() || self.x_abs_tol < 0.0 {
            return Err(ConfigError::XAbs);
        }
        if !self.x_rel_tol.is_finite() || self.x_rel_tol < 0.0 {
            return Err(ConfigError::XRel);
        }
        if !self.residual_tol.is_finite() || self.residual_tol < 0.0 {
            return Err(ConfigError::Residual);
        }
        if !self.fd_rel_step.is_finite() || self.fd_rel_step <= 0.0 {
            return Err(ConfigError::FdStep);
        }
        Ok(())
    }
}
