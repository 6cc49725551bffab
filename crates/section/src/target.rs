use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, DomainError};
use crate::{MaterialCurve, MaterialLaw};

/// Reference moment-curvature table for judging a solved response.
///
/// Lookups interpolate linearly between tabulated curvatures and refuse to
/// extrapolate.
#[derive(Debug)]
pub struct TargetCurve {
    table: MaterialLaw,
}

/// Serializable `(kappa, moment)` points of a [`TargetCurve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetPoints(pub Vec<(f64, f64)>);

impl TargetCurve {
    /// # Errors
    ///
    /// Returns a [`CurveError`] if curvatures do not strictly ascend or the
    /// table has fewer than two points.
    pub fn new(points: &TargetPoints) -> Result<Self, CurveError> {
        let table = MaterialLaw::new(&MaterialCurve::new(points.0.clone()))?;
        Ok(Self { table })
    }

    /// Pairs separate curvature and moment columns.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError`] for mismatched or malformed columns.
    pub fn from_columns(kappa: &[f64], moment: &[f64]) -> Result<Self, CurveError> {
        let table = MaterialLaw::new(&MaterialCurve::from_columns(kappa, moment)?)?;
        Ok(Self { table })
    }

    /// Target moment at `kappa`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] outside the tabulated curvature range.
    pub fn moment(&self, kappa: f64) -> Result<f64, DomainError> {
        self.table.interpolate(kappa)
    }

    /// `m_ca / target` per entry.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if any curvature is outside the table.
    pub fn ratios(
        &self,
        kappa: &Array1<f64>,
        m_ca: &Array1<f64>,
    ) -> Result<Array1<f64>, DomainError> {
        let target = self.table.interpolate_batch(kappa)?;
        Ok(m_ca / &target)
    }

    /// Largest `|m_ca / target - 1|` over the batch.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if any curvature is outside the table.
    pub fn max_relative_deviation(
        &self,
        kappa: &Array1<f64>,
        m_ca: &Array1<f64>,
    ) -> Result<f64, DomainError> {
        let ratios = self.ratios(kappa, m_ca)?;
        Ok(ratios.iter().fold(0.0_f64, |acc, r| acc.max((r - 1.0).abs())))
    }
}
