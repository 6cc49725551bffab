use std::fmt;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use ninterp::prelude::{Interp1DOwned, Interpolator};
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, DomainError};

/// Ordered `(strain, stress)` control points of a stress-strain law.
///
/// Strains must ascend strictly. By convention the first point sits at zero
/// strain. Validation happens in [`MaterialLaw::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialCurve {
    points: Vec<(f64, f64)>,
}

impl MaterialCurve {
    #[must_use]
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Pairs separate strain and stress columns.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::ColumnLength`] if the columns differ in length.
    pub fn from_columns(strains: &[f64], stresses: &[f64]) -> Result<Self, CurveError> {
        if strains.len() != stresses.len() {
            return Err(CurveError::ColumnLength {
                strains: strains.len(),
                stresses: stresses.len(),
            });
        }
        Ok(Self::new(
            strains.iter().copied().zip(stresses.iter().copied()).collect(),
        ))
    }

    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

impl From<Vec<(f64, f64)>> for MaterialCurve {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points)
    }
}

/// A validated piecewise-linear stress-strain law.
///
/// The law never extrapolates: any strain outside `[min_strain, max_strain]`
/// is a [`DomainError`].
pub struct MaterialLaw {
    vertices: Array2<f64>,
    interp: Interp1DOwned<f64, ninterp::strategy::Linear>,
}

impl MaterialLaw {
    /// Validates a curve and prepares its interpolator.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError`] if the curve has fewer than two points, holds a
    /// non-finite value, or its strains do not strictly ascend.
    pub fn new(curve: &MaterialCurve) -> Result<Self, CurveError> {
        let points = curve.points();

        if points.len() < 2 {
            return Err(CurveError::TooFewPoints { len: points.len() });
        }
        if let Some(index) = points
            .iter()
            .position(|(strain, stress)| !strain.is_finite() || !stress.is_finite())
        {
            return Err(CurveError::NonFinite { index });
        }
        if let Some(index) = (1..points.len()).find(|&i| points[i].0 <= points[i - 1].0) {
            return Err(CurveError::NotAscending {
                index,
                previous: points[index - 1].0,
                strain: points[index].0,
            });
        }

        let mut vertices = Array2::zeros((points.len(), 2));
        for (mut row, (strain, stress)) in vertices.rows_mut().into_iter().zip(points) {
            row[0] = *strain;
            row[1] = *stress;
        }

        let interp = Interp1DOwned::new(
            vertices.column(0).to_owned(),
            vertices.column(1).to_owned(),
            ninterp::strategy::Linear,
            ninterp::interpolator::Extrapolate::Error,
        )?;

        Ok(Self { vertices, interp })
    }

    /// Control points as an `(n, 2)` array of `(strain, stress)` rows.
    #[must_use]
    pub fn vertices(&self) -> ArrayView2<'_, f64> {
        self.vertices.view()
    }

    #[must_use]
    pub fn strains(&self) -> ArrayView1<'_, f64> {
        self.vertices.column(0)
    }

    #[must_use]
    pub fn stresses(&self) -> ArrayView1<'_, f64> {
        self.vertices.column(1)
    }

    /// Number of control points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.nrows()
    }

    /// Always false; a valid law has at least two points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.nrows() == 0
    }

    #[must_use]
    pub fn min_strain(&self) -> f64 {
        self.vertices[[0, 0]]
    }

    #[must_use]
    pub fn max_strain(&self) -> f64 {
        self.vertices[[self.len() - 1, 0]]
    }

    /// Returns the first vertex index whose strain is `>= cut`.
    ///
    /// A cut equal to a vertex strain lands before that vertex.
    #[must_use]
    pub fn insertion_index(&self, cut: f64) -> usize {
        self.strains().iter().take_while(|&&strain| strain < cut).count()
    }

    /// Slope of the first segment.
    #[must_use]
    pub fn initial_modulus(&self) -> f64 {
        let v = &self.vertices;
        (v[[1, 1]] - v[[0, 1]]) / (v[[1, 0]] - v[[0, 0]])
    }

    /// Checks that `strain` lies inside the curve's domain.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] for strains outside `[min_strain, max_strain]`
    /// or non-finite strains.
    pub fn check_domain(&self, strain: f64) -> Result<(), DomainError> {
        let (min, max) = (self.min_strain(), self.max_strain());
        if (min..=max).contains(&strain) {
            Ok(())
        } else {
            Err(DomainError { strain, min, max })
        }
    }

    /// Linear interpolation of the stress at `strain`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `strain` is outside the curve's domain.
    pub fn interpolate(&self, strain: f64) -> Result<f64, DomainError> {
        self.check_domain(strain)?;
        self.interp
            .interpolate(&[strain])
            .map_err(|_| DomainError {
                strain,
                min: self.min_strain(),
                max: self.max_strain(),
            })
    }

    /// Stress at a cut strain, taken directly from a vertex on exact matches.
    pub(crate) fn stress_at_cut(&self, index: usize, cut: f64) -> Result<f64, DomainError> {
        #[allow(clippy::float_cmp)]
        if index < self.len() && self.vertices[[index, 0]] == cut {
            return Ok(self.vertices[[index, 1]]);
        }
        self.interpolate(cut)
    }

    /// Stresses at a batch of strains.
    ///
    /// # Errors
    ///
    /// Returns the first [`DomainError`] encountered.
    pub fn interpolate_batch(&self, strains: &Array1<f64>) -> Result<Array1<f64>, DomainError> {
        strains.iter().map(|&s| self.interpolate(s)).collect()
    }
}

impl fmt::Debug for MaterialLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterialLaw")
            .field("vertices", &self.vertices)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn tension() -> MaterialLaw {
        MaterialLaw::new(&MaterialCurve::new(vec![
            (0.0, 0.0),
            (0.002, 50.0),
            (0.004, 50.0),
            (0.008, 75.0),
        ]))
        .expect("valid curve")
    }

    #[test]
    fn interpolates_inside_domain() {
        let law = tension();
        assert_relative_eq!(law.interpolate(0.001).unwrap(), 25.0, epsilon = 1e-12);
        assert_relative_eq!(law.interpolate(0.003).unwrap(), 50.0, epsilon = 1e-12);
        assert_relative_eq!(law.interpolate(0.006).unwrap(), 62.5, epsilon = 1e-12);
        assert_relative_eq!(law.interpolate(0.008).unwrap(), 75.0, epsilon = 1e-12);
        assert_relative_eq!(law.interpolate(0.0).unwrap(), 0.0);
    }

    #[test]
    fn refuses_to_extrapolate() {
        let law = tension();
        let err = law.interpolate(0.009).unwrap_err();
        assert_eq!(
            err,
            DomainError {
                strain: 0.009,
                min: 0.0,
                max: 0.008
            }
        );
        assert!(law.interpolate(-1e-6).is_err());
        assert!(law.interpolate(f64::NAN).is_err());
    }

    #[test]
    fn insertion_index_searches_left() {
        let law = tension();
        assert_eq!(law.insertion_index(0.0), 0);
        assert_eq!(law.insertion_index(0.001), 1);
        assert_eq!(law.insertion_index(0.002), 1);
        assert_eq!(law.insertion_index(0.0021), 2);
        assert_eq!(law.insertion_index(0.008), 3);
    }

    #[test]
    fn exposes_domain_and_vertices() {
        let law = tension();
        assert_eq!(law.len(), 4);
        assert!(!law.is_empty());
        assert_relative_eq!(law.min_strain(), 0.0);
        assert_relative_eq!(law.max_strain(), 0.008);
        assert_relative_eq!(law.vertices()[[2, 1]], 50.0);
        assert_relative_eq!(law.stresses()[3], 75.0);
        assert_relative_eq!(law.initial_modulus(), 25_000.0, max_relative = 1e-12);
    }

    #[test]
    fn rejects_malformed_curves() {
        let single = MaterialCurve::new(vec![(0.0, 0.0)]);
        assert!(matches!(
            MaterialLaw::new(&single),
            Err(CurveError::TooFewPoints { len: 1 })
        ));

        let duplicate = MaterialCurve::new(vec![(0.0, 0.0), (0.001, 1.0), (0.001, 2.0)]);
        assert!(matches!(
            MaterialLaw::new(&duplicate),
            Err(CurveError::NotAscending { index: 2, .. })
        ));

        let descending = MaterialCurve::new(vec![(0.0, 0.0), (-0.001, 1.0)]);
        assert!(matches!(
            MaterialLaw::new(&descending),
            Err(CurveError::NotAscending { index: 1, .. })
        ));

        let nan = MaterialCurve::new(vec![(0.0, 0.0), (0.001, f64::NAN)]);
        assert!(matches!(
            MaterialLaw::new(&nan),
            Err(CurveError::NonFinite { index: 1 })
        ));
    }

    #[test]
    fn pairs_columns() {
        let curve = MaterialCurve::from_columns(&[0.0, 0.003], &[0.0, 180.0]).unwrap();
        assert_eq!(curve.points(), &[(0.0, 0.0), (0.003, 180.0)]);

        assert!(matches!(
            MaterialCurve::from_columns(&[0.0, 0.003], &[0.0]),
            Err(CurveError::ColumnLength {
                strains: 2,
                stresses: 1
            })
        ));
    }

    #[test]
    fn curve_deserializes_from_point_pairs() {
        let curve: MaterialCurve = serde_json::from_str("[[0.0, 0.0], [0.003, 180.0]]").unwrap();
        assert_eq!(curve.points(), &[(0.0, 0.0), (0.003, 180.0)]);
    }
}
