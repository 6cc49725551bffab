use thiserror::Error;

/// Errors that can occur when validating solver bounds.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoundsError {
    /// One or both endpoints are non-finite.
    #[error("non-finite endpoint(s)")]
    NonFinite,
    /// Endpoints are equal, giving zero width.
    #[error("zero width")]
    ZeroWidth,
}

/// Ordered finite bounds that every Newton iterate is projected onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    lower: f64,
    upper: f64,
}

impl Bounds {
    /// Validates and orders the bound endpoints.
    ///
    /// # Errors
    ///
    /// Returns `BoundsError` if endpoints are non-finite or equal.
    pub fn new(bounds: [f64; 2]) -> Result<Self, BoundsError> {
        let [a, b] = bounds;

        if !a.is_finite() || !b.is_finite() {
            return Err(BoundsError::NonFinite);
        }

        #[allow(clippy::float_cmp)]
        if a == b {
            return Err(BoundsError::ZeroWidth);
        }

        Ok(Self {
            lower: a.min(b),
            upper: a.max(b),
        })
    }

    /// Returns the bounds as `[lower, upper]`.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.lower, self.upper]
    }

    /// Returns the bound width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Projects a value onto the bounds.
    #[must_use]
    pub fn project(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }
}
