use serde::Serialize;

use crate::error::GeometryError;

/// Dimensions of a rectangular section, in millimetres and megapascals.
///
/// `h_u` and `h_d` are the distances from the centroid to the compression and
/// tension edges. `b`, `e`, and `l` do not enter the equilibrium; they are
/// carried for elastic reference values and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionGeometry {
    h: f64,
    h_u: f64,
    h_d: f64,
    b: f64,
    e: f64,
    l: f64,
}

impl SectionGeometry {
    pub const DEFAULT_WIDTH: f64 = 1.0;
    pub const DEFAULT_MODULUS: f64 = 60_000.0;
    pub const DEFAULT_SPAN: f64 = 160.0;

    /// A section of height `h` with the centroid at mid-height.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if `h` is not finite and positive.
    pub fn symmetric(h: f64) -> Result<Self, GeometryError> {
        Self::new(h, 0.5 * h, 0.5 * h)
    }

    /// A section with explicit half-heights and default width, modulus, span.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if any dimension is not finite and
    /// positive, or if `h_u + h_d` differs from `h`.
    pub fn new(h: f64, h_u: f64, h_d: f64) -> Result<Self, GeometryError> {
        positive("h", h)?;
        positive("h_u", h_u)?;
        positive("h_d", h_d)?;

        if ((h_u + h_d) - h).abs() > 1e-9 * h {
            return Err(GeometryError::HalfHeights { h, h_u, h_d });
        }

        Ok(Self {
            h,
            h_u,
            h_d,
            b: Self::DEFAULT_WIDTH,
            e: Self::DEFAULT_MODULUS,
            l: Self::DEFAULT_SPAN,
        })
    }

    /// Replaces the width.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if `b` is not finite and positive.
    pub fn with_width(self, b: f64) -> Result<Self, GeometryError> {
        positive("b", b)?;
        Ok(Self { b, ..self })
    }

    /// Replaces the elastic modulus.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if `e` is not finite and positive.
    pub fn with_modulus(self, e: f64) -> Result<Self, GeometryError> {
        positive("e", e)?;
        Ok(Self { e, ..self })
    }

    /// Replaces the span.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if `l` is not finite and positive.
    pub fn with_span(self, l: f64) -> Result<Self, GeometryError> {
        positive("l", l)?;
        Ok(Self { l, ..self })
    }

    #[must_use]
    pub fn h(&self) -> f64 {
        self.h
    }

    #[must_use]
    pub fn h_u(&self) -> f64 {
        self.h_u
    }

    #[must_use]
    pub fn h_d(&self) -> f64 {
        self.h_d
    }

    #[must_use]
    pub fn b(&self) -> f64 {
        self.b
    }

    #[must_use]
    pub fn e(&self) -> f64 {
        self.e
    }

    #[must_use]
    pub fn l(&self) -> f64 {
        self.l
    }

    /// Second moment of area `I = b h³ / 12`.
    #[must_use]
    pub fn second_moment(&self) -> f64 {
        self.b * self.h.powi(3) / 12.0
    }

    /// Elastic section modulus `W = b h² / 6`.
    #[must_use]
    pub fn section_modulus(&self) -> f64 {
        self.b * self.h.powi(2) / 6.0
    }

    /// Elastic moment `E I κ` at curvature `kappa`.
    #[must_use]
    pub fn elastic_moment(&self, kappa: f64) -> f64 {
        self.e * self.second_moment() * kappa
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::NonPositive { name, value })
    }
}
