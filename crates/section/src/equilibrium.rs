use flexion_core::{BatchEquationProblem, Model};
use ndarray::Array1;

use crate::{
    MaterialLaw, SectionGeometry, StrainProfile,
    error::{Error, InputError},
};

/// Validated batch of centroidal strains paired with curvatures.
#[derive(Debug, Clone, PartialEq)]
pub struct StrainState {
    eps_ca: Array1<f64>,
    kappa: Array1<f64>,
}

impl StrainState {
    /// Pairs strains with curvatures.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the batch is empty, the lengths differ, a
    /// strain is not finite, or a curvature is not finite and positive.
    pub fn new(eps_ca: Array1<f64>, kappa: Array1<f64>) -> Result<Self, InputError> {
        validate_curvature(&kappa)?;
        if eps_ca.len() != kappa.len() {
            return Err(InputError::BatchLength {
                expected: kappa.len(),
                actual: eps_ca.len(),
            });
        }
        if let Some(index) = eps_ca.iter().position(|e| !e.is_finite()) {
            return Err(InputError::NonFiniteStrain { index });
        }
        Ok(Self { eps_ca, kappa })
    }

    #[must_use]
    pub fn eps_ca(&self) -> &Array1<f64> {
        &self.eps_ca
    }

    #[must_use]
    pub fn kappa(&self) -> &Array1<f64> {
        &self.kappa
    }

    pub(crate) fn into_parts(self) -> (Array1<f64>, Array1<f64>) {
        (self.eps_ca, self.kappa)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kappa.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kappa.is_empty()
    }
}

/// Areas, first moments, and resultant forces of both zones.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceBalance {
    pub profile: StrainProfile,
    pub m0_cc: Array1<f64>,
    pub m0_ft: Array1<f64>,
    pub m1_cc: Array1<f64>,
    pub m1_ft: Array1<f64>,
    pub f_cc: Array1<f64>,
    pub f_ft: Array1<f64>,
}

impl ForceBalance {
    /// Compression minus tension force, per entry.
    #[must_use]
    pub fn imbalance(&self) -> Array1<f64> {
        &self.f_cc - &self.f_ft
    }
}

/// A rectangular section made of a compression and a tension material.
#[derive(Debug)]
pub struct SectionModel {
    compression: MaterialLaw,
    tension: MaterialLaw,
    geometry: SectionGeometry,
}

impl SectionModel {
    #[must_use]
    pub fn new(compression: MaterialLaw, tension: MaterialLaw, geometry: SectionGeometry) -> Self {
        Self {
            compression,
            tension,
            geometry,
        }
    }

    #[must_use]
    pub fn compression(&self) -> &MaterialLaw {
        &self.compression
    }

    #[must_use]
    pub fn tension(&self) -> &MaterialLaw {
        &self.tension
    }

    #[must_use]
    pub fn geometry(&self) -> &SectionGeometry {
        &self.geometry
    }

    /// Range of non-negative centroidal strains whose extreme-fiber strains
    /// stay below both materials' `max_strain` at curvature `kappa`.
    ///
    /// Returns `None` when no such strain exists, meaning the curves are too
    /// short for this curvature.
    #[must_use]
    pub fn admissible_strain(&self, kappa: f64) -> Option<[f64; 2]> {
        let (h_u, h_d) = (self.geometry.h_u(), self.geometry.h_d());
        let cc_max = self.compression.max_strain();

        let lower = (kappa * h_u - cc_max).max(0.0);
        let upper = (self.tension.max_strain() - kappa * h_d).min(kappa * h_u + cc_max);

        (lower <= upper).then_some([lower, upper])
    }
}

impl Model for SectionModel {
    type Input = StrainState;
    type Output = ForceBalance;
    type Error = Error;

    fn call(&self, input: &StrainState) -> Result<ForceBalance, Error> {
        let profile = StrainProfile::map(&self.geometry, input.eps_ca(), input.kappa());

        let cc = self.compression.clip_batch(&profile.eps_cc)?;
        let ft = self.tension.clip_batch(&profile.eps_ft)?;

        let (m0_cc, m0_ft) = (cc.m0(), ft.m0());
        let f_cc = &m0_cc * &profile.jac_cc;
        let f_ft = &m0_ft * &profile.jac_ft;

        Ok(ForceBalance {
            m1_cc: cc.m1(),
            m1_ft: ft.m1(),
            m0_cc,
            m0_ft,
            f_cc,
            f_ft,
            profile,
        })
    }
}

/// Drives the force imbalance of every curvature entry to zero.
///
/// Solver variables are centroidal strains. Each is clipped to
/// `[0, eps_ca_max]` before it reaches the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceEquilibrium {
    kappa: Array1<f64>,
    eps_ca_max: f64,
}

impl ForceEquilibrium {
    /// # Errors
    ///
    /// Returns an [`InputError`] for an empty or non-positive curvature batch
    /// or a strain limit that is not finite and positive.
    pub fn new(kappa: Array1<f64>, eps_ca_max: f64) -> Result<Self, InputError> {
        validate_curvature(&kappa)?;
        validate_strain_limit(eps_ca_max)?;
        Ok(Self { kappa, eps_ca_max })
    }

    #[must_use]
    pub fn kappa(&self) -> &Array1<f64> {
        &self.kappa
    }

    #[must_use]
    pub fn eps_ca_max(&self) -> f64 {
        self.eps_ca_max
    }

    /// Solver bounds, `[0, eps_ca_max]`.
    #[must_use]
    pub fn bounds(&self) -> [f64; 2] {
        [0.0, self.eps_ca_max]
    }

    /// Clips centroidal strains onto `[0, eps_ca_max]`.
    #[must_use]
    pub fn clip(&self, eps_ca: &Array1<f64>) -> Array1<f64> {
        eps_ca.mapv(|e| e.clamp(0.0, self.eps_ca_max))
    }
}

impl BatchEquationProblem for ForceEquilibrium {
    type Input = StrainState;
    type Output = ForceBalance;
    type Error = InputError;

    fn input(&self, x: &Array1<f64>) -> Result<StrainState, InputError> {
        StrainState::new(self.clip(x), self.kappa.clone())
    }

    fn residuals(
        &self,
        _input: &StrainState,
        output: &ForceBalance,
    ) -> Result<Array1<f64>, InputError> {
        Ok(output.imbalance())
    }
}

pub(crate) fn validate_curvature(kappa: &Array1<f64>) -> Result<(), InputError> {
    if kappa.is_empty() {
        return Err(InputError::EmptyBatch);
    }
    match kappa.iter().position(|k| !k.is_finite() || *k <= 0.0) {
        Some(index) => Err(InputError::InvalidCurvature {
            index,
            value: kappa[index],
        }),
        None => Ok(()),
    }
}

pub(crate) fn validate_strain_limit(eps_ca_max: f64) -> Result<(), InputError> {
    if eps_ca_max.is_finite() && eps_ca_max > 0.0 {
        Ok(())
    } else {
        Err(InputError::InvalidStrainLimit(eps_ca_max))
    }
}
