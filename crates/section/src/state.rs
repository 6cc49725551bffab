use flexion_core::Model;
use ndarray::{Array1, Zip};
use serde::Serialize;

use crate::{
    SectionModel, StrainState,
    equilibrium::validate_strain_limit,
    error::Error,
};

/// Full diagnostics of a section at a batch of strain states.
///
/// Every field holds one value per curvature entry. Heights and lever arms are
/// in the units of the section geometry, moments in force times length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionState {
    pub eps_ca: Array1<f64>,
    pub kappa: Array1<f64>,
    pub eps_cc: Array1<f64>,
    pub eps_ft: Array1<f64>,
    pub h_cc: Array1<f64>,
    pub h_ft: Array1<f64>,
    pub jac_cc: Array1<f64>,
    pub jac_ft: Array1<f64>,
    pub m0_cc: Array1<f64>,
    pub m0_ft: Array1<f64>,
    pub m1_cc: Array1<f64>,
    pub m1_ft: Array1<f64>,
    pub f_cc: Array1<f64>,
    pub f_ft: Array1<f64>,
    /// Force imbalance `|f_ft - f_cc|`; near zero at equilibrium.
    pub df: Array1<f64>,
    /// Lever arms measured from the neutral axis.
    pub z_cc_na: Array1<f64>,
    pub z_ft_na: Array1<f64>,
    /// Lever arms measured from the centroid.
    pub z_cc_ca: Array1<f64>,
    pub z_ft_ca: Array1<f64>,
    /// Neutral axis offset from the centroid.
    pub z_na_ca: Array1<f64>,
    /// Resultant moment, taken about the neutral axis. Equals the moment about
    /// the centroid once the forces balance.
    pub m_ca: Array1<f64>,
}

impl SectionState {
    /// Evaluates the section at `eps_ca`, first clipped to `[0, eps_ca_max]`.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid curvatures, strains, or strain limit, and
    /// a domain error if an extreme-fiber strain leaves a material curve.
    pub fn evaluate(
        model: &SectionModel,
        eps_ca: &Array1<f64>,
        kappa: &Array1<f64>,
        eps_ca_max: f64,
    ) -> Result<Self, Error> {
        validate_strain_limit(eps_ca_max)?;
        let clipped = eps_ca.mapv(|e| e.clamp(0.0, eps_ca_max));
        let input = StrainState::new(clipped, kappa.clone())?;
        let balance = model.call(&input)?;

        let geometry = model.geometry();
        let (h_u, h_d) = (geometry.h_u(), geometry.h_d());
        let profile = balance.profile;

        let z_cc_na = lever_arm(&balance.m0_cc, &balance.m1_cc, &profile.jac_cc);
        let z_ft_na = lever_arm(&balance.m0_ft, &balance.m1_ft, &profile.jac_ft);

        let z_cc_ca = Zip::from(&profile.h_cc)
            .and(&z_cc_na)
            .map_collect(|&h_cc, &z| h_u - (h_cc - z));
        let z_ft_ca = Zip::from(&profile.h_ft)
            .and(&z_ft_na)
            .map_collect(|&h_ft, &z| h_d - (h_ft - z));
        let z_na_ca = profile.h_ft.mapv(|h_ft| h_d - h_ft);

        let m_ca = &balance.m1_cc * &profile.jac_cc.mapv(|j| j * j)
            + &balance.m1_ft * &profile.jac_ft.mapv(|j| j * j);
        let df = (&balance.f_ft - &balance.f_cc).mapv(f64::abs);

        let (eps_ca, kappa) = input.into_parts();

        Ok(Self {
            eps_ca,
            kappa,
            eps_cc: profile.eps_cc,
            eps_ft: profile.eps_ft,
            h_cc: profile.h_cc,
            h_ft: profile.h_ft,
            jac_cc: profile.jac_cc,
            jac_ft: profile.jac_ft,
            m0_cc: balance.m0_cc,
            m0_ft: balance.m0_ft,
            m1_cc: balance.m1_cc,
            m1_ft: balance.m1_ft,
            f_cc: balance.f_cc,
            f_ft: balance.f_ft,
            df,
            z_cc_na,
            z_ft_na,
            z_cc_ca,
            z_ft_ca,
            z_na_ca,
            m_ca,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kappa.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kappa.is_empty()
    }

    /// Moment rebuilt from forces and their lever arms about the centroid.
    ///
    /// Matches `m_ca` up to the remaining force imbalance times the neutral
    /// axis offset.
    #[must_use]
    pub fn moment_from_forces(&self) -> Array1<f64> {
        &self.f_cc * &self.z_cc_ca + &self.f_ft * &self.z_ft_ca
    }
}

/// `(m1 / m0) * jac`, or zero for an empty zone.
fn lever_arm(m0: &Array1<f64>, m1: &Array1<f64>, jac: &Array1<f64>) -> Array1<f64> {
    Zip::from(m0)
        .and(m1)
        .and(jac)
        .map_collect(|&m0, &m1, &jac| if m0 > 0.0 { m1 / m0 * jac } else { 0.0 })
}
