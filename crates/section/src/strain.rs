use ndarray::{Array1, Zip};

use crate::SectionGeometry;

/// Extreme-fiber strains and zone heights implied by a linear strain profile.
///
/// The profile pivots about the centroid fiber at `eps_ca` with slope `kappa`.
/// Zone heights split `h` in proportion to the extreme-fiber strains, and the
/// Jacobians map strain-space integrals onto the section height.
#[derive(Debug, Clone, PartialEq)]
pub struct StrainProfile {
    pub eps_cc: Array1<f64>,
    pub eps_ft: Array1<f64>,
    pub h_cc: Array1<f64>,
    pub h_ft: Array1<f64>,
    pub jac_cc: Array1<f64>,
    pub jac_ft: Array1<f64>,
}

impl StrainProfile {
    /// Maps centroidal strains and curvatures onto the section.
    ///
    /// Both Jacobians are evaluated as `h / (eps_cc + eps_ft)`, which equals
    /// `h_side / eps_side` wherever that ratio is defined and keeps a zone of
    /// zero strain at zero height instead of dividing by zero. The total strain
    /// is positive for any positive curvature.
    #[must_use]
    pub fn map(geometry: &SectionGeometry, eps_ca: &Array1<f64>, kappa: &Array1<f64>) -> Self {
        let (h, h_u, h_d) = (geometry.h(), geometry.h_u(), geometry.h_d());

        let eps_cc = Zip::from(eps_ca)
            .and(kappa)
            .map_collect(|&e, &k| (e - k * h_u).abs());
        let eps_ft = Zip::from(eps_ca)
            .and(kappa)
            .map_collect(|&e, &k| (e + k * h_d).abs());
        let eps_dt = &eps_cc + &eps_ft;

        let h_cc = Zip::from(&eps_cc)
            .and(&eps_dt)
            .map_collect(|&e, &dt| (e / dt * h).abs());
        let h_ft = Zip::from(&eps_ft)
            .and(&eps_dt)
            .map_collect(|&e, &dt| (e / dt * h).abs());

        let jac = eps_dt.mapv(|dt| h / dt);

        Self {
            eps_cc,
            eps_ft,
            h_cc,
            h_ft,
            jac_cc: jac.clone(),
            jac_ft: jac,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.eps_cc.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.eps_cc.is_empty()
    }
}
