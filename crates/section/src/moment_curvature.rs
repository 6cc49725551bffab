use std::error::Error as StdError;

use flexion_core::Observer;
use flexion_solvers::equation::newton::{self, Action, EntryStatus, Event, Status};
use ndarray::Array1;

use crate::{
    ForceEquilibrium, SectionModel, SectionState,
    error::{Error, InputError},
};

/// Initial centroidal strains for the equilibrium search.
#[derive(Debug, Clone, PartialEq)]
pub enum Seed {
    /// Evenly spaced over `[0, eps_ca_max]` across the batch.
    ///
    /// With a wide strain limit, high seeds can start where the whole section
    /// is in tension. Their Newton steps point past `eps_ca_max`, so those
    /// entries stay pinned at the bound and are reported as stalled.
    Linear,
    /// The same strain for every entry.
    Constant(f64),
    /// One strain per entry.
    Values(Array1<f64>),
    /// The bimodular elastic solution from each law's initial stiffness.
    ///
    /// The neutral axis sits at depth `h / (1 + sqrt(E_c / E_t))` below the
    /// compression edge, so `eps_ca = kappa (h_u - depth)`, clipped to
    /// `[0, eps_ca_max]`. Exact while both materials stay on their first
    /// segment.
    Elastic,
}

impl Seed {
    /// Materializes one seed per curvature entry.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::BatchLength`] if explicit values do not match
    /// the curvature batch.
    pub fn values(
        &self,
        model: &SectionModel,
        kappa: &Array1<f64>,
        eps_ca_max: f64,
    ) -> Result<Array1<f64>, InputError> {
        let len = kappa.len();
        match self {
            Self::Linear => Ok(Array1::linspace(0.0, eps_ca_max, len)),
            Self::Constant(value) => Ok(Array1::from_elem(len, *value)),
            Self::Values(values) if values.len() == len => Ok(values.clone()),
            Self::Values(values) => Err(InputError::BatchLength {
                expected: len,
                actual: values.len(),
            }),
            Self::Elastic => {
                let geometry = model.geometry();
                let ratio =
                    model.compression().initial_modulus() / model.tension().initial_modulus();
                let depth = if ratio.is_finite() && ratio > 0.0 {
                    geometry.h() / (1.0 + ratio.sqrt())
                } else {
                    0.5 * geometry.h()
                };
                Ok(kappa.mapv(|k| (k * (geometry.h_u() - depth)).clamp(0.0, eps_ca_max)))
            }
        }
    }
}

/// Solved moment-curvature response of a section.
#[derive(Debug, Clone)]
pub struct MomentCurvature {
    /// Diagnostics at the final centroidal strains.
    pub state: SectionState,
    /// Per-curvature convergence of the equilibrium search.
    pub entries: Vec<EntryStatus>,
    pub status: Status,
    pub iters: usize,
}

impl MomentCurvature {
    /// Finds force equilibrium for every curvature and evaluates the section.
    ///
    /// Entries that fail to converge keep their last iterate and are flagged
    /// in [`entries`](Self::entries); they never abort the batch.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid inputs or solver config, and a domain
    /// error if a material curve does not cover the strains the search needs.
    pub fn solve(
        model: &SectionModel,
        kappa: Array1<f64>,
        seed: &Seed,
        eps_ca_max: f64,
        config: &newton::Config,
    ) -> Result<Self, Error> {
        Self::solve_observed(model, kappa, seed, eps_ca_max, config, ())
    }

    /// Like [`solve`](Self::solve), reporting each solver iteration to
    /// `observer`.
    ///
    /// # Errors
    ///
    /// Same as [`solve`](Self::solve).
    pub fn solve_observed<Obs>(
        model: &SectionModel,
        kappa: Array1<f64>,
        seed: &Seed,
        eps_ca_max: f64,
        config: &newton::Config,
        observer: Obs,
    ) -> Result<Self, Error>
    where
        Obs: for<'a> Observer<Event<'a>, Action>,
    {
        let problem = ForceEquilibrium::new(kappa, eps_ca_max)?;
        let x0 = seed.values(model, problem.kappa(), eps_ca_max)?;

        let solution = newton::solve(model, &problem, x0, problem.bounds(), config, observer)
            .map_err(unwrap_solver_error)?;

        let state = SectionState::evaluate(model, &solution.x, problem.kappa(), eps_ca_max)?;

        Ok(Self {
            state,
            entries: solution.entries,
            status: solution.status,
            iters: solution.iters,
        })
    }

    /// True when every curvature entry reached equilibrium.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.entries.iter().all(|s| *s == EntryStatus::Converged)
    }

    /// Indices of curvature entries that did not converge.
    pub fn unconverged(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, s)| **s != EntryStatus::Converged)
            .map(|(i, _)| i)
    }
}

/// Recovers section errors boxed inside solver errors.
fn unwrap_solver_error(err: newton::Error) -> Error {
    match err {
        newton::Error::Model(inner) => downcast_or(inner, newton::Error::Model),
        newton::Error::Problem(inner) => downcast_or(inner, newton::Error::Problem),
        other => Error::Solver(other),
    }
}

fn downcast_or(
    inner: Box<dyn StdError + Send + Sync>,
    wrap: fn(Box<dyn StdError + Send + Sync>) -> newton::Error,
) -> Error {
    match inner.downcast::<Error>() {
        Ok(err) => *err,
        Err(inner) => match inner.downcast::<InputError>() {
            Ok(err) => Error::Input(*err),
            Err(inner) => Error::Solver(wrap(inner)),
        },
    }
}
