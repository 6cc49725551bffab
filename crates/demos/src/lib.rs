//! Shared inputs and reporting for the Flexion demos.
//!
//! ```sh
//! cargo run -p flexion-demos --example moment_curvature
//! cargo run -p flexion-demos --example moment_curvature -- path/to/run.toml
//! cargo run -p flexion-demos --example plot_response --features plot
//! ```

use flexion_section::{CurveError, MomentCurvature, Run, RunConfig, TargetCurve};
use flexion_solvers::equation::newton::EntryStatus;
use ndarray::Array1;

/// A 300 mm deep strain-softening section under 40 increasing curvatures.
pub const BEAM: &str = r#"
compression = [[0.0, 0.0], [0.003, 180.0], [0.010, 180.0]]
tension = [[0.0, 0.0], [0.002, 50.0], [0.004, 50.0], [0.008, 75.0]]
eps_ca_max = 0.002
curvature = { start = 6.25e-7, stop = 2.5e-5, count = 40 }
seed = "elastic"

[geometry]
h = 300.0
b = 1.0
e = 60000.0
"#;

/// Parses a TOML run description.
///
/// # Errors
///
/// Returns the TOML error for malformed or unknown fields.
pub fn load(text: &str) -> Result<RunConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Uncracked elastic response `E I kappa` over the run's curvature range.
///
/// # Errors
///
/// Returns a [`CurveError`] if the run's curvatures do not ascend.
pub fn elastic_target(run: &Run) -> Result<TargetCurve, CurveError> {
    let geometry = run.model.geometry();
    let kappa: Vec<f64> = std::iter::once(0.0)
        .chain(run.kappa.iter().copied())
        .collect();
    let moment: Vec<f64> = kappa.iter().map(|&k| geometry.elastic_moment(k)).collect();
    TargetCurve::from_columns(&kappa, &moment)
}

/// Renders the response as a fixed-width table.
///
/// `ratios` adds an `m/target` column when given.
#[must_use]
pub fn table(response: &MomentCurvature, ratios: Option<&Array1<f64>>) -> String {
    let state = &response.state;

    let mut out = format!(
        "{:>4} {:>12} {:>12} {:>14} {:>10} {:>10} {:>12}",
        "i", "kappa", "eps_ca", "m_ca", "h_cc", "z_na_ca", "df"
    );
    if ratios.is_some() {
        out.push_str(&format!(" {:>10}", "m/target"));
    }
    out.push('\n');

    for i in 0..state.len() {
        out.push_str(&format!(
            "{:>4} {:>12.4e} {:>12.4e} {:>14.1} {:>10.2} {:>10.2} {:>12.3e}",
            i,
            state.kappa[i],
            state.eps_ca[i],
            state.m_ca[i],
            state.h_cc[i],
            state.z_na_ca[i],
            state.df[i],
        ));
        if let Some(ratios) = ratios {
            out.push_str(&format!(" {:>10.4}", ratios[i]));
        }
        if response.entries.get(i) != Some(&EntryStatus::Converged) {
            out.push_str("  (unconverged)");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn beam_solves_below_the_elastic_line() {
        let run = load(BEAM).unwrap().build().unwrap();
        let response = run.solve().unwrap();
        assert!(response.converged());

        let target = elastic_target(&run).unwrap();
        let ratios = target.ratios(&response.state.kappa, &response.state.m_ca).unwrap();

        // The tension law is softer than E from the first segment onward.
        assert!(ratios.iter().all(|&r| r > 0.0 && r < 1.0));
        assert!(ratios[39] < ratios[0]);
        assert_relative_eq!(response.state.m_ca[39], 1_483_010.6, max_relative = 1e-3);
    }

    #[test]
    fn table_has_one_row_per_curvature() {
        let run = load(BEAM).unwrap().build().unwrap();
        let response = run.solve().unwrap();

        let plain = table(&response, None);
        assert_eq!(plain.lines().count(), 41);
        assert!(!plain.contains("m/target"));
        assert!(!plain.contains("unconverged"));

        let ratios = Array1::ones(response.state.len());
        let with_target = table(&response, Some(&ratios));
        assert!(with_target.lines().next().unwrap().ends_with("m/target"));
        assert!(with_target.lines().skip(1).all(|row| row.ends_with(" 1.0000")));
    }
}
