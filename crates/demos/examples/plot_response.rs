//! Plots the demo section's moment-curvature response against the elastic
//! line, then the Newton convergence history on a log scale.
//!
//! ```sh
//! cargo run -p flexion-demos --example plot_response --features plot
//! ```

use std::error::Error;

use flexion_demos::{BEAM, elastic_target, load};
use flexion_observers::{PlotObserver, ShowConfig};

fn main() -> Result<(), Box<dyn Error>> {
    let run = load(BEAM)?.build()?;

    let mut convergence = PlotObserver::<2>::new(["max |df|", "unconverged"]);
    let response = run.solve_observed(&mut convergence)?;

    let state = &response.state;
    let target = elastic_target(&run)?;

    let mut curve = PlotObserver::<2>::new(["m_ca", "E I kappa"]);
    for (&kappa, &moment) in state.kappa.iter().zip(&state.m_ca) {
        curve.record(kappa, [Some(moment), Some(target.moment(kappa)?)]);
    }

    curve.show(
        ShowConfig::new()
            .title("Moment-curvature")
            .x_label("kappa")
            .y_label("moment")
            .legend(),
    )?;
    convergence.show(
        ShowConfig::new()
            .title("Newton convergence")
            .x_label("iteration")
            .legend()
            .log_y(),
    )?;

    Ok(())
}
