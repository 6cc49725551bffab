//! # Moment-curvature of a softening section
//!
//! Solves force equilibrium for every curvature of a run, logs each Newton
//! iteration through `tracing`, and prints the response next to the
//! uncracked elastic line.
//!
//! ```sh
//! cargo run -p flexion-demos --example moment_curvature
//! RUST_LOG=off cargo run -p flexion-demos --example moment_curvature -- run.toml
//! ```

use std::error::Error;

use flexion_core::Observer;
use flexion_demos::{BEAM, elastic_target, load, table};
use flexion_observers::{History, TracingObserver};
use flexion_solvers::equation::newton::{Action, Event};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => BEAM.to_owned(),
    };
    let run = load(&text)?.build()?;

    let mut tracer = TracingObserver::new("moment_curvature");
    let mut history = History::new();
    let response = run.solve_observed(|event: &Event<'_>| -> Option<Action> {
        let _: Option<Action> = history.observe(event);
        tracer.observe(event)
    })?;

    tracing::info!(
        status = ?response.status,
        iters = response.iters,
        unconverged = response.unconverged().count(),
        "solved"
    );

    let target = elastic_target(&run)?;
    let ratios = target.ratios(&response.state.kappa, &response.state.m_ca)?;
    println!("{}", table(&response, Some(&ratios)));

    if let Some(last) = history.last() {
        println!(
            "{} iterations, final max |df| = {:.3e}",
            last.iter, last.residual
        );
    }

    Ok(())
}
