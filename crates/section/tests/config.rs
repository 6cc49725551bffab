use approx::assert_relative_eq;

use flexion_section::{
    CurvatureConfig, Error, GeometryError, InputError, RunConfig, SeedKind,
};

const RUN: &str = r#"
compression = [[0.0, 0.0], [0.003, 180.0], [0.010, 180.0]]
tension = [[0.0, 0.0], [0.002, 50.0], [0.004, 50.0], [0.008, 75.0]]
eps_ca_max = 0.002
curvature = { start = 6.25e-7, stop = 2.5e-5, count = 40 }

[geometry]
h = 300.0

[solver]
max_iters = 80
"#;

#[test]
fn loads_toml_and_solves() {
    let config: RunConfig = toml::from_str(RUN).expect("valid toml");

    assert_eq!(
        config.curvature,
        CurvatureConfig::Span {
            start: 6.25e-7,
            stop: 2.5e-5,
            count: 40
        }
    );
    assert_eq!(config.solver.max_iters, Some(80));
    assert_eq!(config.solver.residual_tol, None);
    assert_eq!(config.seed, SeedKind::Linear);

    let run = config.build().expect("valid run");
    assert_eq!(run.kappa.len(), 40);
    assert_eq!(run.config.max_iters, 80);
    assert_relative_eq!(run.config.residual_tol, 1e-10);
    assert_relative_eq!(run.model.geometry().h_u(), 150.0);
    assert_relative_eq!(run.model.geometry().e(), 60_000.0);

    let response = run.solve().expect("solves");
    assert!(response.converged());
    assert_relative_eq!(response.state.m_ca[39], 1_483_010.6, max_relative = 1e-3);
}

#[test]
fn loads_json_with_explicit_curvatures() {
    let json = r#"{
        "compression": [[0.0, 0.0], [0.003, 180.0], [0.010, 180.0]],
        "tension": [[0.0, 0.0], [0.002, 50.0], [0.004, 50.0], [0.008, 75.0]],
        "geometry": { "h": 300.0, "h_u": 120.0, "b": 10.0 },
        "curvature": [1e-6, 5e-6, 1e-5],
        "eps_ca_max": 0.002,
        "seed": "elastic"
    }"#;

    let config: RunConfig = serde_json::from_str(json).expect("valid json");
    assert_eq!(config.curvature, CurvatureConfig::Values(vec![1e-6, 5e-6, 1e-5]));
    assert_eq!(config.seed, SeedKind::Elastic);

    let run = config.build().expect("valid run");
    assert_relative_eq!(run.model.geometry().h_d(), 180.0);
    assert_relative_eq!(run.model.geometry().b(), 10.0);

    let response = run.solve().expect("solves");
    assert!(response.converged());
    assert_eq!(response.state.len(), 3);
}

#[test]
fn round_trips_through_json() {
    let config: RunConfig = toml::from_str(RUN).unwrap();
    let text = serde_json::to_string(&config).unwrap();
    let reparsed: RunConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(config, reparsed);
}

#[test]
fn rejects_unknown_fields() {
    let text = RUN.replace("eps_ca_max", "eps_max");
    assert!(toml::from_str::<RunConfig>(&text).is_err());

    let text = RUN.replace("[geometry]", "seed = \"parabolic\"\n\n[geometry]");
    assert!(toml::from_str::<RunConfig>(&text).is_err());
}

#[test]
fn build_reports_invalid_parts() {
    let mut config: RunConfig = toml::from_str(RUN).unwrap();

    config.geometry.h_u = Some(400.0);
    assert!(matches!(
        config.build(),
        Err(Error::Geometry(GeometryError::NonPositive { name: "h_d", .. }))
    ));

    config.geometry.h_u = None;
    config.curvature = CurvatureConfig::Span {
        start: 1e-6,
        stop: 1e-5,
        count: 0,
    };
    assert!(matches!(
        config.build(),
        Err(Error::Input(InputError::EmptySpan))
    ));

    config.curvature = CurvatureConfig::Values(vec![1e-6, -1e-6]);
    assert!(matches!(
        config.build(),
        Err(Error::Input(InputError::InvalidCurvature { index: 1, .. }))
    ));

    config.curvature = CurvatureConfig::Values(vec![1e-6]);
    config.eps_ca_max = 0.0;
    assert!(matches!(
        config.build(),
        Err(Error::Input(InputError::InvalidStrainLimit(_)))
    ));

    config.eps_ca_max = 0.002;
    config.solver.fd_rel_step = Some(-1.0);
    assert!(matches!(config.build(), Err(Error::Solver(_))));

    config.solver.fd_rel_step = None;
    config.tension = vec![(0.0, 0.0)].into();
    assert!(matches!(config.build(), Err(Error::Curve(_))));
}
