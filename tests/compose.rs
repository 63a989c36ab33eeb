use std::path::Path;

use docker_compose_types::Compose;
use easy_install::compose::{self, BASE_LAYERS, HTTPS_LAYER};
use easy_install::{ComposePlan, DeploymentProfile, InstallError};

fn profile(is_production: bool) -> DeploymentProfile {
    DeploymentProfile::new("dev.example.test", "example-dev", "a@example.test", is_production)
}

#[test]
fn development_has_no_https_layer() {
    let plan = ComposePlan::for_profile(&profile(false));

    assert_eq!(plan.layers, BASE_LAYERS.to_vec());
    assert!(!plan.config_args().contains(&HTTPS_LAYER.to_string()));
}

#[test]
fn production_adds_https_layer_last() {
    let plan = ComposePlan::for_profile(&profile(true));

    assert_eq!(plan.layers.len(), 4);
    assert_eq!(plan.layers.last().map(String::as_str), Some(HTTPS_LAYER));
    assert!(plan.config_args().contains(&HTTPS_LAYER.to_string()));
}

#[test]
fn config_args_layout() {
    let plan = ComposePlan::for_profile(&profile(false));

    assert_eq!(
        plan.config_args(),
        vec![
            "compose",
            "--project-name",
            "example-dev",
            "-f",
            "compose.yaml",
            "-f",
            "overrides/compose.postgres.yaml",
            "-f",
            "overrides/compose.redis.yaml",
            "--env-file",
            ".env",
            "config",
        ]
    );
}

#[test]
fn every_layer_is_preceded_by_file_flag() {
    let plan = ComposePlan::for_profile(&profile(true));
    let args = plan.config_args();

    for layer in &plan.layers {
        let idx = args.iter().position(|a| a == layer).unwrap();
        assert_eq!(args[idx - 1], "-f");
    }
}

#[test]
fn project_name_comes_from_profile() {
    let plan = ComposePlan::for_profile(&DeploymentProfile::production());

    assert_eq!(plan.project, "taywan");
    assert_eq!(plan.up_args(Path::new("x.yml"))[2], "taywan");
}

#[test]
fn services_listed_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let rendered = dir.path().join("example-dev-compose.yml");
    std::fs::write(
        &rendered,
        "services:\n  \
           backend:\n    \
             image: frappe/erpnext:v15\n  \
           frontend:\n    \
             image: frappe/erpnext:v15\n    \
             ports:\n      \
               - \"8080:8080\"\n  \
           db:\n    \
             image: postgres:13.5\n",
    )
    .unwrap();

    let services = compose::services(&rendered).unwrap();

    assert_eq!(services, vec!["backend", "frontend", "db"]);
}

#[test]
fn services_of_invalid_yaml_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let rendered = dir.path().join("broken.yml");
    std::fs::write(&rendered, "services: [unterminated\n").unwrap();

    let err = compose::services(&rendered).unwrap_err();

    assert!(matches!(err, InstallError::ComposeParse(_)));
}

#[test]
fn rendered_fixture_round_trips_through_compose_types() {
    let yaml = "services:\n  websocket:\n    image: frappe/erpnext:v15\n";

    let parsed: Compose = serde_yaml::from_str(yaml).expect("parse");

    assert!(parsed.services.0.contains_key("websocket"));
}
