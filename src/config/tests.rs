//! Config domain: tests for defaults, parsing, and validation.

use std::path::Path;

use super::loader::{ConfigFormat, parse_config};
use super::{LocomotionConfig, load_config, validate_config};

#[test]
fn test_default_config_is_valid() {
    let config = LocomotionConfig::default();
    assert!(validate_config(&config).is_empty());
}

#[test]
fn test_capsule_shape_reserves_step_clearance() {
    let shape = LocomotionConfig::default().capsule_shape();
    assert!((shape.height - 1.181_25).abs() < 1e-5);
    assert!((shape.center_y - 0.984_375).abs() < 1e-5);
    assert!((shape.radius - 0.35).abs() < f32::EPSILON);
    // Bottom of the shortened capsule sits above the root by the carved-out clearance.
    let bottom = shape.center_y - shape.height / 2.0;
    assert!((bottom - 0.393_75).abs() < 1e-5);
}

#[test]
fn test_parse_partial_ron_keeps_defaults() {
    let config = parse_config(
        "(walk_speed: 1.5, run_speed: 5.0)",
        ConfigFormat::Ron,
        "inline.ron",
    )
    .unwrap();
    assert_eq!(config.walk_speed, 1.5);
    assert_eq!(config.run_speed, 5.0);
    assert_eq!(config.max_step_height, LocomotionConfig::default().max_step_height);
}

#[test]
fn test_parse_json() {
    let config = parse_config(
        r#"{ "jump_impulse": 150.0, "foot_ik_weight": 0.5 }"#,
        ConfigFormat::Json,
        "inline.json",
    )
    .unwrap();
    assert_eq!(config.jump_impulse, 150.0);
    assert_eq!(config.foot_ik_weight, 0.5);
}

#[test]
fn test_parse_rejects_unknown_field() {
    let err = parse_config("(walk_sped: 1.0)", ConfigFormat::Ron, "typo.ron").unwrap_err();
    assert_eq!(err.file, "typo.ron");
    assert!(err.message.starts_with("Parse error"));
}

#[test]
fn test_load_rejects_unknown_extension() {
    let err = load_config(Path::new("locomotion.toml")).unwrap_err();
    assert!(err.message.contains("unsupported extension"));
}

#[test]
fn test_shipped_config_matches_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/config/locomotion.ron");
    let config = load_config(&path).unwrap();
    assert_eq!(config, LocomotionConfig::default());
}

#[test]
fn test_validation_reports_each_violation() {
    let config = LocomotionConfig {
        walk_speed: 0.0,
        foot_ik_weight: 1.5,
        upper_look_limit: 80.0,
        jump_check_distance: 2.0,
        ..Default::default()
    };

    let errors = validate_config(&config);
    let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
    assert!(fields.contains(&"walk_speed"));
    assert!(fields.contains(&"foot_ik_weight"));
    assert!(fields.contains(&"upper_look_limit"));
    assert!(fields.contains(&"jump_check_distance"));
    assert_eq!(errors.len(), 4);
}

#[test]
fn test_validation_rejects_nan() {
    let config = LocomotionConfig {
        velocity_blend_rate: f32::NAN,
        ..Default::default()
    };
    let errors = validate_config(&config);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "velocity_blend_rate");
}

#[test]
fn test_validation_rejects_nan_look_limits() {
    let config = LocomotionConfig {
        upper_look_limit: f32::NAN,
        lower_look_limit: f32::NAN,
        ..Default::default()
    };
    let errors = validate_config(&config);
    let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["upper_look_limit", "lower_look_limit"]);
}

#[test]
fn test_validation_rejects_non_finite_offsets() {
    let config = LocomotionConfig {
        ground_offset: f32::NAN,
        max_aerial_velocity: f32::INFINITY,
        float_disable_duration: f32::NAN,
        ..Default::default()
    };
    let errors = validate_config(&config);
    let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
    assert_eq!(
        fields,
        vec!["max_aerial_velocity", "float_disable_duration", "ground_offset"]
    );
}
