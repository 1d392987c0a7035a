use std::path::{Path, PathBuf};

use avian3d::prelude::*;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use super::systems::read_input;
use super::{AvianBody, FollowCamera, config_or_default};
use crate::config::LocomotionConfig;
use crate::input::LocomotionInput;
use crate::locomotion::{CameraRig, ForceMode, RigidBodyHandle};

fn write_temp_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "footfall-host-{}-{}.ron",
        name,
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_config_falls_back_when_missing() {
    let config = config_or_default(Path::new("does/not/exist/locomotion.ron"));
    assert_eq!(config, LocomotionConfig::default());
}

#[test]
fn test_config_falls_back_when_invalid() {
    let path = write_temp_config("invalid", "(walk_speed: -1.0)");
    let config = config_or_default(&path);
    std::fs::remove_file(&path).ok();
    assert_eq!(config, LocomotionConfig::default());
}

#[test]
fn test_config_loads_valid_file() {
    let path = write_temp_config("valid", "(walk_speed: 3.0, run_speed: 6.0)");
    let config = config_or_default(&path);
    std::fs::remove_file(&path).ok();
    assert_eq!(config.walk_speed, 3.0);
    assert_eq!(config.run_speed, 6.0);
    assert_eq!(config.jump_impulse, LocomotionConfig::default().jump_impulse);
}

fn body<'a>(transform: &'a mut Transform, velocity: &'a mut LinearVelocity) -> AvianBody<'a> {
    AvianBody {
        transform,
        velocity,
        mass: 65.0,
        local_center_of_mass: Vec3::new(0.0, 0.9, 0.0),
        dt: 0.02,
    }
}

#[test]
fn test_avian_body_force_modes() {
    let mut transform = Transform::default();
    let mut velocity = LinearVelocity::default();
    let mut body = body(&mut transform, &mut velocity);

    body.add_force(Vec3::new(1.0, 0.0, 0.0), ForceMode::VelocityChange);
    assert_eq!(body.linear_velocity(), Vec3::new(1.0, 0.0, 0.0));

    body.add_force(Vec3::Y * 195.0, ForceMode::Impulse);
    assert!((body.linear_velocity().y - 3.0).abs() < 1e-5);

    body.add_force(Vec3::Z * 65.0, ForceMode::Force);
    assert!((body.linear_velocity().z - 0.02).abs() < 1e-6);
}

#[test]
fn test_avian_body_without_mass_ignores_impulses() {
    let mut transform = Transform::default();
    let mut velocity = LinearVelocity::default();
    let mut body = body(&mut transform, &mut velocity);
    body.mass = 0.0;

    body.add_force(Vec3::Y * 100.0, ForceMode::Impulse);
    body.add_force(Vec3::Y * 100.0, ForceMode::Force);
    assert_eq!(body.linear_velocity(), Vec3::ZERO);
}

#[test]
fn test_avian_body_frame() {
    let mut transform = Transform::from_xyz(1.0, 2.0, 3.0);
    let mut velocity = LinearVelocity::default();
    let mut body = body(&mut transform, &mut velocity);

    assert_eq!(body.world_center_of_mass(), Vec3::new(1.0, 2.9, 3.0));

    body.rotate(Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2));
    let forward = body.rotation() * Vec3::NEG_Z;
    assert!((forward - Vec3::X).length() < 1e-5);
    assert_eq!(transform.translation, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_follow_camera_takes_world_pose() {
    let mut transform = Transform::default();
    let mut camera = FollowCamera {
        transform: &mut transform,
        root: Vec3::new(0.0, 1.6, 0.0),
        look_target: None,
    };
    let rotation = Quat::from_rotation_x(-0.3);

    let root = camera.root_position();
    camera.set_pose(root, rotation);
    camera.set_look_target(Vec3::ONE);
    assert_eq!(camera.look_target, Some(Vec3::ONE));
    assert_eq!(transform.translation, Vec3::new(0.0, 1.6, 0.0));
    assert_eq!(transform.rotation, rotation);
}

fn input_app() -> App {
    let mut app = App::new();
    app.init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<AccumulatedMouseMotion>()
        .init_resource::<LocomotionInput>()
        .add_systems(Update, read_input);
    app
}

#[test]
fn test_read_input_keeps_tap_within_one_frame() {
    let mut app = input_app();
    {
        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.press(KeyCode::Space);
        keyboard.release(KeyCode::Space);
        keyboard.press(KeyCode::Tab);
        keyboard.release(KeyCode::Tab);
    }
    app.update();

    let input = *app.world().resource::<LocomotionInput>();
    assert!(input.jump_just_pressed);
    assert!(input.inventory_just_pressed);
    assert!(!input.interact_just_pressed);
}

#[test]
fn test_read_input_edges_last_one_frame() {
    let mut app = input_app();
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::KeyE);
    app.update();
    assert!(app.world().resource::<LocomotionInput>().interact_just_pressed);

    // Still held: the edge is gone.
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
    app.update();
    assert!(!app.world().resource::<LocomotionInput>().interact_just_pressed);
}

#[test]
fn test_read_input_axes_and_run() {
    let mut app = input_app();
    {
        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::KeyA);
        keyboard.press(KeyCode::ShiftLeft);
    }
    app.world_mut().resource_mut::<AccumulatedMouseMotion>().delta = Vec2::new(4.0, 2.0);
    app.update();

    let input = *app.world().resource::<LocomotionInput>();
    assert_eq!(input.move_axis, Vec2::new(-1.0, 1.0));
    assert_eq!(input.look_axis, Vec2::new(4.0, -2.0));
    assert!(input.run_held);
    assert!(!input.jump_just_pressed);
}
