//! Host domain: Bevy + avian3d integration for the locomotion controller.
//!
//! Schedules:
//! - `FixedUpdate`: the simulation tick (ground, float, velocity, jump, foot solve)
//! - `Update`: input sampling, then edge latching
//! - `PostUpdate`: IK evaluation, then the late camera pass, then audio cues

mod adapters;
mod components;
#[cfg(feature = "dev-tools")]
mod dev;
mod systems;
#[cfg(test)]
mod tests;

pub use adapters::{AvianBody, AvianGround, BodySnapshot, FollowCamera};
pub use components::{CameraMount, GroundLayer, LocomotionAgent, PlayerCamera};

use std::path::Path;

use avian3d::prelude::*;
use bevy::ecs::message::Message;
use bevy::prelude::*;
use bevy::transform::TransformSystems;

use crate::config::{DEFAULT_CONFIG_PATH, LocomotionConfig, load_config, validate_config};
use crate::input::LocomotionInput;
use crate::locomotion::AudioCue;

/// Fired for every audio cue a controller raises.
#[derive(Debug, Clone, Copy)]
pub struct AudioCueMessage {
    pub agent: Entity,
    pub cue: AudioCue,
}

impl Message for AudioCueMessage {}

pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LocomotionInput>()
            .add_message::<AudioCueMessage>()
            .add_systems(PreStartup, load_locomotion_config)
            .add_systems(Startup, systems::lock_cursor_on_start)
            .add_systems(
                Update,
                (systems::read_input, systems::advance_frame).chain(),
            )
            .add_systems(FixedUpdate, systems::simulation_tick)
            .add_systems(
                PostUpdate,
                (
                    systems::evaluate_ik,
                    systems::resolve_camera_late,
                    systems::forward_audio_cues,
                )
                    .chain()
                    .before(TransformSystems::Propagate),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(
            PostUpdate,
            dev::draw_locomotion_gizmos.after(systems::forward_audio_cues),
        );
    }
}

fn load_locomotion_config(mut commands: Commands) {
    commands.insert_resource(config_or_default(Path::new(DEFAULT_CONFIG_PATH)));
}

/// Load and validate the config at `path`, falling back to the built-in
/// defaults when either step fails.
pub fn config_or_default(path: &Path) -> LocomotionConfig {
    let config = match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}. Using default locomotion config.", e);
            return LocomotionConfig::default();
        }
    };

    let errors = validate_config(&config);
    if !errors.is_empty() {
        for error in &errors {
            warn!("Locomotion config: {}", error);
        }
        warn!(
            "Locomotion config {} has {} invalid field(s). Using defaults.",
            path.display(),
            errors.len()
        );
        return LocomotionConfig::default();
    }

    info!("Loaded locomotion config from {}", path.display());
    config
}

/// Physics components for a locomotion agent's root entity. The
/// capsule collider goes on a child; see [`agent_collider`]. Insert a
/// [`PoseRig`](crate::locomotion::PoseRig) alongside.
pub fn agent_body(mass: f32) -> impl Bundle {
    (
        RigidBody::Dynamic,
        LockedAxes::ROTATION_LOCKED,
        LinearVelocity::default(),
        Mass(mass),
        CameraMount::default(),
    )
}

/// Capsule collider for an agent, raised so the step clearance sits below it.
pub fn agent_collider(config: &LocomotionConfig) -> impl Bundle {
    let shape = config.capsule_shape();
    (
        Collider::capsule(shape.radius, shape.segment_length()),
        Transform::from_xyz(0.0, shape.center_y, 0.0),
        Friction::new(0.0),
        CollisionLayers::new(GroundLayer::Player, [GroundLayer::Default, GroundLayer::Ground]),
    )
}
