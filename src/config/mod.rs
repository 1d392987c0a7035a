//! Config domain: locomotion tunables, file loading, and validation.

mod loader;
#[cfg(test)]
mod tests;
mod validation;

pub use loader::{ConfigLoadError, DEFAULT_CONFIG_PATH, load_config};
pub use validation::{ValidationError, validate_config};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Every tunable constant the controller reads. Immutable once a controller
/// has been built from it.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocomotionConfig {
    // Camera / look
    pub look_sensitivity: f32,
    /// Pitch limits in degrees; negative looks up.
    pub upper_look_limit: f32,
    pub lower_look_limit: f32,
    pub camera_look_at_distance: f32,

    // Ground sensing
    pub ground_check_distance: f32,
    pub jump_check_distance: f32,

    // Planar velocity model
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Exponential approach rate for the planar velocity (per second).
    pub velocity_blend_rate: f32,
    pub max_aerial_velocity: f32,
    pub aerial_ramp_duration: f32,

    // Rigid body
    pub jump_impulse: f32,
    pub capsule_height: f32,
    pub capsule_center: f32,
    pub capsule_radius: f32,
    pub float_distance: f32,
    /// Fraction of the capsule height given over to step clearance.
    pub step_height: f32,
    pub step_reach_force: f32,
    pub float_disable_duration: f32,

    // Upper-body look-at
    pub look_at_weight: f32,
    pub body_look_at_weight: f32,
    pub head_look_at_weight: f32,
    pub eyes_look_at_weight: f32,
    pub clamp_look_at_weight: f32,

    // Foot IK
    pub foot_ik_weight: f32,
    pub hips_weight: f32,
    pub foot_position_weight: f32,
    pub foot_rotation_weight: f32,
    pub max_step_height: f32,
    pub foot_radius: f32,
    pub ground_offset: f32,
    pub hips_position_speed: f32,
    pub feet_position_speed: f32,
    pub feet_rotation_speed_degrees: f32,
    pub falloff_increase_rate: f32,
    pub falloff_decrease_rate: f32,

    // Audio cues
    pub jump_voice_chance: f32,
    pub footstep_min_weight: f32,
    pub audio_seed: u64,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            look_sensitivity: 12.0,
            upper_look_limit: -45.0,
            lower_look_limit: 75.0,
            camera_look_at_distance: 15.0,

            ground_check_distance: 1.2,
            jump_check_distance: 1.0,

            walk_speed: 2.0,
            run_speed: 4.0,
            velocity_blend_rate: 8.0,
            max_aerial_velocity: 1.0,
            aerial_ramp_duration: 1.0,

            jump_impulse: 195.0,
            capsule_height: 1.575,
            capsule_center: 0.7875,
            capsule_radius: 0.35,
            float_distance: 2.0,
            step_height: 0.25,
            step_reach_force: 20.0,
            float_disable_duration: 0.2,

            look_at_weight: 1.0,
            body_look_at_weight: 0.05,
            head_look_at_weight: 1.0,
            eyes_look_at_weight: 1.0,
            clamp_look_at_weight: 0.5,

            foot_ik_weight: 1.0,
            hips_weight: 0.45,
            foot_position_weight: 1.0,
            foot_rotation_weight: 1.0,
            max_step_height: 0.4,
            foot_radius: 0.05,
            ground_offset: 0.0,
            hips_position_speed: 1.0,
            feet_position_speed: 2.0,
            feet_rotation_speed_degrees: 90.0,
            falloff_increase_rate: 1.0,
            falloff_decrease_rate: 10.0,

            jump_voice_chance: 0.3,
            footstep_min_weight: 0.2,
            audio_seed: 0x5EED_F007,
        }
    }
}

impl LocomotionConfig {
    /// Capsule dimensions after carving out the step clearance at the bottom.
    pub fn capsule_shape(&self) -> CapsuleShape {
        let height = self.capsule_height * (1.0 - self.step_height);
        CapsuleShape {
            radius: self.capsule_radius,
            height,
            center_y: self.capsule_center + (self.capsule_height - height) / 2.0,
        }
    }
}

/// Collider geometry derived from [`LocomotionConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleShape {
    pub radius: f32,
    /// Total height, caps included.
    pub height: f32,
    /// Local height of the collider center above the body root. This is also
    /// the resting distance the floating force holds above the ground.
    pub center_y: f32,
}

impl CapsuleShape {
    /// Length of the cylindrical segment between the two caps.
    pub fn segment_length(&self) -> f32 {
        (self.height - 2.0 * self.radius).max(0.0)
    }
}
