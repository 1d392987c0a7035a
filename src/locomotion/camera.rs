//! Locomotion domain: late-phase camera look and rig placement.

use bevy::prelude::*;

use crate::config::LocomotionConfig;

/// Rotations produced by one frame of look input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookUpdate {
    /// Yaw applied to the body, about world up.
    pub body_yaw: Quat,
    /// Camera rotation relative to the body (pitch only).
    pub camera_local: Quat,
}

#[derive(Debug, Clone, Copy)]
pub struct CameraLook {
    pub sensitivity: f32,
    pub upper_limit: f32,
    pub lower_limit: f32,
    pub look_at_distance: f32,
}

impl CameraLook {
    pub fn from_config(config: &LocomotionConfig) -> Self {
        Self {
            sensitivity: config.look_sensitivity,
            upper_limit: config.upper_look_limit,
            lower_limit: config.lower_look_limit,
            look_at_distance: config.camera_look_at_distance,
        }
    }

    /// Integrate look input into `pitch` (degrees, positive looks down) and
    /// return the body yaw and camera pitch rotations.
    pub fn look(&self, pitch: &mut f32, look_axis: Vec2, dt: f32) -> LookUpdate {
        let yaw_degrees = look_axis.x * self.sensitivity * dt;
        let pitch_degrees = look_axis.y * self.sensitivity * dt;

        *pitch = (*pitch - pitch_degrees).clamp(self.upper_limit, self.lower_limit);

        LookUpdate {
            body_yaw: Quat::from_rotation_y(-yaw_degrees.to_radians()),
            camera_local: Quat::from_rotation_x(-pitch.to_radians()),
        }
    }

    /// Point straight ahead of the camera at the configured distance.
    pub fn look_target(&self, camera_position: Vec3, camera_rotation: Quat) -> Vec3 {
        camera_position + camera_rotation * Vec3::NEG_Z * self.look_at_distance
    }
}
