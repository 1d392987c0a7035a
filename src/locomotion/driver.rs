//! Locomotion domain: forces and impulses applied to the rigid body.

use bevy::prelude::*;

use crate::config::LocomotionConfig;
use crate::locomotion::collaborators::{ForceMode, GroundQuery, RigidBodyHandle};
use crate::locomotion::math::{BodyFrame, planar_to_local};
use crate::locomotion::state::BodyState;

/// Suspension error below which no correction is applied.
pub const FLOAT_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy)]
pub struct RigidBodyDriver {
    /// Local height of the collider center; the floating force holds the
    /// ground at this distance below it.
    pub resting_height: f32,
    pub float_distance: f32,
    pub step_reach_force: f32,
    pub float_disable_duration: f32,
    pub jump_impulse: f32,
}

impl RigidBodyDriver {
    pub fn from_config(config: &LocomotionConfig) -> Self {
        Self {
            resting_height: config.capsule_shape().center_y,
            float_distance: config.float_distance,
            step_reach_force: config.step_reach_force,
            float_disable_duration: config.float_disable_duration,
            jump_impulse: config.jump_impulse,
        }
    }

    pub fn reset_velocity(&self, body: &mut dyn RigidBodyHandle) {
        body.set_linear_velocity(Vec3::ZERO);
    }

    /// Whether the floating force may run this tick.
    pub fn float_enabled(&self, grounded: bool, since_jump: Option<f32>) -> bool {
        grounded && since_jump.is_none_or(|elapsed| elapsed >= self.float_disable_duration)
    }

    /// Spring the collider center back to its resting height above the
    /// ground. Returns the vertical velocity change applied, if any.
    pub fn float_body(
        &self,
        body: &mut dyn RigidBodyHandle,
        world: &dyn GroundQuery,
    ) -> Option<f32> {
        let frame = BodyFrame {
            position: body.position(),
            rotation: body.rotation(),
            scale: body.scale(),
        };
        let origin = frame.to_world(Vec3::Y * self.resting_height);
        let hit = world.ray_cast(origin, Dir3::NEG_Y, self.float_distance)?;

        let error = self.resting_height * frame.scale.y - hit.distance;
        if error.abs() < FLOAT_EPSILON {
            return None;
        }

        let lift = error * self.step_reach_force - body.linear_velocity().y;
        body.add_force(Vec3::new(0.0, lift, 0.0), ForceMode::VelocityChange);
        Some(lift)
    }

    /// Grounded: snap horizontal velocity onto the smoothed target. Airborne:
    /// keep pushing with the velocity captured at take-off.
    pub fn apply_locomotion(&self, body: &mut dyn RigidBodyHandle, state: &BodyState) {
        if state.is_grounded {
            let desired = body.rotation() * planar_to_local(state.planar_velocity);
            let current = body.linear_velocity();
            let correction = Vec3::new(desired.x - current.x, 0.0, desired.z - current.z);
            body.add_force(correction, ForceMode::VelocityChange);
        } else {
            body.add_force(state.airborne_velocity, ForceMode::Force);
        }
    }

    /// Cancel vertical velocity, then kick upward with a fixed impulse.
    pub fn jump(&self, body: &mut dyn RigidBodyHandle) {
        let vertical = body.linear_velocity().y;
        body.add_force(Vec3::new(0.0, -vertical, 0.0), ForceMode::VelocityChange);
        body.add_force(Vec3::Y * self.jump_impulse, ForceMode::Impulse);
    }
}
