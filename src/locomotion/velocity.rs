//! Locomotion domain: planar and aerial velocity model.

use bevy::prelude::*;

use crate::config::LocomotionConfig;
use crate::input::LocomotionInput;
use crate::locomotion::math::lerp_clamped;
use crate::locomotion::state::BodyState;

#[derive(Debug, Clone, Copy)]
pub struct VelocityModel {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub blend_rate: f32,
    pub max_aerial_velocity: f32,
    pub aerial_ramp_duration: f32,
}

impl VelocityModel {
    pub fn from_config(config: &LocomotionConfig) -> Self {
        Self {
            walk_speed: config.walk_speed,
            run_speed: config.run_speed,
            blend_rate: config.velocity_blend_rate,
            max_aerial_velocity: config.max_aerial_velocity,
            aerial_ramp_duration: config.aerial_ramp_duration,
        }
    }

    pub fn target_speed(&self, input: &LocomotionInput) -> f32 {
        if !input.has_move() {
            0.0
        } else if input.run_held {
            self.run_speed
        } else {
            self.walk_speed
        }
    }

    /// Next planar velocity. Grounded: each axis approaches the input-scaled
    /// target by `blend_rate * dt` of the remaining error. Airborne: unchanged.
    pub fn step_planar(
        &self,
        current: Vec2,
        input: &LocomotionInput,
        grounded: bool,
        dt: f32,
    ) -> Vec2 {
        if !grounded {
            return current;
        }

        let target = input.move_axis * self.target_speed(input);
        let t = self.blend_rate * dt;
        Vec2::new(
            lerp_clamped(current.x, target.x, t),
            lerp_clamped(current.y, target.y, t),
        )
    }

    /// Advance the aerial ramp: linear from zero to the max over the ramp
    /// duration while airborne, reset on the ground. Returns the new value.
    pub fn step_aerial(&self, state: &mut BodyState, dt: f32) -> f32 {
        if state.is_grounded {
            state.aerial_time = 0.0;
            state.aerial_velocity = 0.0;
        } else {
            state.aerial_time += dt;
            let progress = (state.aerial_time / self.aerial_ramp_duration).clamp(0.0, 1.0);
            state.aerial_velocity = lerp_clamped(0.0, self.max_aerial_velocity, progress);
        }
        state.aerial_velocity
    }
}
