//! Locomotion domain: blending the animated pose toward the solver targets.
//!
//! Everything here moves at a bounded rate per second, so a target jump in
//! the solver never produces a pose jump.

use bevy::prelude::*;

use crate::config::LocomotionConfig;
use crate::locomotion::collaborators::LookAtWeights;
use crate::locomotion::math::{BodyFrame, move_towards, rotate_towards, valid_dt};
use crate::locomotion::state::{Foot, FootState, FootTarget, PelvisState};

/// Gate for all foot and pelvis correction, stored normalized in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FalloffWeight {
    raw: f32,
}

impl FalloffWeight {
    /// Approach 1 while any foot is grounded, 0 otherwise. Rates are per
    /// second and scaled by the movement-speed estimate.
    pub fn step(
        &mut self,
        any_foot_grounded: bool,
        movement_speed: f32,
        increase_rate: f32,
        decrease_rate: f32,
        dt: f32,
    ) {
        let target = if any_foot_grounded { 1.0 } else { 0.0 };
        if self.raw == target {
            return;
        }
        let rate = if self.raw < target {
            increase_rate
        } else {
            decrease_rate
        };
        self.raw = move_towards(self.raw, target, rate * movement_speed * dt).clamp(0.0, 1.0);
    }

    pub fn normalized(&self) -> f32 {
        self.raw
    }

    /// Effective blend weight in [0, foot_ik_weight].
    pub fn value(&self, foot_ik_weight: f32) -> f32 {
        self.raw * foot_ik_weight
    }
}

/// Animated pose read from the animation system this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedPose {
    pub feet: [(Vec3, Quat); 2],
    pub body_position: Vec3,
}

/// Everything one IK pass reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkInputs {
    pub body: BodyFrame,
    pub falloff: f32,
    pub look_target: Vec3,
    pub animated: AnimatedPose,
}

/// Smoothed state carried from one IK pass to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlendState {
    pub feet: [FootState; 2],
    pub pelvis: PelvisState,
}

impl BlendState {
    pub fn foot(&self, foot: Foot) -> &FootState {
        &self.feet[foot.index()]
    }

    pub fn foot_mut(&mut self, foot: Foot) -> &mut FootState {
        &mut self.feet[foot.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub position_weight: f32,
    pub rotation_weight: f32,
}

/// Output of one IK pass, in application order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkPose {
    pub look_target: Vec3,
    pub look_weights: LookAtWeights,
    pub body_position: Vec3,
    pub feet: [FootPose; 2],
}

impl IkPose {
    pub fn foot(&self, foot: Foot) -> &FootPose {
        &self.feet[foot.index()]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IkBlender {
    pub look_weights: LookAtWeights,
    pub hips_weight: f32,
    pub foot_position_weight: f32,
    pub foot_rotation_weight: f32,
    pub ground_offset: f32,
    pub hips_position_speed: f32,
    pub feet_position_speed: f32,
    pub feet_rotation_speed: f32,
}

impl IkBlender {
    pub fn from_config(config: &LocomotionConfig) -> Self {
        Self {
            look_weights: LookAtWeights {
                weight: config.look_at_weight,
                body: config.body_look_at_weight,
                head: config.head_look_at_weight,
                eyes: config.eyes_look_at_weight,
                clamp: config.clamp_look_at_weight,
            },
            hips_weight: config.hips_weight,
            foot_position_weight: config.foot_position_weight,
            foot_rotation_weight: config.foot_rotation_weight,
            ground_offset: config.ground_offset,
            hips_position_speed: config.hips_position_speed,
            feet_position_speed: config.feet_position_speed,
            feet_rotation_speed: config.feet_rotation_speed_degrees.to_radians(),
        }
    }

    /// One IK pass. Pure: the caller commits the returned state. With an
    /// unusable `dt` the smoothed state holds still.
    pub fn evaluate(
        &self,
        state: &BlendState,
        inputs: &IkInputs,
        dt: f32,
    ) -> (IkPose, BlendState) {
        let dt = if valid_dt(dt) { dt } else { 0.0 };
        let mut next = *state;

        let body_position = self.blend_pelvis(&mut next, inputs, dt);
        let feet = Foot::ALL.map(|foot| {
            let (position, rotation) = inputs.animated.feet[foot.index()];
            self.blend_foot(next.foot_mut(foot), position, rotation, inputs, dt)
        });

        let pose = IkPose {
            look_target: inputs.look_target,
            look_weights: self.look_weights,
            body_position,
            feet,
        };
        (pose, next)
    }

    fn blend_pelvis(&self, state: &mut BlendState, inputs: &IkInputs, dt: f32) -> Vec3 {
        let body_y = inputs.body.position.y;
        let left = state.foot(Foot::Left).target.position.y - body_y;
        let right = state.foot(Foot::Right).target.position.y - body_y;

        let target = left.min(right) * (self.hips_weight * inputs.falloff);
        state.pelvis.offset =
            move_towards(state.pelvis.offset, target, self.hips_position_speed * dt);

        let mut position = inputs.animated.body_position;
        position.y += state.pelvis.offset + self.ground_offset;
        position
    }

    fn blend_foot(
        &self,
        foot: &mut FootState,
        animated_position: Vec3,
        animated_rotation: Quat,
        inputs: &IkInputs,
        dt: f32,
    ) -> FootPose {
        let FootTarget {
            position: target_position,
            normal,
            rotation: target_rotation,
            ..
        } = foot.target;

        let mut local = inputs.body.to_local(animated_position);
        let local_target = inputs.body.to_local(target_position);

        foot.height_offset = move_towards(
            foot.height_offset,
            local_target.y,
            self.feet_position_speed * dt,
        );
        local.y += foot.height_offset;

        let position = inputs.body.to_world(local) + normal * self.ground_offset;

        // Kept in this exact form; the products do not commute.
        let relative = (target_rotation * animated_rotation).inverse() * animated_rotation;
        foot.rotation_offset = rotate_towards(
            foot.rotation_offset,
            relative.inverse(),
            self.feet_rotation_speed * dt,
        );

        FootPose {
            position,
            rotation: animated_rotation * foot.rotation_offset,
            position_weight: self.foot_position_weight * inputs.falloff,
            rotation_weight: self.foot_rotation_weight * inputs.falloff,
        }
    }
}
