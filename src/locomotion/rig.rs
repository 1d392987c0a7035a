//! Locomotion domain: in-memory animation rig.
//!
//! The animation side writes the animated pose into [`PoseRig`] each frame;
//! the controller reads it and writes back IK goals, weights, look-at, and
//! graph parameters for the pose commit.

use bevy::prelude::*;

use crate::locomotion::collaborators::{AnimParam, AnimationRig, LookAtWeights};
use crate::locomotion::state::Foot;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkGoalSlot {
    pub bound: bool,
    /// Animated foot bone position, if the skeleton has the bone.
    pub bone: Option<Vec3>,
    pub animated_position: Vec3,
    pub animated_rotation: Quat,
    pub position: Vec3,
    pub rotation: Quat,
    pub position_weight: f32,
    pub rotation_weight: f32,
}

impl Default for IkGoalSlot {
    fn default() -> Self {
        Self {
            bound: false,
            bone: None,
            animated_position: Vec3::ZERO,
            animated_rotation: Quat::IDENTITY,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            position_weight: 0.0,
            rotation_weight: 0.0,
        }
    }
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct PoseRig {
    pub goals: [IkGoalSlot; 2],
    pub animated_body_position: Vec3,
    pub body_position: Vec3,
    pub look_at: Option<(Vec3, LookAtWeights)>,
    pub horizontal_velocity: f32,
    pub vertical_velocity: f32,
    pub aerial_velocity: f32,
    pub is_grounded: bool,
}

impl PoseRig {
    pub fn goal(&self, foot: Foot) -> &IkGoalSlot {
        &self.goals[foot.index()]
    }

    pub fn goal_mut(&mut self, foot: Foot) -> &mut IkGoalSlot {
        &mut self.goals[foot.index()]
    }

    /// Bind both foot IK goals. A rig starts unbound until the skeleton is
    /// resolved.
    pub fn bind_ik_goals(&mut self) {
        for goal in &mut self.goals {
            goal.bound = true;
        }
    }

    /// Write this frame's animated foot pose. The bone and the IK goal share
    /// the same position.
    pub fn set_animated_foot(&mut self, foot: Foot, position: Vec3, rotation: Quat) {
        let goal = self.goal_mut(foot);
        goal.bone = Some(position);
        goal.animated_position = position;
        goal.animated_rotation = rotation;
    }

    pub fn float(&self, param: AnimParam) -> f32 {
        match param {
            AnimParam::HorizontalVelocity => self.horizontal_velocity,
            AnimParam::VerticalVelocity => self.vertical_velocity,
            AnimParam::AerialVelocity => self.aerial_velocity,
            AnimParam::IsGrounded => f32::from(u8::from(self.is_grounded)),
        }
    }
}

impl AnimationRig for PoseRig {
    fn has_ik_goal(&self, foot: Foot) -> bool {
        self.goal(foot).bound
    }

    fn foot_bone_position(&self, foot: Foot) -> Option<Vec3> {
        self.goal(foot).bone
    }

    fn ik_position(&self, foot: Foot) -> Vec3 {
        self.goal(foot).animated_position
    }

    fn ik_rotation(&self, foot: Foot) -> Quat {
        self.goal(foot).animated_rotation
    }

    fn set_ik_position(&mut self, foot: Foot, position: Vec3) {
        self.goal_mut(foot).position = position;
    }

    fn set_ik_rotation(&mut self, foot: Foot, rotation: Quat) {
        self.goal_mut(foot).rotation = rotation;
    }

    fn set_ik_position_weight(&mut self, foot: Foot, weight: f32) {
        self.goal_mut(foot).position_weight = weight;
    }

    fn set_ik_rotation_weight(&mut self, foot: Foot, weight: f32) {
        self.goal_mut(foot).rotation_weight = weight;
    }

    fn body_position(&self) -> Vec3 {
        self.animated_body_position
    }

    fn set_body_position(&mut self, position: Vec3) {
        self.body_position = position;
    }

    fn set_look_at(&mut self, target: Vec3, weights: LookAtWeights) {
        self.look_at = Some((target, weights));
    }

    fn set_float(&mut self, param: AnimParam, value: f32) {
        match param {
            AnimParam::HorizontalVelocity => self.horizontal_velocity = value,
            AnimParam::VerticalVelocity => self.vertical_velocity = value,
            AnimParam::AerialVelocity => self.aerial_velocity = value,
            AnimParam::IsGrounded => self.is_grounded = value != 0.0,
        }
    }

    fn set_bool(&mut self, param: AnimParam, value: bool) {
        self.set_float(param, f32::from(u8::from(value)));
    }
}
