//! Locomotion domain: per-foot ground contact solver.

use bevy::prelude::*;

use crate::config::LocomotionConfig;
use crate::locomotion::collaborators::GroundQuery;
use crate::locomotion::math::align_up_to;
use crate::locomotion::state::FootTarget;

#[derive(Debug, Clone, Copy)]
pub struct FootIkSolver {
    pub max_step_height: f32,
    pub foot_radius: f32,
    pub ground_offset: f32,
}

impl FootIkSolver {
    pub fn from_config(config: &LocomotionConfig) -> Self {
        Self {
            max_step_height: config.max_step_height,
            foot_radius: config.foot_radius,
            ground_offset: config.ground_offset,
        }
    }

    /// Sphere-cast down from max step height above the body, under the
    /// animated foot bone. A miss, or a hit at or beyond max step height,
    /// leaves the foot dangling: height pinned below the body and no tilt.
    pub fn solve(
        &self,
        world: &dyn GroundQuery,
        bone_position: Vec3,
        body_position: Vec3,
        previous: &FootTarget,
    ) -> FootTarget {
        let mut origin = bone_position;
        origin.y = body_position.y + self.max_step_height;
        origin -= previous.normal * self.ground_offset;

        let mut target = *previous;
        let mut height_from_ground = self.max_step_height;

        if let Some(hit) = world.sphere_cast(
            origin,
            self.foot_radius,
            Dir3::NEG_Y,
            self.max_step_height * 2.0,
        ) {
            height_from_ground = body_position.y - hit.point.y;
            target.position = hit.point;
            target.normal = hit.normal;
            target.rotation = align_up_to(hit.normal);
        }

        target.grounded = height_from_ground < self.max_step_height;

        if !target.grounded {
            target.position.y = body_position.y - self.max_step_height;
            target.rotation = Quat::IDENTITY;
        }

        target
    }
}
