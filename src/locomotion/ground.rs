//! Locomotion domain: body ground classification.

use bevy::prelude::*;

use crate::config::LocomotionConfig;
use crate::locomotion::collaborators::GroundQuery;
use crate::locomotion::math::planar_to_local;
use crate::locomotion::state::{BodyState, SurfaceKind};

/// Outcome of one tick's ground casts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundReading {
    pub grounded: bool,
    pub grounded_for_jump: bool,
    pub surface: SurfaceKind,
}

/// Grounded-flag change produced by [`GroundSensor::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundTransition {
    None,
    TookOff,
    Landed,
}

/// Casts from the center of mass straight down: a long cast for the grounded
/// flag and surface tag, a shorter one that only gates jumping.
#[derive(Debug, Clone, Copy)]
pub struct GroundSensor {
    pub check_distance: f32,
    pub jump_check_distance: f32,
}

impl GroundSensor {
    pub fn from_config(config: &LocomotionConfig) -> Self {
        Self {
            check_distance: config.ground_check_distance,
            jump_check_distance: config.jump_check_distance,
        }
    }

    pub fn sense(&self, world: &dyn GroundQuery, center_of_mass: Vec3) -> GroundReading {
        let hit = world.ray_cast(center_of_mass, Dir3::NEG_Y, self.check_distance);
        let grounded_for_jump = world
            .ray_cast(center_of_mass, Dir3::NEG_Y, self.jump_check_distance)
            .is_some();

        GroundReading {
            grounded: hit.is_some(),
            grounded_for_jump,
            surface: hit.map(|h| h.surface).unwrap_or_default(),
        }
    }

    /// Fold a reading into the body state. On take-off the planar velocity is
    /// captured in world space; while grounded the airborne velocity is zero.
    pub fn apply(
        &self,
        state: &mut BodyState,
        reading: &GroundReading,
        body_rotation: Quat,
    ) -> GroundTransition {
        state.was_grounded = state.is_grounded;
        state.is_grounded = reading.grounded;
        state.grounded_for_jump = reading.grounded_for_jump;
        state.surface = if reading.grounded {
            reading.surface
        } else {
            SurfaceKind::Untagged
        };

        let transition = match (state.was_grounded, state.is_grounded) {
            (true, false) => {
                state.airborne_velocity = body_rotation * planar_to_local(state.planar_velocity);
                GroundTransition::TookOff
            }
            (false, true) => GroundTransition::Landed,
            _ => GroundTransition::None,
        };

        if state.is_grounded {
            state.airborne_velocity = Vec3::ZERO;
        }

        transition
    }
}
