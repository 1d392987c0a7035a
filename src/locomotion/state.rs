//! Locomotion domain: per-character body, foot, and pelvis state.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Left or right foot. Doubles as the IK goal and bone selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Foot {
    Left,
    Right,
}

impl Foot {
    pub const ALL: [Foot; 2] = [Foot::Left, Foot::Right];

    pub(crate) fn index(self) -> usize {
        match self {
            Foot::Left => 0,
            Foot::Right => 1,
        }
    }
}

/// Classification tag of the surface under the character.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum SurfaceKind {
    #[default]
    Untagged,
    Ground,
    Tile,
}

/// Whole-body locomotion state. Rewritten once per physics tick.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyState {
    pub is_grounded: bool,
    pub was_grounded: bool,
    pub grounded_for_jump: bool,
    pub surface: SurfaceKind,
    /// Camera pitch in degrees; positive looks down.
    pub look_pitch: f32,
    /// Smoothed input velocity in body space (x = strafe, y = forward).
    pub planar_velocity: Vec2,
    /// World-space velocity captured at take-off.
    pub airborne_velocity: Vec3,
    pub aerial_time: f32,
    /// Animation-only ramp in [0, max_aerial_velocity].
    pub aerial_velocity: f32,
    pub last_position: Option<Vec3>,
    /// Estimated speed used to scale the falloff rate, never below 1.
    pub movement_speed: f32,
}

impl Default for BodyState {
    fn default() -> Self {
        Self {
            is_grounded: false,
            was_grounded: false,
            grounded_for_jump: false,
            surface: SurfaceKind::Untagged,
            look_pitch: 0.0,
            planar_velocity: Vec2::ZERO,
            airborne_velocity: Vec3::ZERO,
            aerial_time: 0.0,
            aerial_velocity: 0.0,
            last_position: None,
            movement_speed: 1.0,
        }
    }
}

impl BodyState {
    /// Update the movement-speed estimate from the body root position.
    pub fn record_movement(&mut self, position: Vec3, dt: f32) {
        let speed = match self.last_position {
            Some(last) => ((last - position) / dt).length(),
            None => 0.0,
        };
        self.movement_speed = if speed.is_finite() { speed.max(1.0) } else { 1.0 };
        self.last_position = Some(position);
    }
}

/// Ground contact for one foot, produced by the solver each physics tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootTarget {
    pub position: Vec3,
    pub normal: Vec3,
    pub rotation: Quat,
    pub grounded: bool,
}

impl Default for FootTarget {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            normal: Vec3::Y,
            rotation: Quat::IDENTITY,
            grounded: false,
        }
    }
}

/// Solver target plus the blender's smoothed offsets for one foot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootState {
    pub target: FootTarget,
    /// Smoothed local height offset applied to the animated goal.
    pub height_offset: f32,
    /// Smoothed rotation delta applied on top of the animated goal.
    pub rotation_offset: Quat,
}

impl Default for FootState {
    fn default() -> Self {
        Self {
            target: FootTarget::default(),
            height_offset: 0.0,
            rotation_offset: Quat::IDENTITY,
        }
    }
}

/// Last applied vertical pelvis offset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PelvisState {
    pub offset: f32,
}
