//! Input domain: the per-frame input sample.


use bevy::prelude::*;

/// Input for one frame. `*_just_pressed` flags are rising edges sampled by the
/// host once per rendered frame; they are never rebuilt from held levels.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionInput {
    /// x = strafe right, y = forward.
    pub move_axis: Vec2,
    /// x = yaw right, y = pitch up.
    pub look_axis: Vec2,
    pub run_held: bool,
    pub jump_just_pressed: bool,
    pub interact_just_pressed: bool,
    pub inventory_just_pressed: bool,
}

impl LocomotionInput {
    pub fn has_move(&self) -> bool {
        self.move_axis != Vec2::ZERO
    }
}
