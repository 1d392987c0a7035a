//! Host domain: ECS components and physics layers.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::locomotion::LocomotionController;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GroundLayer {
    #[default]
    Default,
    /// Walkable surfaces hit by the ground and foot casts
    Ground,
    /// Player character
    Player,
}

/// A character driven by a [`LocomotionController`].
#[derive(Component, Debug)]
pub struct LocomotionAgent(pub LocomotionController);

/// Camera mount height above the agent root. The mount sits on the yaw axis.
#[derive(Component, Debug, Clone, Copy)]
pub struct CameraMount {
    pub height: f32,
}

impl Default for CameraMount {
    fn default() -> Self {
        Self { height: 1.6 }
    }
}

/// Marker for the camera that follows a locomotion agent.
#[derive(Component, Debug)]
pub struct PlayerCamera;
