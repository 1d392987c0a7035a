//! Locomotion domain: interfaces to the physics world, the rigid body, the
//! animation system, and the camera rig.
//!
//! The controller never discovers these on its own. The host hands in resolved
//! handles for each phase call.

use bevy::prelude::*;

use crate::locomotion::state::{Foot, SurfaceKind};

/// Result of a downward ray or sphere cast against the ground layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
    pub surface: SurfaceKind,
}

/// Spatial queries against ground colliders. Trigger volumes are never reported.
pub trait GroundQuery {
    fn ray_cast(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<GroundHit>;

    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Dir3,
        max_distance: f32,
    ) -> Option<GroundHit>;
}

/// How a vector passed to [`RigidBodyHandle::add_force`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous force, integrated over the tick using mass.
    Force,
    /// Instantaneous momentum change, divided by mass.
    Impulse,
    /// Instantaneous velocity change, mass ignored.
    VelocityChange,
}

pub trait RigidBodyHandle {
    fn linear_velocity(&self) -> Vec3;
    fn set_linear_velocity(&mut self, velocity: Vec3);
    fn add_force(&mut self, force: Vec3, mode: ForceMode);

    fn world_center_of_mass(&self) -> Vec3;
    /// Root position of the character (feet level).
    fn position(&self) -> Vec3;
    fn rotation(&self) -> Quat;
    fn scale(&self) -> Vec3 {
        Vec3::ONE
    }
    /// Applies a rotation delta on top of the current rotation.
    fn rotate(&mut self, delta: Quat);
}

/// Scalar parameters the controller drives on the animation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimParam {
    HorizontalVelocity,
    VerticalVelocity,
    AerialVelocity,
    IsGrounded,
}

/// Per-body-part weights for the upper-body look-at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAtWeights {
    pub weight: f32,
    pub body: f32,
    pub head: f32,
    pub eyes: f32,
    pub clamp: f32,
}

/// Handle onto the animation system for one character.
///
/// Getters return the animated pose for the current frame. Setters write the
/// procedural overrides and must not feed back into the getters until the
/// animation system evaluates the next frame.
pub trait AnimationRig {
    fn has_ik_goal(&self, foot: Foot) -> bool;
    /// World position of the animated foot bone, `None` if the rig has no such bone.
    fn foot_bone_position(&self, foot: Foot) -> Option<Vec3>;

    fn ik_position(&self, foot: Foot) -> Vec3;
    fn ik_rotation(&self, foot: Foot) -> Quat;
    fn set_ik_position(&mut self, foot: Foot, position: Vec3);
    fn set_ik_rotation(&mut self, foot: Foot, rotation: Quat);
    fn set_ik_position_weight(&mut self, foot: Foot, weight: f32);
    fn set_ik_rotation_weight(&mut self, foot: Foot, weight: f32);

    /// Pelvis proxy position.
    fn body_position(&self) -> Vec3;
    fn set_body_position(&mut self, position: Vec3);

    fn set_look_at(&mut self, target: Vec3, weights: LookAtWeights);

    fn set_float(&mut self, param: AnimParam, value: f32);
    fn set_bool(&mut self, param: AnimParam, value: bool);
}

/// First-person style camera mounted on the character.
pub trait CameraRig {
    /// World position of the mount point the camera follows.
    fn root_position(&self) -> Vec3;
    /// World-space camera pose.
    fn set_pose(&mut self, position: Vec3, rotation: Quat);
    fn set_look_target(&mut self, target: Vec3);
}
