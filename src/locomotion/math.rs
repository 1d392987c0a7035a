//! Bounded-rate interpolation and frame helpers shared by the solvers.

use bevy::math::Affine3A;
use bevy::prelude::*;

/// Below this, a rotation axis or angle is treated as zero.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Usable tick or frame duration.
pub fn valid_dt(dt: f32) -> bool {
    dt.is_finite() && dt > 0.0
}

/// Step `current` toward `target` by at most `max_delta`; never overshoots.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + delta.signum() * max_delta
    }
}

/// Rotate `from` toward `to` by at most `max_radians`.
pub fn rotate_towards(from: Quat, to: Quat, max_radians: f32) -> Quat {
    let angle = from.angle_between(to);
    if angle <= DEGENERATE_EPSILON {
        return to;
    }
    let t = (max_radians / angle).min(1.0);
    from.slerp(to, t)
}

/// Lerp with `t` clamped to [0, 1].
pub fn lerp_clamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Rotation that takes world up onto `normal`, built from the cross-product
/// axis and the angle between the two. Identity when the axis vanishes.
pub fn align_up_to(normal: Vec3) -> Quat {
    let axis = Vec3::Y.cross(normal);
    let axis_len = axis.length();
    if axis_len <= DEGENERATE_EPSILON || !axis_len.is_finite() {
        return Quat::IDENTITY;
    }
    let angle = Vec3::Y.angle_between(normal);
    Quat::from_axis_angle(axis / axis_len, angle)
}

/// Body-space planar vector (x = strafe, y = forward) to a local 3D direction.
/// Forward is -Z.
pub fn planar_to_local(planar: Vec2) -> Vec3 {
    Vec3::new(planar.x, 0.0, -planar.y)
}

/// Rigid transform of the character root, used for local/world conversions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyFrame {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl BodyFrame {
    fn affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    pub fn to_local(&self, world: Vec3) -> Vec3 {
        self.affine().inverse().transform_point3(world)
    }

    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.affine().transform_point3(local)
    }
}
