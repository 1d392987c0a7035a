//! Host domain: avian3d and Bevy implementations of the collaborator traits.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::host::components::GroundLayer;
use crate::locomotion::{CameraRig, ForceMode, GroundHit, GroundQuery, RigidBodyHandle, SurfaceKind};

// ============================================================================
// Ground queries
// ============================================================================

/// Casts against [`GroundLayer::Ground`] colliders, never the agent itself.
pub struct AvianGround<'a, 'w, 's> {
    spatial: &'a SpatialQuery<'w, 's>,
    /// Surface tag of a hit collider.
    surface_of: &'a dyn Fn(Entity) -> SurfaceKind,
    filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> AvianGround<'a, 'w, 's> {
    pub fn new(
        spatial: &'a SpatialQuery<'w, 's>,
        surface_of: &'a dyn Fn(Entity) -> SurfaceKind,
        agent: Entity,
    ) -> Self {
        Self {
            spatial,
            surface_of,
            filter: SpatialQueryFilter::from_mask(GroundLayer::Ground)
                .with_excluded_entities([agent]),
        }
    }

    fn surface(&self, entity: Entity) -> SurfaceKind {
        (self.surface_of)(entity)
    }
}

impl GroundQuery for AvianGround<'_, '_, '_> {
    fn ray_cast(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<GroundHit> {
        let hit = self
            .spatial
            .cast_ray(origin, direction, max_distance, true, &self.filter)?;
        Some(GroundHit {
            point: origin + *direction * hit.distance,
            normal: hit.normal,
            distance: hit.distance,
            surface: self.surface(hit.entity),
        })
    }

    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Dir3,
        max_distance: f32,
    ) -> Option<GroundHit> {
        let hit = self.spatial.cast_shape(
            &Collider::sphere(radius),
            origin,
            Quat::IDENTITY,
            direction,
            &ShapeCastConfig::from_max_distance(max_distance),
            &self.filter,
        )?;
        Some(GroundHit {
            point: hit.point1,
            normal: hit.normal1,
            distance: hit.distance,
            surface: self.surface(hit.entity),
        })
    }
}

// ============================================================================
// Rigid body
// ============================================================================

/// Rigid-body view over an agent's components. Forces and impulses become
/// velocity changes here so they land within the current tick.
pub struct AvianBody<'a> {
    pub transform: &'a mut Transform,
    pub velocity: &'a mut LinearVelocity,
    pub mass: f32,
    /// Center of mass in body space.
    pub local_center_of_mass: Vec3,
    pub dt: f32,
}

impl<'a> AvianBody<'a> {
    pub fn new(
        transform: &'a mut Transform,
        velocity: &'a mut LinearVelocity,
        mass: &ComputedMass,
        center_of_mass: &ComputedCenterOfMass,
        dt: f32,
    ) -> Self {
        Self {
            transform,
            velocity,
            mass: mass.value(),
            local_center_of_mass: center_of_mass.0,
            dt,
        }
    }

    fn inverse_mass(&self) -> f32 {
        if self.mass > 0.0 && self.mass.is_finite() {
            self.mass.recip()
        } else {
            0.0
        }
    }
}

impl RigidBodyHandle for AvianBody<'_> {
    fn linear_velocity(&self) -> Vec3 {
        self.velocity.0
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.velocity.0 = velocity;
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        let delta = match mode {
            ForceMode::VelocityChange => force,
            ForceMode::Impulse => force * self.inverse_mass(),
            ForceMode::Force => force * self.inverse_mass() * self.dt,
        };
        self.velocity.0 += delta;
    }

    fn world_center_of_mass(&self) -> Vec3 {
        self.transform.transform_point(self.local_center_of_mass)
    }

    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    fn scale(&self) -> Vec3 {
        self.transform.scale
    }

    fn rotate(&mut self, delta: Quat) {
        self.transform.rotation = (self.transform.rotation * delta).normalize();
    }
}

/// Read-only snapshot used where the controller only needs the body frame.
pub struct BodySnapshot {
    pub transform: Transform,
    pub velocity: Vec3,
}

impl RigidBodyHandle for BodySnapshot {
    fn linear_velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn add_force(&mut self, _force: Vec3, _mode: ForceMode) {}

    fn world_center_of_mass(&self) -> Vec3 {
        self.transform.translation
    }

    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    fn scale(&self) -> Vec3 {
        self.transform.scale
    }

    fn rotate(&mut self, delta: Quat) {
        self.transform.rotation = (self.transform.rotation * delta).normalize();
    }
}

// ============================================================================
// Camera
// ============================================================================

/// Free camera entity placed at the agent's mount every frame.
pub struct FollowCamera<'a> {
    pub transform: &'a mut Transform,
    pub root: Vec3,
    pub look_target: Option<Vec3>,
}

impl CameraRig for FollowCamera<'_> {
    fn root_position(&self) -> Vec3 {
        self.root
    }

    fn set_pose(&mut self, position: Vec3, rotation: Quat) {
        self.transform.translation = position;
        self.transform.rotation = rotation;
    }

    fn set_look_target(&mut self, target: Vec3) {
        self.look_target = Some(target);
    }
}
