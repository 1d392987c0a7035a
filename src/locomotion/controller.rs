//! Locomotion domain: the per-character orchestrator.
//!
//! The host calls four phase entry points at their own cadence:
//! [`LocomotionController::advance_frame`] once per frame before physics,
//! [`LocomotionController::advance_simulation_tick`] once per fixed tick,
//! [`LocomotionController::evaluate_ik`] once per frame after animation, and
//! [`LocomotionController::resolve_camera_late`] once per frame after all
//! movement.

use bevy::prelude::*;

use crate::config::{LocomotionConfig, ValidationError, validate_config};
use crate::input::LocomotionInput;
use crate::locomotion::audio::{AnimationEvent, AudioCue, CueSelector};
use crate::locomotion::blender::{
    AnimatedPose, BlendState, FalloffWeight, IkBlender, IkInputs, IkPose,
};
use crate::locomotion::camera::CameraLook;
use crate::locomotion::collaborators::{
    AnimParam, AnimationRig, CameraRig, GroundQuery, RigidBodyHandle,
};
use crate::locomotion::driver::RigidBodyDriver;
use crate::locomotion::foot_solver::FootIkSolver;
use crate::locomotion::ground::{GroundSensor, GroundTransition};
use crate::locomotion::math::{BodyFrame, valid_dt};
use crate::locomotion::state::{BodyState, Foot, FootState, PelvisState};
use crate::locomotion::velocity::VelocityModel;

/// Fatal problems found while building a controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerInitError {
    InvalidConfig(Vec<ValidationError>),
    UnboundIkGoal(Foot),
    MissingFootBone(Foot),
}

impl std::fmt::Display for ControllerInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerInitError::InvalidConfig(errors) => {
                write!(f, "invalid locomotion config:")?;
                for error in errors {
                    write!(f, " {};", error)?;
                }
                Ok(())
            }
            ControllerInitError::UnboundIkGoal(foot) => {
                write!(f, "animation rig has no IK goal for the {:?} foot", foot)
            }
            ControllerInitError::MissingFootBone(foot) => {
                write!(f, "animation rig has no {:?} foot bone", foot)
            }
        }
    }
}

impl std::error::Error for ControllerInitError {}

/// Collaborators for one fixed simulation tick.
pub struct TickContext<'a> {
    pub input: &'a LocomotionInput,
    pub world: &'a dyn GroundQuery,
    pub body: &'a mut dyn RigidBodyHandle,
    pub rig: &'a mut dyn AnimationRig,
}

/// Discrete edges seen by [`LocomotionController::advance_frame`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    pub interact: bool,
    pub inventory: bool,
}

#[derive(Debug, Clone)]
pub struct LocomotionController {
    config: LocomotionConfig,
    ground: GroundSensor,
    velocity: VelocityModel,
    driver: RigidBodyDriver,
    solver: FootIkSolver,
    blender: IkBlender,
    camera: CameraLook,
    cues: CueSelector,

    body: BodyState,
    blend: BlendState,
    falloff: FalloffWeight,
    input_locked: bool,
    jump_requested: bool,
    sim_time: f32,
    last_jump_at: Option<f32>,
    look_target: Vec3,
    pending_cues: Vec<AudioCue>,
}

impl LocomotionController {
    /// Build a controller for a character whose animation rig is already
    /// resolved. Input starts locked (captured).
    pub fn new(
        config: LocomotionConfig,
        rig: &dyn AnimationRig,
    ) -> Result<Self, ControllerInitError> {
        let errors = validate_config(&config);
        if !errors.is_empty() {
            return Err(ControllerInitError::InvalidConfig(errors));
        }
        for foot in Foot::ALL {
            if !rig.has_ik_goal(foot) {
                return Err(ControllerInitError::UnboundIkGoal(foot));
            }
            if rig.foot_bone_position(foot).is_none() {
                return Err(ControllerInitError::MissingFootBone(foot));
            }
        }

        Ok(Self {
            ground: GroundSensor::from_config(&config),
            velocity: VelocityModel::from_config(&config),
            driver: RigidBodyDriver::from_config(&config),
            solver: FootIkSolver::from_config(&config),
            blender: IkBlender::from_config(&config),
            camera: CameraLook::from_config(&config),
            cues: CueSelector::from_config(&config),
            config,
            body: BodyState::default(),
            blend: BlendState::default(),
            falloff: FalloffWeight::default(),
            input_locked: true,
            jump_requested: false,
            sim_time: 0.0,
            last_jump_at: None,
            look_target: Vec3::ZERO,
            pending_cues: Vec::new(),
        })
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn body_state(&self) -> &BodyState {
        &self.body
    }

    pub fn foot(&self, foot: Foot) -> &FootState {
        self.blend.foot(foot)
    }

    pub fn pelvis(&self) -> &PelvisState {
        &self.blend.pelvis
    }

    /// Effective falloff weight in [0, foot_ik_weight].
    pub fn falloff_weight(&self) -> f32 {
        self.falloff.value(self.config.foot_ik_weight)
    }

    /// Seconds of simulated time, advanced only by the fixed tick.
    pub fn sim_time(&self) -> f32 {
        self.sim_time
    }

    pub fn look_target(&self) -> Vec3 {
        self.look_target
    }

    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    /// Input lock (cursor capture). While unlocked every tick zeroes velocity.
    pub fn set_input_locked(&mut self, locked: bool) {
        if self.input_locked != locked {
            debug!("Locomotion input {}", if locked { "locked" } else { "released" });
        }
        self.input_locked = locked;
    }

    // ------------------------------------------------------------------------
    // Per-frame phase
    // ------------------------------------------------------------------------

    /// Consume this frame's button edges. A jump press is held until the next
    /// fixed tick consumes it.
    pub fn advance_frame(&mut self, input: &LocomotionInput) -> FrameEvents {
        if input.jump_just_pressed {
            self.jump_requested = true;
        }

        FrameEvents {
            interact: input.interact_just_pressed,
            inventory: input.inventory_just_pressed,
        }
    }

    /// True while a jump press waits for the next fixed tick.
    pub fn is_jump_queued(&self) -> bool {
        self.jump_requested
    }

    // ------------------------------------------------------------------------
    // Fixed-timestep phase
    // ------------------------------------------------------------------------

    pub fn advance_simulation_tick(&mut self, ctx: TickContext<'_>, dt: f32) {
        if !valid_dt(dt) {
            return;
        }
        let TickContext {
            input,
            world,
            body,
            rig,
        } = ctx;

        if !self.input_locked {
            self.body.planar_velocity = Vec2::ZERO;
            self.driver.reset_velocity(body);
        }

        self.ground_check(world, body, rig);

        let aerial = self.velocity.step_aerial(&mut self.body, dt);
        rig.set_float(AnimParam::AerialVelocity, aerial);

        let since_jump = self.last_jump_at.map(|at| self.sim_time - at);
        if self.driver.float_enabled(self.body.is_grounded, since_jump) {
            self.driver.float_body(body, world);
        }

        self.body.planar_velocity = self.velocity.step_planar(
            self.body.planar_velocity,
            input,
            self.body.is_grounded,
            dt,
        );
        self.driver.apply_locomotion(body, &self.body);
        rig.set_float(AnimParam::HorizontalVelocity, self.body.planar_velocity.x);
        rig.set_float(AnimParam::VerticalVelocity, self.body.planar_velocity.y);

        if std::mem::take(&mut self.jump_requested) && self.body.grounded_for_jump {
            self.driver.jump(body);
            self.last_jump_at = Some(self.sim_time);
            debug!("Jump at t={:.3}", self.sim_time);
            if let Some(cue) = self.cues.on_jump(self.body.surface) {
                self.pending_cues.push(cue);
            }
        }

        self.update_falloff(dt);
        self.body.record_movement(body.position(), dt);

        let body_position = body.position();
        for foot in Foot::ALL {
            let Some(bone) = rig.foot_bone_position(foot) else {
                continue;
            };
            let state = self.blend.foot_mut(foot);
            state.target = self.solver.solve(world, bone, body_position, &state.target);
        }

        self.sim_time += dt;
    }

    fn ground_check(
        &mut self,
        world: &dyn GroundQuery,
        body: &dyn RigidBodyHandle,
        rig: &mut dyn AnimationRig,
    ) {
        let reading = self.ground.sense(world, body.world_center_of_mass());
        match self.ground.apply(&mut self.body, &reading, body.rotation()) {
            GroundTransition::TookOff => debug!(
                "Left ground: airborne_velocity={:?}",
                self.body.airborne_velocity
            ),
            GroundTransition::Landed => debug!("Landed on {:?}", self.body.surface),
            GroundTransition::None => {}
        }

        rig.set_bool(AnimParam::IsGrounded, self.body.is_grounded);
    }

    fn update_falloff(&mut self, dt: f32) {
        let any_foot_grounded = Foot::ALL
            .iter()
            .any(|&foot| self.blend.foot(foot).target.grounded);
        self.falloff.step(
            any_foot_grounded,
            self.body.movement_speed,
            self.config.falloff_increase_rate,
            self.config.falloff_decrease_rate,
            dt,
        );
    }

    // ------------------------------------------------------------------------
    // IK-evaluation phase
    // ------------------------------------------------------------------------

    /// Blend the animated pose toward the latest solver targets and write the
    /// result: look-at, pelvis, left foot, right foot.
    pub fn evaluate_ik(
        &mut self,
        body: &dyn RigidBodyHandle,
        rig: &mut dyn AnimationRig,
        dt: f32,
    ) -> IkPose {
        let inputs = IkInputs {
            body: BodyFrame {
                position: body.position(),
                rotation: body.rotation(),
                scale: body.scale(),
            },
            falloff: self.falloff_weight(),
            look_target: self.look_target,
            animated: AnimatedPose {
                feet: Foot::ALL.map(|foot| (rig.ik_position(foot), rig.ik_rotation(foot))),
                body_position: rig.body_position(),
            },
        };

        let (pose, next) = self.blender.evaluate(&self.blend, &inputs, dt);
        self.blend = next;

        rig.set_look_at(pose.look_target, pose.look_weights);
        rig.set_body_position(pose.body_position);
        for foot in Foot::ALL {
            let out = pose.foot(foot);
            rig.set_ik_position(foot, out.position);
            rig.set_ik_position_weight(foot, out.position_weight);
            rig.set_ik_rotation(foot, out.rotation);
            rig.set_ik_rotation_weight(foot, out.rotation_weight);
        }

        pose
    }

    // ------------------------------------------------------------------------
    // Late phase
    // ------------------------------------------------------------------------

    /// Apply look input to body yaw and camera pitch, move the camera to its
    /// mount, and place the look-at target for the next IK pass.
    pub fn resolve_camera_late(
        &mut self,
        look_axis: Vec2,
        body: &mut dyn RigidBodyHandle,
        camera: &mut dyn CameraRig,
        dt: f32,
    ) {
        if !valid_dt(dt) {
            return;
        }

        let update = self.camera.look(&mut self.body.look_pitch, look_axis, dt);
        body.rotate(update.body_yaw);

        let camera_position = camera.root_position();
        let camera_rotation = body.rotation() * update.camera_local;
        camera.set_pose(camera_position, camera_rotation);

        self.look_target = self.camera.look_target(camera_position, camera_rotation);
        camera.set_look_target(self.look_target);
    }

    // ------------------------------------------------------------------------
    // Audio
    // ------------------------------------------------------------------------

    pub fn handle_animation_event(&mut self, event: AnimationEvent) {
        if let Some(cue) = self.cues.on_animation_event(event, self.body.surface) {
            self.pending_cues.push(cue);
        }
    }

    pub fn drain_audio_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.pending_cues)
    }
}
