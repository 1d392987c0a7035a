//! Locomotion domain: ground sensing, velocity model, rigid-body driver, and
//! procedural foot/pelvis IK, orchestrated by [`LocomotionController`].

mod audio;
mod blender;
mod camera;
mod collaborators;
mod controller;
mod driver;
mod foot_solver;
mod ground;
pub mod math;
mod rig;
mod state;
mod velocity;

pub use audio::{AnimationEvent, AudioCue, ClipBank, CueKind, CueSelector};
pub use blender::{
    AnimatedPose, BlendState, FalloffWeight, FootPose, IkBlender, IkInputs, IkPose,
};
pub use camera::{CameraLook, LookUpdate};
pub use collaborators::{
    AnimParam, AnimationRig, CameraRig, ForceMode, GroundHit, GroundQuery, LookAtWeights,
    RigidBodyHandle,
};
pub use controller::{ControllerInitError, FrameEvents, LocomotionController, TickContext};
pub use driver::{FLOAT_EPSILON, RigidBodyDriver};
pub use foot_solver::FootIkSolver;
pub use ground::{GroundReading, GroundSensor, GroundTransition};
pub use rig::{IkGoalSlot, PoseRig};
pub use state::{BodyState, Foot, FootState, FootTarget, PelvisState, SurfaceKind};
pub use velocity::VelocityModel;
