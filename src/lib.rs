//! Third-person locomotion and procedural foot IK for a rigid-body humanoid.
//!
//! The simulation lives in [`locomotion`] and talks to the engine only through
//! the collaborator traits there. [`host`] wires it into Bevy and avian3d.

pub mod config;
pub mod host;
pub mod input;
pub mod locomotion;

pub use config::{LocomotionConfig, load_config};
pub use host::LocomotionPlugin;
pub use input::LocomotionInput;
pub use locomotion::{LocomotionController, TickContext};
