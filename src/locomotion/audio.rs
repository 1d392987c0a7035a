//! Locomotion domain: audio cue selection for footsteps, landings, and jumps.
//!
//! Only the trigger and the clip bank are decided here; picking and playing a
//! clip belongs to the host's audio layer.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::LocomotionConfig;
use crate::locomotion::state::SurfaceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueKind {
    Footstep,
    Land,
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipBank {
    TileFootsteps,
    GroundFootsteps,
    Land,
    JumpVoice,
}

impl ClipBank {
    pub fn select(kind: CueKind, surface: SurfaceKind) -> Self {
        match (kind, surface) {
            (CueKind::Jump, _) => ClipBank::JumpVoice,
            (CueKind::Land, _) => ClipBank::Land,
            (CueKind::Footstep, SurfaceKind::Tile) => ClipBank::TileFootsteps,
            (CueKind::Footstep, SurfaceKind::Ground | SurfaceKind::Untagged) => {
                ClipBank::GroundFootsteps
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioCue {
    pub kind: CueKind,
    pub surface: SurfaceKind,
    pub bank: ClipBank,
}

impl AudioCue {
    pub fn new(kind: CueKind, surface: SurfaceKind) -> Self {
        Self {
            kind,
            surface,
            bank: ClipBank::select(kind, surface),
        }
    }
}

/// Events raised by animation clips at authored keyframes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationEvent {
    /// `weight` is the playback weight of the clip that raised the event.
    Footstep { weight: f32 },
    Land,
}

#[derive(Debug, Clone)]
pub struct CueSelector {
    rng: ChaCha8Rng,
    jump_voice_chance: f32,
    footstep_min_weight: f32,
}

impl CueSelector {
    pub fn from_config(config: &LocomotionConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.audio_seed),
            jump_voice_chance: config.jump_voice_chance,
            footstep_min_weight: config.footstep_min_weight,
        }
    }

    /// Jump voice lines only play some of the time.
    pub fn on_jump(&mut self, surface: SurfaceKind) -> Option<AudioCue> {
        let roll: f32 = self.rng.random();
        (roll <= self.jump_voice_chance).then(|| AudioCue::new(CueKind::Jump, surface))
    }

    /// Footsteps from clips that are mostly blended out are dropped so
    /// crossfades don't double up steps.
    pub fn on_animation_event(
        &self,
        event: AnimationEvent,
        surface: SurfaceKind,
    ) -> Option<AudioCue> {
        match event {
            AnimationEvent::Footstep { weight } if weight <= self.footstep_min_weight => None,
            AnimationEvent::Footstep { .. } => Some(AudioCue::new(CueKind::Footstep, surface)),
            AnimationEvent::Land => Some(AudioCue::new(CueKind::Land, surface)),
        }
    }
}
