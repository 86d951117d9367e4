//! Movement domain: presentation cues emitted by the locomotion core.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKey {
    Idle,
    Run,
    Jump,
    WallSlide,
    Dash,
    Slide,
    Crouch,
    CrouchWalk,
    Pogoslash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteLayers {
    FullBody,
    /// Separate legs and upper body, used by the air attack.
    AttackPose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegsPose {
    Up,
    Max,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleEmitter {
    Run,
    Idle,
}

/// Fire-and-forget effect request. Nothing in the core waits on a cue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCue {
    Animation(AnimationKey),
    Layers(SpriteLayers),
    Legs(LegsPose),
    StartEmitter(ParticleEmitter),
    StopEmitter(ParticleEmitter),
    JumpBurst,
    LandingBurst,
    AttackHitbox(bool),
}

/// A cue stamped with the player entity that produced it.
#[derive(Debug, Clone, Copy)]
pub struct PlayerCueMessage {
    pub player: Entity,
    pub cue: PlayerCue,
}

impl Message for PlayerCueMessage {}

/// Cues collected during one step. Animation requests are dropped when the
/// same animation is already playing.
#[derive(Debug, Default)]
pub struct CueBuffer {
    pending: Vec<PlayerCue>,
    animation: Option<AnimationKey>,
}

impl CueBuffer {
    pub fn push(&mut self, cue: PlayerCue) {
        if let PlayerCue::Animation(key) = cue {
            if self.animation == Some(key) {
                return;
            }
            self.animation = Some(key);
        }
        self.pending.push(cue);
    }

    pub fn current_animation(&self) -> Option<AnimationKey> {
        self.animation
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, PlayerCue> {
        self.pending.drain(..)
    }

    pub fn pending(&self) -> &[PlayerCue] {
        &self.pending
    }
}
