//! Sprites module for the player's layered placeholder sprite.
//!
//! This module handles:
//! - Reacting to locomotion cues (animation, sprite layers, attack slash)
//! - Frame playback with placeholder tints
//! - Dust and burst particles

pub mod animation;
pub mod layers;
pub mod particles;

use bevy::prelude::*;

pub use animation::*;
pub use layers::*;
pub use particles::*;

use crate::level::PlayerRespawned;
use crate::movement::{PlayerController, PlayerCue, PlayerCueMessage};

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                attach_player_visuals,
                apply_player_cues,
                flash_on_respawn,
                update_animation_frames,
                tick_respawn_flash,
                sync_player_layers,
                update_emitters,
                update_particles,
            )
                .chain(),
        );
    }
}

/// Turns cue messages into presentation state. Cues for players without
/// visuals yet are dropped.
fn apply_player_cues(
    mut commands: Commands,
    mut cues: MessageReader<PlayerCueMessage>,
    mut players: Query<(
        &PlayerController,
        &mut AnimationController,
        &mut PlayerVisual,
        &mut ParticleEmitters,
    )>,
) {
    for message in cues.read() {
        let Ok((controller, mut animation, mut visual, mut emitters)) = players.get_mut(message.player)
        else {
            continue;
        };
        match message.cue {
            PlayerCue::Animation(key) => {
                animation.play(key);
            }
            PlayerCue::Layers(layers) => visual.layers = layers,
            PlayerCue::Legs(pose) => visual.legs = pose,
            PlayerCue::StartEmitter(emitter) => emitters.set(emitter, true),
            PlayerCue::StopEmitter(emitter) => emitters.set(emitter, false),
            PlayerCue::JumpBurst => spawn_burst(&mut commands, controller.body.position, Burst::Jump),
            PlayerCue::LandingBurst => {
                spawn_burst(&mut commands, controller.body.position, Burst::Landing)
            }
            PlayerCue::AttackHitbox(enabled) => visual.slash_visible = enabled,
        }
    }
}

fn flash_on_respawn(mut commands: Commands, mut respawned: MessageReader<PlayerRespawned>) {
    for message in respawned.read() {
        if let Ok(mut entity) = commands.get_entity(message.player) {
            entity.insert(RespawnFlash::default());
        }
    }
}
