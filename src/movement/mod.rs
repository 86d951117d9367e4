//! Movement domain: the player's locomotion state machine, its physics
//! adapters, and one-way platform handling.

mod ability;
mod body;
mod bootstrap;
mod components;
mod context;
mod controller;
mod cues;
mod fsm;
mod geometry;
mod resources;
mod semisolid;
mod states;
mod systems;
mod timers;

use bevy::prelude::*;

pub use ability::AbilityState;
pub use body::{Blocked, CharacterBody};
pub use components::{
    AppliedHitbox, AttackHitbox, Facing, GameLayer, HitboxProfile, HitboxSize, Player,
    SemiSolidPlatform, WallSide,
};
pub use context::Frame;
pub use controller::PlayerController;
pub use cues::{AnimationKey, LegsPose, ParticleEmitter, PlayerCue, PlayerCueMessage, SpriteLayers};
pub use fsm::{CrouchEntry, StateName, Transition};
pub use geometry::{LevelGeometry, OpenLevel};
pub use resources::{HeldButtons, MovementInput, MovementTuning, WorldBounds};
pub use semisolid::{ContactResolution, SemiSolidContact, resolve_semi_solid_contact};
pub use systems::feet_to_center;

pub(crate) use bootstrap::spawn_player;
pub(crate) use systems::PhysicsLevel;

/// Everything that moves the player during one fixed step. Systems that react
/// to the player's new position run after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocomotionSystems;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_message::<PlayerCueMessage>()
            .add_systems(
                FixedUpdate,
                (
                    systems::read_input,
                    systems::sync_body_from_physics,
                    systems::detect_contacts,
                    systems::step_player_controllers,
                    systems::apply_body_to_physics,
                    systems::resolve_semi_solid_platforms,
                )
                    .chain()
                    .in_set(LocomotionSystems),
            );
    }
}

#[cfg(test)]
mod tests;
