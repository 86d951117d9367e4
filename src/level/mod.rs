//! Level domain: level geometry, refresh crystals, hazards and checkpoints.

mod components;
mod spawn;
mod systems;

use bevy::prelude::*;

pub use components::{
    Checkpoint, DeathCause, Ground, Hazard, LevelEntity, PlayerRespawned, RefreshCrystal,
    RespawnPoint, TriggerArea, Wall,
};
pub use systems::{overlaps, player_rect};

use crate::core::GameState;
use crate::movement::LocomotionSystems;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlayerRespawned>()
            .add_systems(OnEnter(GameState::Playing), spawn::spawn_level)
            .add_systems(
                FixedUpdate,
                (
                    systems::tick_crystals,
                    systems::collect_crystals,
                    systems::activate_checkpoints,
                    systems::check_player_hazards,
                )
                    .chain()
                    .after(LocomotionSystems)
                    .run_if(in_state(GameState::Playing)),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(
            Update,
            systems::reload_level.run_if(in_state(GameState::Playing)),
        );
    }
}
