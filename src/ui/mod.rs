//! UI domain: ability HUD and the developer overlay.

#[cfg(feature = "dev-tools")]
mod debug_hud;
mod hud_abilities;

pub use hud_abilities::AbilityPip;

use bevy::prelude::*;

use crate::core::GameState;
use crate::ui::hud_abilities::{spawn_ability_hud, update_ability_hud};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_ability_hud).add_systems(
            Update,
            update_ability_hud.run_if(in_state(GameState::Playing)),
        );

        #[cfg(feature = "dev-tools")]
        app.init_resource::<debug_hud::DebugHudState>().add_systems(
            Update,
            (debug_hud::toggle_debug_hud, debug_hud::update_debug_hud).chain(),
        );
    }
}

#[cfg(test)]
mod tests;
