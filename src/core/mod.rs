//! Core domain: game state, camera, and boot flow.

mod resources;
mod state;
mod systems;

use bevy::prelude::*;

pub use resources::CameraFollow;
pub use state::GameState;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<CameraFollow>()
            .add_systems(Startup, (systems::setup_camera, systems::enter_playing))
            .add_systems(
                Update,
                systems::follow_player.run_if(in_state(GameState::Playing)),
            );
    }
}
