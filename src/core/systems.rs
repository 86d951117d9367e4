//! Core domain: boot flow and camera systems.

use bevy::prelude::*;

use crate::core::resources::CameraFollow;
use crate::core::state::GameState;
use crate::movement::{Player, PlayerController};

/// Content is loaded in PreStartup, so play can begin right away.
pub(crate) fn enter_playing(mut game_state: ResMut<NextState<GameState>>) {
    game_state.set(GameState::Playing);
}

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub(crate) fn follow_player(
    time: Res<Time>,
    settings: Res<CameraFollow>,
    players: Query<(&Transform, &PlayerController), (With<Player>, Without<Camera2d>)>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    let Some((player, controller)) = players.iter().next() else {
        return;
    };
    let target = player.translation.truncate()
        + Vec2::new(
            controller.ability.facing.sign() * settings.lookahead,
            settings.vertical_offset,
        );

    for mut camera in &mut cameras {
        let next = settings.approach(camera.translation.truncate(), target, time.delta_secs());
        camera.translation.x = next.x;
        camera.translation.y = next.y;
    }
}
