//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::{HeldButtons, MovementInput};

/// Samples held keys once per fixed step; edges come from `advance`, so a
/// press is seen exactly once even when several fixed steps share a frame.
pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    let held = HeldButtons {
        left: keyboard.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]),
        right: keyboard.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]),
        up: keyboard.any_pressed([KeyCode::ArrowUp, KeyCode::KeyW]),
        down: keyboard.any_pressed([KeyCode::ArrowDown, KeyCode::KeyS]),
        jump: keyboard.any_pressed([KeyCode::KeyZ, KeyCode::Space]),
        dash: keyboard.any_pressed([KeyCode::KeyC, KeyCode::ShiftLeft]),
        attack: keyboard.pressed(KeyCode::KeyX),
    };
    input.advance(held);
}
