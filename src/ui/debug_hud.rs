//! UI domain: locomotion debug overlay, toggled with F1.

use bevy::prelude::*;

use crate::movement::PlayerController;

/// Whether the overlay is shown.
#[derive(Resource, Debug, Default)]
pub struct DebugHudState {
    pub visible: bool,
}

/// Marker for the overlay text
#[derive(Component, Debug)]
pub struct DebugHudText;

fn flag(on: bool) -> char {
    if on { '+' } else { '-' }
}

/// Renders the active state and the ability flags worth watching.
pub fn describe(controller: &PlayerController) -> String {
    let body = &controller.body;
    let ability = &controller.ability;
    let previous = controller
        .machine()
        .previous()
        .map(|state| state.label())
        .unwrap_or("none");

    format!(
        "State: {} (from {})\nPos: ({:.0}, {:.0})  Vel: ({:.0}, {:.0})\nBlocked: down {} left {} right {}\nDash {}  AirDashed {}  AirJump {}  WallJump {}\nCrouch {}  Slide {}  DropThrough {}",
        controller.state(),
        previous,
        body.position.x,
        body.position.y,
        body.velocity.x,
        body.velocity.y,
        flag(body.blocked.down),
        flag(body.blocked.left),
        flag(body.blocked.right),
        flag(ability.can_dash),
        flag(ability.has_air_dashed),
        flag(ability.can_air_jump),
        flag(ability.can_wall_jump),
        flag(ability.is_crouching),
        flag(ability.is_sliding),
        flag(ability.is_dropping_through),
    )
}

fn spawn_debug_hud(commands: &mut Commands) {
    commands.spawn((
        DebugHudText,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}

pub(crate) fn toggle_debug_hud(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<DebugHudState>,
) {
    if keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote) {
        state.visible = !state.visible;
        info!("Debug HUD {}", if state.visible { "ON" } else { "OFF" });
    }
}

pub(crate) fn update_debug_hud(
    mut commands: Commands,
    state: Res<DebugHudState>,
    player_query: Query<&PlayerController>,
    mut text_query: Query<&mut Text, With<DebugHudText>>,
    existing: Query<Entity, With<DebugHudText>>,
) {
    if !state.visible {
        for entity in &existing {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing.is_empty() {
        spawn_debug_hud(&mut commands);
        return;
    }

    if let (Ok(controller), Ok(mut text)) = (player_query.single(), text_query.single_mut()) {
        **text = describe(controller);
    }
}
