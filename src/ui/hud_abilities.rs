//! UI domain: dash and crystal-jump readiness pips.

use bevy::prelude::*;

use crate::movement::{AbilityState, PlayerController};

pub(crate) const HUD_PADDING: f32 = 16.0;
pub(crate) const PIP_SIZE: f32 = 18.0;

const DASH_READY: Color = Color::srgb(0.3, 0.8, 0.95);
const AIR_JUMP_READY: Color = Color::srgb(0.95, 0.45, 0.85);
const SPENT: Color = Color::srgba(0.25, 0.25, 0.3, 0.8);

/// Which ability a HUD pip reports on.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityPip {
    Dash,
    AirJump,
}

impl AbilityPip {
    pub fn ready(self, ability: &AbilityState) -> bool {
        match self {
            AbilityPip::Dash => ability.air_dash_available(),
            AbilityPip::AirJump => ability.can_air_jump,
        }
    }

    pub fn color(self, ready: bool) -> Color {
        match (self, ready) {
            (_, false) => SPENT,
            (AbilityPip::Dash, true) => DASH_READY,
            (AbilityPip::AirJump, true) => AIR_JUMP_READY,
        }
    }
}

/// Marker for the HUD row holding the pips
#[derive(Component)]
pub struct AbilityHudUI;

pub(crate) fn spawn_ability_hud(mut commands: Commands) {
    commands
        .spawn((
            AbilityHudUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(HUD_PADDING),
                top: Val::Px(HUD_PADDING),
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(8.0),
                padding: UiRect::all(Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.6)),
        ))
        .with_children(|parent| {
            for pip in [AbilityPip::Dash, AbilityPip::AirJump] {
                parent.spawn((
                    pip,
                    Node {
                        width: Val::Px(PIP_SIZE),
                        height: Val::Px(PIP_SIZE),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(pip.color(false)),
                    BorderColor::all(Color::srgb(0.3, 0.3, 0.3)),
                ));
            }
        });
}

pub(crate) fn update_ability_hud(
    player_query: Query<&PlayerController>,
    mut pips: Query<(&AbilityPip, &mut BackgroundColor)>,
) {
    let Ok(controller) = player_query.single() else {
        return;
    };

    for (pip, mut bg_color) in &mut pips {
        bg_color.0 = pip.color(pip.ready(&controller.ability));
    }
}
