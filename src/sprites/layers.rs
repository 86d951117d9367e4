//! Layered player sprite: body, attack-pose legs and the pogo slash.

use bevy::prelude::*;

use crate::movement::{
    AppliedHitbox, Facing, LegsPose, MovementTuning, Player, PlayerController, SpriteLayers,
};

/// Defines the render order for sprite layers.
/// Lower values render behind higher values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpriteLayer {
    /// Legs drawn behind the upper body during the air attack.
    Legs = 5,
    Body = 10,
    /// Downward slash while the attack hitbox is armed.
    Slash = 30,
}

impl SpriteLayer {
    /// Convert to Z coordinate for 2D ordering.
    pub fn z_index(&self) -> f32 {
        (*self as i32) as f32 * 0.01
    }
}

#[derive(Component, Debug)]
pub struct LegsLayer;

#[derive(Component, Debug)]
pub struct SlashLayer;

/// Presentation state accumulated from cues.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerVisual {
    pub layers: SpriteLayers,
    pub legs: LegsPose,
    pub slash_visible: bool,
}

impl Default for PlayerVisual {
    fn default() -> Self {
        Self {
            layers: SpriteLayers::FullBody,
            legs: LegsPose::Down,
            slash_visible: false,
        }
    }
}

const LEGS_SIZE: Vec2 = Vec2::new(18.0, 18.0);
const SLASH_SIZE: Vec2 = Vec2::new(40.0, 16.0);

/// Vertical offset of the legs below the body centre, relative to the
/// body's half height.
pub fn legs_offset(pose: LegsPose, half_height: f32) -> f32 {
    match pose {
        LegsPose::Up => -half_height * 0.4,
        LegsPose::Max => -half_height * 0.7,
        LegsPose::Down => -half_height - LEGS_SIZE.y * 0.3,
    }
}

/// Gives every new player its visual layers.
pub fn attach_player_visuals(mut commands: Commands, players: Query<Entity, Added<Player>>) {
    for player in &players {
        commands.entity(player).insert((
            super::AnimationController::default(),
            PlayerVisual::default(),
            super::ParticleEmitters::default(),
        ));

        let legs = commands
            .spawn((
                LegsLayer,
                Sprite {
                    color: Color::srgb(0.7, 0.7, 0.8),
                    custom_size: Some(LEGS_SIZE),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, SpriteLayer::Legs.z_index() - SpriteLayer::Body.z_index()),
                Visibility::Hidden,
            ))
            .id();
        let slash = commands
            .spawn((
                SlashLayer,
                Sprite {
                    color: Color::srgba(1.0, 0.95, 0.6, 0.85),
                    custom_size: Some(SLASH_SIZE),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, SpriteLayer::Slash.z_index() - SpriteLayer::Body.z_index()),
                Visibility::Hidden,
            ))
            .id();
        commands.entity(player).add_children(&[legs, slash]);
    }
}

/// Body size follows the active hitbox; facing flips the sprite; child
/// layers follow the accumulated cue state.
pub fn sync_player_layers(
    tuning: Res<MovementTuning>,
    mut players: Query<(&PlayerController, &AppliedHitbox, &PlayerVisual, &mut Sprite, &Children)>,
    mut legs: Query<(&mut Transform, &mut Visibility), (With<LegsLayer>, Without<SlashLayer>)>,
    mut slashes: Query<(&mut Transform, &mut Visibility), (With<SlashLayer>, Without<LegsLayer>)>,
) {
    for (controller, applied, visual, mut sprite, children) in &mut players {
        let size = tuning.hitbox(applied.0);
        let half_height = size.height * 0.5;
        sprite.custom_size = Some(Vec2::new(size.width, size.height));
        sprite.flip_x = controller.ability.facing == Facing::Left;

        for child in children.iter() {
            if let Ok((mut transform, mut visibility)) = legs.get_mut(child) {
                transform.translation.y = legs_offset(visual.legs, half_height);
                *visibility = if visual.layers == SpriteLayers::AttackPose {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            }
            if let Ok((mut transform, mut visibility)) = slashes.get_mut(child) {
                transform.translation.y = -half_height - SLASH_SIZE.y * 0.5;
                *visibility = if visual.slash_visible {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            }
        }
    }
}
