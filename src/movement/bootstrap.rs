//! Movement domain: player spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    AppliedHitbox, GameLayer, HitboxProfile, MovementTuning, Player, PlayerController,
    feet_to_center,
};

/// Spawns the player with its feet at `spawn`.
pub(crate) fn spawn_player(commands: &mut Commands, spawn: Vec2, tuning: &MovementTuning) -> Entity {
    let size = tuning.normal_hitbox;
    let center = feet_to_center(spawn, tuning, HitboxProfile::Normal);

    info!("Spawning player at ({:.0}, {:.0})", spawn.x, spawn.y);

    commands
        .spawn((
            // Identity & locomotion
            (
                Player,
                PlayerController::new(spawn, tuning),
                AppliedHitbox(HitboxProfile::Normal),
            ),
            // Rendering
            Sprite {
                color: Color::srgb(0.9, 0.9, 0.95),
                custom_size: Some(Vec2::new(size.width, size.height)),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 20.0),
            Visibility::default(),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::rectangle(size.width, size.height),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(0.0), // Gravity is integrated by the locomotion core
                Friction::new(0.0),
                CollisionLayers::new(
                    GameLayer::Player,
                    [GameLayer::Ground, GameLayer::Wall, GameLayer::SemiSolid],
                ),
            ),
        ))
        .id()
}
