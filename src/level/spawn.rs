//! Level domain: spawning level geometry, pickups and the player.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::{BlockKind, BoxDef, LevelDef};
use crate::level::components::{
    Checkpoint, Ground, Hazard, LevelEntity, RefreshCrystal, RespawnPoint, TriggerArea, Wall,
};
use crate::movement::{GameLayer, MovementTuning, SemiSolidPlatform, WorldBounds, spawn_player};

const WALL_COLOR: Color = Color::srgb(0.3, 0.3, 0.4);
const GROUND_COLOR: Color = Color::srgb(0.4, 0.5, 0.4);
const PLATFORM_COLOR: Color = Color::srgb(0.5, 0.4, 0.3);
const HAZARD_COLOR: Color = Color::srgb(0.8, 0.2, 0.2);
const POGO_HAZARD_COLOR: Color = Color::srgb(0.9, 0.5, 0.2);
const CRYSTAL_COLOR: Color = Color::srgb(0.4, 0.9, 1.0);
const CHECKPOINT_COLOR: Color = Color::srgba(0.9, 0.9, 0.3, 0.35);

const CRYSTAL_SIZE: f32 = 18.0;
const BOUND_WALL_THICKNESS: f32 = 40.0;
const BOUND_WALL_HEIGHT: f32 = 4000.0;

fn spawn_block(commands: &mut Commands, kind: BlockKind, area: &BoxDef) {
    let (color, layer) = match kind {
        BlockKind::Ground => (GROUND_COLOR, GameLayer::Ground),
        BlockKind::Wall => (WALL_COLOR, GameLayer::Wall),
    };
    let mut entity = commands.spawn((
        LevelEntity,
        Sprite {
            color,
            custom_size: Some(area.size()),
            ..default()
        },
        Transform::from_xyz(area.x, area.y, 0.0),
        RigidBody::Static,
        Collider::rectangle(area.width, area.height),
        CollisionLayers::new(layer, [GameLayer::Player]),
    ));
    match kind {
        BlockKind::Ground => entity.insert(Ground),
        BlockKind::Wall => entity.insert(Wall),
    };
}

pub(crate) fn spawn_level(mut commands: Commands, level: Res<LevelDef>, tuning: Res<MovementTuning>) {
    spawn_level_entities(&mut commands, &level, &tuning);
}

/// Spawns everything described by `level`, then the player.
pub(crate) fn spawn_level_entities(commands: &mut Commands, level: &LevelDef, tuning: &MovementTuning) {
    info!("Spawning level '{}'", level.name);

    let bounds = WorldBounds {
        min_x: level.bounds.min_x,
        max_x: level.bounds.max_x,
    };
    commands.insert_resource(bounds);
    commands.insert_resource(RespawnPoint::at_spawn(level.spawn_point()));

    for block in &level.blocks {
        spawn_block(commands, block.kind, &block.area);
    }

    // World edges are walls physically, but never slideable
    let half = BOUND_WALL_THICKNESS * 0.5;
    for x in [bounds.min_x - half, bounds.max_x + half] {
        spawn_block(
            commands,
            BlockKind::Wall,
            &BoxDef::new(x, 0.0, BOUND_WALL_THICKNESS, BOUND_WALL_HEIGHT),
        );
    }

    for platform in &level.platforms {
        commands.spawn((
            LevelEntity,
            SemiSolidPlatform {
                half_size: platform.size() * 0.5,
            },
            Sprite {
                color: PLATFORM_COLOR,
                custom_size: Some(platform.size()),
                ..default()
            },
            Transform::from_xyz(platform.x, platform.y, 1.0),
            RigidBody::Static,
            Collider::rectangle(platform.width, platform.height),
            CollisionLayers::new(GameLayer::SemiSolid, [GameLayer::Player]),
        ));
    }

    for hazard in &level.hazards {
        let color = if hazard.pogoable {
            POGO_HAZARD_COLOR
        } else {
            HAZARD_COLOR
        };
        commands.spawn((
            LevelEntity,
            Hazard {
                pogoable: hazard.pogoable,
            },
            TriggerArea::new(hazard.area.size()),
            Sprite {
                color,
                custom_size: Some(hazard.area.size()),
                ..default()
            },
            Transform::from_xyz(hazard.area.x, hazard.area.y, 2.0),
        ));
    }

    for crystal in &level.crystals {
        commands.spawn((
            LevelEntity,
            RefreshCrystal::new(crystal.respawn_secs),
            TriggerArea::new(Vec2::splat(CRYSTAL_SIZE)),
            Sprite {
                color: CRYSTAL_COLOR,
                custom_size: Some(Vec2::splat(CRYSTAL_SIZE)),
                ..default()
            },
            Transform::from_xyz(crystal.x, crystal.y, 5.0)
                .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_4)),
            Visibility::Visible,
        ));
    }

    for checkpoint in &level.checkpoints {
        commands.spawn((
            LevelEntity,
            Checkpoint {
                id: checkpoint.id.clone(),
                respawn: Vec2::new(checkpoint.respawn.0, checkpoint.respawn.1),
            },
            TriggerArea::new(checkpoint.area.size()),
            Sprite {
                color: CHECKPOINT_COLOR,
                custom_size: Some(checkpoint.area.size()),
                ..default()
            },
            Transform::from_xyz(checkpoint.area.x, checkpoint.area.y, 1.0),
        ));
    }

    spawn_player(commands, level.spawn_point(), tuning);
}
