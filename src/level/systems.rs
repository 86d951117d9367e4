//! Level domain: pickups, checkpoints, hazards and respawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::LevelDef;
use crate::level::components::{
    Checkpoint, DeathCause, Hazard, PlayerRespawned, RefreshCrystal, RespawnPoint, TriggerArea,
};
use crate::movement::{
    Frame, HitboxProfile, MovementInput, MovementTuning, PhysicsLevel, Player, PlayerController,
    WorldBounds, feet_to_center,
};

const CHECKPOINT_ACTIVE_COLOR: Color = Color::srgba(0.3, 1.0, 0.4, 0.45);
const CHECKPOINT_IDLE_COLOR: Color = Color::srgba(0.9, 0.9, 0.3, 0.35);

/// Strict overlap; touching edges do not count.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

/// The player's active hitbox in world space.
pub fn player_rect(controller: &PlayerController, tuning: &MovementTuning) -> Rect {
    let size = tuning.hitbox(controller.body.hitbox);
    let feet = controller.body.position;
    Rect::new(
        feet.x - size.width * 0.5,
        feet.y,
        feet.x + size.width * 0.5,
        feet.y + size.height,
    )
}

pub(crate) fn tick_crystals(
    time: Res<Time>,
    mut crystals: Query<(Entity, &mut RefreshCrystal, &mut Visibility)>,
) {
    for (entity, mut crystal, mut visibility) in &mut crystals {
        if crystal.tick(time.delta()) {
            debug!("Crystal {:?} recharged", entity);
            *visibility = Visibility::Visible;
        }
    }
}

pub(crate) fn collect_crystals(
    tuning: Res<MovementTuning>,
    mut players: Query<&mut PlayerController, With<Player>>,
    mut crystals: Query<(Entity, &Transform, &TriggerArea, &mut RefreshCrystal, &mut Visibility)>,
) {
    for mut controller in &mut players {
        let body = player_rect(&controller, &tuning);
        for (entity, transform, area, mut crystal, mut visibility) in &mut crystals {
            if !crystal.is_active() || !overlaps(body, area.rect(transform)) {
                continue;
            }
            if crystal.consume() {
                debug!("Crystal {:?} collected", entity);
                controller.refresh_from_crystal();
                *visibility = Visibility::Hidden;
            }
        }
    }
}

pub(crate) fn activate_checkpoints(
    tuning: Res<MovementTuning>,
    mut respawn: ResMut<RespawnPoint>,
    players: Query<&PlayerController, With<Player>>,
    mut checkpoints: Query<(&Transform, &TriggerArea, &Checkpoint, &mut Sprite)>,
) {
    let mut changed = false;
    for controller in &players {
        let body = player_rect(controller, &tuning);
        for (transform, area, checkpoint, _) in &checkpoints {
            if overlaps(body, area.rect(transform)) && respawn.activate(checkpoint) {
                info!("Checkpoint '{}' activated", checkpoint.id);
                changed = true;
            }
        }
    }

    if changed {
        for (_, _, checkpoint, mut sprite) in &mut checkpoints {
            sprite.color = if respawn.checkpoint.as_deref() == Some(checkpoint.id.as_str()) {
                CHECKPOINT_ACTIVE_COLOR
            } else {
                CHECKPOINT_IDLE_COLOR
            };
        }
    }
}

/// Hazards either bounce an armed air attack or kill. Falling below the
/// level also kills. Death respawns at the last checkpoint.
pub(crate) fn check_player_hazards(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    level_def: Res<LevelDef>,
    bounds: Option<Res<WorldBounds>>,
    respawn: Res<RespawnPoint>,
    spatial_query: SpatialQuery,
    hazards: Query<(&Transform, &TriggerArea, &Hazard), Without<Player>>,
    mut players: Query<
        (Entity, &mut PlayerController, &mut Transform, &mut LinearVelocity),
        With<Player>,
    >,
    mut respawned: MessageWriter<PlayerRespawned>,
) {
    let level = PhysicsLevel::new(&spatial_query, bounds.as_deref().copied());
    let frame = Frame {
        now: time.elapsed_secs(),
        input: &input,
        tuning: &tuning,
        level: &level,
    };

    for (player, mut controller, mut transform, mut velocity) in &mut players {
        let body = player_rect(&controller, &tuning);
        let mut touching_lethal = false;
        let mut touching_pogo = false;
        for (hazard_transform, area, hazard) in &hazards {
            if overlaps(body, area.rect(hazard_transform)) {
                if hazard.pogoable {
                    touching_pogo = true;
                } else {
                    touching_lethal = true;
                }
            }
        }

        if touching_pogo && !touching_lethal && controller.pogo_bounce(&frame) {
            debug!("Player {:?} pogo bounce", player);
            velocity.0 = controller.body.velocity;
            continue;
        }

        let cause = if touching_pogo || touching_lethal {
            DeathCause::Hazard
        } else if controller.body.position.y < level_def.bounds.kill_y {
            DeathCause::FellOutOfWorld
        } else {
            continue;
        };

        info!("Player {:?} died ({:?})", player, cause);
        controller.respawn(&frame, respawn.position);
        let center = feet_to_center(respawn.position, &tuning, HitboxProfile::Normal);
        transform.translation.x = center.x;
        transform.translation.y = center.y;
        velocity.0 = Vec2::ZERO;
        respawned.write(PlayerRespawned { player, cause });
    }
}

/// Re-reads tuning and level files and rebuilds the level.
#[cfg(feature = "dev-tools")]
pub(crate) fn reload_level(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    entities: Query<Entity, Or<(With<crate::level::components::LevelEntity>, With<Player>)>>,
) {
    if !keyboard.just_pressed(KeyCode::F5) {
        return;
    }

    for entity in &entities {
        commands.entity(entity).despawn();
    }

    let tuning = crate::content::load_tuning();
    let level = crate::content::load_level();
    crate::level::spawn::spawn_level_entities(&mut commands, &level, &tuning);
    commands.insert_resource(tuning);
    commands.insert_resource(level);
    info!("Reloaded level and movement tuning");
}
