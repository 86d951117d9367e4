//! Movement domain: stepping the locomotion core and writing its results
//! back to the physics body.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::collisions::PhysicsLevel;
use crate::movement::{
    AppliedHitbox, Frame, HitboxProfile, MovementInput, MovementTuning, Player, PlayerController,
    PlayerCueMessage, WorldBounds,
};

/// Collider centre for a feet point under the given profile.
pub fn feet_to_center(feet: Vec2, tuning: &MovementTuning, profile: HitboxProfile) -> Vec2 {
    feet + Vec2::new(0.0, tuning.hitbox(profile).height * 0.5)
}

pub(crate) fn step_player_controllers(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    bounds: Option<Res<WorldBounds>>,
    spatial_query: SpatialQuery,
    mut players: Query<(Entity, &mut PlayerController), With<Player>>,
    mut cues: MessageWriter<PlayerCueMessage>,
) {
    let level = PhysicsLevel::new(&spatial_query, bounds.as_deref().copied());
    let frame = Frame {
        now: time.elapsed_secs(),
        input: &input,
        tuning: &tuning,
        level: &level,
    };

    for (player, mut controller) in &mut players {
        let before = controller.state();
        controller.step(&frame, time.delta());
        let after = controller.state();
        if before != after {
            debug!("Player {:?}: {} -> {}", player, before, after);
        }
        for cue in controller.drain_cues() {
            cues.write(PlayerCueMessage { player, cue });
        }
    }
}

/// Integrates gravity, drag and clamps, then pushes velocity, collider size
/// and feet position to the physics body.
pub(crate) fn apply_body_to_physics(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut players: Query<
        (
            Entity,
            &mut PlayerController,
            &mut Transform,
            &mut LinearVelocity,
            &mut AppliedHitbox,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, mut controller, mut transform, mut velocity, mut applied) in &mut players {
        let body = &mut controller.body;
        body.integrate_forces(dt, tuning.gravity);
        velocity.0 = body.velocity;

        if applied.0 != body.hitbox {
            let size = tuning.hitbox(body.hitbox);
            commands
                .entity(entity)
                .insert(Collider::rectangle(size.width, size.height));
            applied.0 = body.hitbox;
        }

        let center = feet_to_center(body.position, &tuning, body.hitbox);
        transform.translation.x = center.x;
        transform.translation.y = center.y;
    }
}
