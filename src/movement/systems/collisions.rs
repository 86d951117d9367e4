//! Movement domain: contact detection, level queries and one-way platforms.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    ContactResolution, GameLayer, LevelGeometry, MovementTuning, Player, PlayerController,
    SemiSolidContact, SemiSolidPlatform, WorldBounds, resolve_semi_solid_contact,
};

/// How far past the hitbox a surface still counts as touching.
const CONTACT_DISTANCE: f32 = 4.0;
/// Probes start this far inside the hitbox so they never begin past a surface.
const PROBE_INSET: f32 = 1.0;
/// Upward speed still treated as resting on the ground (solver jitter).
const GROUNDED_RISE_TOLERANCE: f32 = 1.0;
/// Platforms this close to the hitbox are resolved every step.
const PLATFORM_REACH: f32 = 8.0;

/// Answers level queries with ray probes against solid layers. One-way
/// platforms are never solid for these queries.
pub(crate) struct PhysicsLevel<'q, 'w, 's> {
    spatial_query: &'q SpatialQuery<'w, 's>,
    bounds: Option<WorldBounds>,
}

impl<'q, 'w, 's> PhysicsLevel<'q, 'w, 's> {
    pub(crate) fn new(spatial_query: &'q SpatialQuery<'w, 's>, bounds: Option<WorldBounds>) -> Self {
        Self {
            spatial_query,
            bounds,
        }
    }
}

impl LevelGeometry for PhysicsLevel<'_, '_, '_> {
    fn is_solid_in(&self, region: Rect) -> bool {
        // A surface exactly at the top edge is touching, not overlapping.
        let height = region.height() - 0.5;
        if height <= 0.0 {
            return false;
        }
        let filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);
        [region.min.x, region.center().x, region.max.x].into_iter().any(|x| {
            self.spatial_query
                .cast_ray(Vec2::new(x, region.min.y), Dir2::Y, height, true, &filter)
                .is_some()
        })
    }

    fn horizontal_bounds(&self) -> Option<(f32, f32)> {
        self.bounds.map(|bounds| (bounds.min_x, bounds.max_x))
    }
}

pub(crate) fn sync_body_from_physics(
    tuning: Res<MovementTuning>,
    mut query: Query<(&Transform, &LinearVelocity, &mut PlayerController), With<Player>>,
) {
    for (transform, velocity, mut controller) in &mut query {
        let body = &mut controller.body;
        let half_height = tuning.hitbox(body.hitbox).height * 0.5;
        body.previous_position = body.position;
        body.position = transform.translation.truncate() - Vec2::new(0.0, half_height);
        body.velocity = velocity.0;
    }
}

pub(crate) fn detect_contacts(
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    disabled_platforms: Query<Entity, (With<SemiSolidPlatform>, With<ColliderDisabled>)>,
    mut query: Query<&mut PlayerController, With<Player>>,
) {
    // Filter to solid geometry, plus one-way platforms that are currently active
    let ground_filter = SpatialQueryFilter::from_mask([
        GameLayer::Ground,
        GameLayer::Wall,
        GameLayer::SemiSolid,
    ])
    .with_excluded_entities(disabled_platforms.iter());
    let wall_filter = SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]);

    for mut controller in &mut query {
        let body = &mut controller.body;
        let was_grounded = body.blocked.down;
        let size = tuning.hitbox(body.hitbox);
        let feet = body.position;
        let half_width = size.width * 0.5 - PROBE_INSET;

        let down = body.velocity.y <= GROUNDED_RISE_TOLERANCE
            && [-half_width, 0.0, half_width].into_iter().any(|dx| {
                spatial_query
                    .cast_ray(
                        feet + Vec2::new(dx, PROBE_INSET),
                        Dir2::NEG_Y,
                        PROBE_INSET + CONTACT_DISTANCE,
                        true,
                        &ground_filter,
                    )
                    .is_some()
            });

        let probe_heights = [size.height * 0.25, size.height * 0.75];
        let side_reach = size.width * 0.5 + CONTACT_DISTANCE;
        let touches = |direction: Dir2| {
            probe_heights.into_iter().any(|dy| {
                spatial_query
                    .cast_ray(feet + Vec2::new(0.0, dy), direction, side_reach, true, &wall_filter)
                    .is_some()
            })
        };

        body.blocked.down = down;
        body.blocked.left = touches(Dir2::NEG_X);
        body.blocked.right = touches(Dir2::X);

        if down && !was_grounded {
            debug!("Landed at ({:.0}, {:.0})", feet.x, feet.y);
        } else if !down && was_grounded {
            debug!("Left ground at ({:.0}, {:.0})", feet.x, feet.y);
        }
    }
}

/// Turns each nearby one-way platform on or off for the coming physics step.
pub(crate) fn resolve_semi_solid_platforms(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    platforms: Query<(Entity, &Transform, &SemiSolidPlatform, Has<ColliderDisabled>), Without<Player>>,
    mut players: Query<(&mut PlayerController, &mut Transform), With<Player>>,
) {
    let now = time.elapsed_secs();

    for (mut controller, mut player_transform) in &mut players {
        let controller = &mut *controller;
        let (left, right) = controller.body.horizontal_extent(&tuning);

        for (entity, transform, platform, disabled) in &platforms {
            let center = transform.translation.truncate();
            let top = platform.top(transform);
            let near = right > center.x - platform.half_size.x - PLATFORM_REACH
                && left < center.x + platform.half_size.x + PLATFORM_REACH;

            let contact = SemiSolidContact {
                platform_top: top,
                feet_y: controller.body.position.y,
                previous_feet_y: controller.body.previous_position.y,
                velocity_y: controller.body.velocity.y,
                blocked_down: controller.body.blocked.down,
            };

            let solid = if near {
                match resolve_semi_solid_contact(&mut controller.ability, contact, &tuning, now) {
                    ContactResolution::Solid => true,
                    ContactResolution::PassThrough => false,
                    ContactResolution::BeginDrop { nudge } => {
                        debug!("Dropping through platform {:?}", entity);
                        controller.body.position.y -= nudge;
                        player_transform.translation.y -= nudge;
                        false
                    }
                }
            } else {
                // Out of reach: stay solid only while the player is above it
                contact.feet_y >= top - tuning.semi_solid_tolerance
            };

            if solid && disabled {
                commands.entity(entity).remove::<ColliderDisabled>();
            } else if !solid && !disabled {
                commands.entity(entity).insert(ColliderDisabled);
            }
        }
    }
}
