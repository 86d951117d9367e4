//! Movement domain: level geometry queries used by the locomotion core.

use bevy::prelude::*;

use super::body::CharacterBody;
use super::resources::MovementTuning;

pub trait LevelGeometry {
    /// True if any solid (non-pass-through) geometry overlaps `region`.
    fn is_solid_in(&self, region: Rect) -> bool;

    /// Left and right world limits, if the level has any.
    fn horizontal_bounds(&self) -> Option<(f32, f32)> {
        None
    }
}

/// Geometry with nothing in it.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenLevel;

impl LevelGeometry for OpenLevel {
    fn is_solid_in(&self, _region: Rect) -> bool {
        false
    }
}

/// Space the normal hitbox would occupy above the crouch hitbox, narrowed so
/// adjacent walls do not count as ceilings. `None` when no headroom is needed.
pub fn headroom_region(body: &CharacterBody, tuning: &MovementTuning) -> Option<Rect> {
    let normal = tuning.normal_hitbox;
    let crouch = tuning.crouch_hitbox;
    if normal.height <= crouch.height {
        return None;
    }
    let half_width = normal.width * 0.75 * 0.5;
    let feet = body.position;
    Some(Rect::new(
        feet.x - half_width,
        feet.y + crouch.height,
        feet.x + half_width,
        feet.y + normal.height,
    ))
}

pub fn can_stand_up(body: &CharacterBody, tuning: &MovementTuning, level: &dyn LevelGeometry) -> bool {
    headroom_region(body, tuning).is_none_or(|region| !level.is_solid_in(region))
}
