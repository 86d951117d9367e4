//! Movement domain: one-way platform contact rules.
//!
//! Decides per platform and per step whether the player's body collides with
//! a semi-solid platform or passes through it.

use super::ability::AbilityState;
use super::resources::MovementTuning;

/// Vertical relationship between the player and one platform, y-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemiSolidContact {
    pub platform_top: f32,
    pub feet_y: f32,
    pub previous_feet_y: f32,
    pub velocity_y: f32,
    pub blocked_down: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactResolution {
    /// Treat the platform as solid ground.
    Solid,
    PassThrough,
    /// A drop-through just started; move the body down by `nudge` to clear
    /// the platform surface.
    BeginDrop { nudge: f32 },
}

impl ContactResolution {
    pub fn is_solid(self) -> bool {
        matches!(self, ContactResolution::Solid)
    }
}

pub fn resolve_semi_solid_contact(
    ability: &mut AbilityState,
    contact: SemiSolidContact,
    tuning: &MovementTuning,
    now: f32,
) -> ContactResolution {
    if ability.is_holding_fall_through_keys {
        return ContactResolution::PassThrough;
    }

    if ability.is_dropping_through {
        if ability.drop_through_until.is_some_and(|until| now < until) {
            return ContactResolution::PassThrough;
        }
        ability.is_dropping_through = false;
        ability.drop_through_until = None;
    }

    if ability.is_attempting_drop_through {
        let recently_grounded = contact.blocked_down
            || ability
                .time_last_blocked_down
                .is_some_and(|t| now - t < tuning.drop_blocked_down_grace);
        let on_surface = (contact.feet_y - contact.platform_top).abs() < tuning.semi_solid_tolerance;
        if recently_grounded && on_surface {
            ability.is_dropping_through = true;
            ability.drop_through_until = Some(now + tuning.drop_through_duration);
            return ContactResolution::BeginDrop {
                nudge: tuning.drop_through_nudge,
            };
        }
    }

    let falling_or_resting = contact.velocity_y <= 0.0;
    let feet_at_surface = contact.feet_y >= contact.platform_top - tuning.semi_solid_tolerance;
    let was_above = contact.previous_feet_y >= contact.platform_top - tuning.semi_solid_contact_slop;
    if falling_or_resting && feet_at_surface && was_above {
        ContactResolution::Solid
    } else {
        ContactResolution::PassThrough
    }
}
