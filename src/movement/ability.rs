//! Movement domain: ability flags and grace-window timestamps.
//!
//! Every timestamp is an absolute simulation time in seconds. `None` means
//! "never set", which callers treat as expired.

use super::components::{Facing, WallSide};
use super::resources::MovementTuning;

#[derive(Debug, Clone)]
pub struct AbilityState {
    pub facing: Facing,

    pub can_dash: bool,
    pub has_air_dashed: bool,
    pub can_air_jump: bool,
    pub can_wall_jump: bool,
    pub is_dashing: bool,
    pub is_sliding: bool,
    pub is_crouching: bool,

    pub jump_being_held: bool,
    pub jump_cutoff: bool,

    pub is_attempting_drop_through: bool,
    pub is_dropping_through: bool,
    pub is_holding_fall_through_keys: bool,
    pub was_airborne: bool,

    pub time_last_grounded: Option<f32>,
    pub jump_buffered_at: Option<f32>,
    pub time_last_blocked_down: Option<f32>,
    pub drop_through_until: Option<f32>,

    /// Re-entry into wall slide is suppressed until this time.
    pub wall_jump_grace_until: Option<f32>,
    /// Wall slide survives a lost contact until this time.
    pub wall_contact_lost_until: Option<f32>,
    pub wall_jump_action_until: Option<f32>,
    pub wall_jump_ground_check_until: Option<f32>,

    pub last_wall_side: Option<WallSide>,
    /// One-shot dash direction set when dashing off a wall.
    pub dash_away_direction: Option<f32>,
}

impl Default for AbilityState {
    fn default() -> Self {
        Self {
            facing: Facing::Right,
            can_dash: true,
            has_air_dashed: false,
            can_air_jump: false,
            can_wall_jump: false,
            is_dashing: false,
            is_sliding: false,
            is_crouching: false,
            jump_being_held: false,
            jump_cutoff: false,
            is_attempting_drop_through: false,
            is_dropping_through: false,
            is_holding_fall_through_keys: false,
            was_airborne: false,
            time_last_grounded: None,
            jump_buffered_at: None,
            time_last_blocked_down: None,
            drop_through_until: None,
            wall_jump_grace_until: None,
            wall_contact_lost_until: None,
            wall_jump_action_until: None,
            wall_jump_ground_check_until: None,
            last_wall_side: None,
            dash_away_direction: None,
        }
    }
}

impl AbilityState {
    /// Facing is locked while sliding or dashing unless `force` is set.
    pub fn set_facing(&mut self, direction: f32, force: bool) {
        if !force && (self.is_sliding || self.is_dashing) {
            return;
        }
        if let Some(facing) = Facing::from_direction(direction) {
            self.facing = facing;
        }
    }

    pub fn refresh_grounded(&mut self, now: f32) {
        self.time_last_grounded = Some(now);
    }

    pub fn coyote_available(&self, now: f32, tuning: &MovementTuning) -> bool {
        self.time_last_grounded
            .is_some_and(|t| now - t < tuning.coyote_time)
    }

    pub fn buffer_jump(&mut self, now: f32) {
        self.jump_buffered_at = Some(now);
    }

    pub fn jump_buffer_valid(&self, now: f32, tuning: &MovementTuning) -> bool {
        self.jump_buffered_at
            .is_some_and(|t| now - t < tuning.jump_buffer_time)
    }

    /// Consumes coyote time and the jump buffer in one go.
    pub fn consume_jump(&mut self) {
        self.time_last_grounded = None;
        self.jump_buffered_at = None;
    }

    pub fn past_wall_jump_grace(&self, now: f32) -> bool {
        self.wall_jump_grace_until.is_none_or(|until| now > until)
    }

    pub fn clear_air_abilities(&mut self) {
        self.can_air_jump = false;
        self.has_air_dashed = false;
    }

    /// Effect of touching an active refresh crystal.
    pub fn refresh_from_crystal(&mut self) {
        self.can_dash = true;
        self.has_air_dashed = false;
        self.can_air_jump = true;
    }

    pub fn air_dash_available(&self) -> bool {
        self.can_dash && !self.has_air_dashed
    }
}
