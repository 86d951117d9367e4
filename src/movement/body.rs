//! Movement domain: engine-independent mirror of the player's physics body.
//!
//! Positions use y-up world coordinates and refer to the feet point (bottom
//! centre of the hitbox), so hitbox swaps never move the feet.

use bevy::prelude::*;

use super::components::HitboxProfile;
use super::resources::MovementTuning;

/// Contact flags for the current step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blocked {
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone)]
pub struct CharacterBody {
    pub position: Vec2,
    pub previous_position: Vec2,
    pub velocity: Vec2,
    pub blocked: Blocked,
    /// Deceleration toward zero horizontal velocity, units/s^2.
    pub drag_x: f32,
    pub gravity_enabled: bool,
    pub max_velocity: Vec2,
    pub hitbox: HitboxProfile,
}

impl CharacterBody {
    pub fn new(position: Vec2, tuning: &MovementTuning) -> Self {
        Self {
            position,
            previous_position: position,
            velocity: Vec2::ZERO,
            blocked: Blocked::default(),
            drag_x: tuning.ground_drag,
            gravity_enabled: true,
            max_velocity: Vec2::new(tuning.max_velocity_x, tuning.max_velocity_y),
            hitbox: HitboxProfile::Normal,
        }
    }

    /// Gravity, horizontal drag and the velocity clamp for one step.
    pub fn integrate_forces(&mut self, dt: f32, gravity: f32) {
        if self.gravity_enabled {
            self.velocity.y -= gravity * dt;
        }

        if self.drag_x > 0.0 {
            let drop = self.drag_x * dt;
            if self.velocity.x.abs() <= drop {
                self.velocity.x = 0.0;
            } else {
                self.velocity.x -= drop * self.velocity.x.signum();
            }
        }

        self.velocity.x = self.velocity.x.clamp(-self.max_velocity.x, self.max_velocity.x);
        self.velocity.y = self.velocity.y.clamp(-self.max_velocity.y, self.max_velocity.y);
    }

    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
        self.previous_position = position;
        self.velocity = Vec2::ZERO;
        self.blocked = Blocked::default();
    }

    pub fn grounded(&self) -> bool {
        self.blocked.down
    }

    pub fn on_wall(&self) -> bool {
        self.blocked.left || self.blocked.right
    }

    /// Horizontal extent of the active hitbox.
    pub fn horizontal_extent(&self, tuning: &MovementTuning) -> (f32, f32) {
        let half = tuning.hitbox(self.hitbox).width * 0.5;
        (self.position.x - half, self.position.x + half)
    }

    pub fn restore_defaults(&mut self, tuning: &MovementTuning) {
        self.drag_x = tuning.ground_drag;
        self.gravity_enabled = true;
        self.max_velocity = Vec2::new(tuning.max_velocity_x, tuning.max_velocity_y);
        self.hitbox = HitboxProfile::Normal;
    }
}
