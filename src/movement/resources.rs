//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::Deserialize;

use super::components::{HitboxProfile, HitboxSize};

/// Every movement constant, in world units and seconds. Loaded from
/// `assets/data/movement.ron`; omitted fields keep their defaults.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub run_speed: f32,
    pub ground_drag: f32,
    pub max_velocity_x: f32,
    pub max_velocity_y: f32,
    pub gravity: f32,

    pub jump_velocity: f32,
    /// Applied once to upward velocity when jump is released early.
    pub jump_cut_multiplier: f32,
    pub air_speed: f32,
    pub coyote_time: f32,
    pub jump_buffer_time: f32,

    pub pogo_velocity: f32,
    pub pogo_air_control_speed: f32,
    pub pogo_drift_damping: f32,
    pub attack_duration: f32,
    pub attack_hitbox_delay: f32,

    pub wall_slide_speed: f32,
    pub wall_nudge_speed: f32,
    pub wall_stick_speed: f32,
    pub wall_jump_velocity_x: f32,
    pub wall_jump_velocity_y: f32,
    pub wall_jump_action_delay: f32,
    pub wall_jump_ground_check_delay: f32,
    pub wall_contact_grace: f32,
    pub explicit_detach_grace: f32,
    pub wall_reattach_grace: f32,
    pub world_bound_epsilon: f32,

    pub dash_speed: f32,
    pub air_dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    pub dash_settle_delay: f32,

    pub crouch_slide_velocity_from_idle: f32,
    pub crouch_slide_duration_from_idle: f32,
    pub crouch_walk_speed: f32,
    pub run_to_crouch_slide_damping: f32,
    pub crouch_slide_drag: f32,
    pub min_crouch_slide_speed: f32,

    pub drop_through_duration: f32,
    pub drop_blocked_down_grace: f32,
    pub drop_through_nudge: f32,
    pub semi_solid_tolerance: f32,
    pub semi_solid_contact_slop: f32,

    pub normal_hitbox: HitboxSize,
    pub crouch_hitbox: HitboxSize,
    pub dash_hitbox: HitboxSize,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            run_speed: 350.0,
            ground_drag: 1000.0,
            max_velocity_x: 400.0,
            max_velocity_y: 1500.0,
            gravity: 1500.0,

            jump_velocity: 700.0,
            jump_cut_multiplier: 0.35,
            air_speed: 325.0,
            coyote_time: 0.1,
            jump_buffer_time: 0.12,

            pogo_velocity: 700.0,
            pogo_air_control_speed: 320.0,
            pogo_drift_damping: 0.95,
            attack_duration: 0.4,
            attack_hitbox_delay: 0.1,

            wall_slide_speed: 100.0,
            wall_nudge_speed: 30.0,
            wall_stick_speed: 30.0,
            wall_jump_velocity_x: 400.0,
            wall_jump_velocity_y: 700.0,
            wall_jump_action_delay: 0.15,
            wall_jump_ground_check_delay: 0.06,
            wall_contact_grace: 0.075,
            explicit_detach_grace: 0.15,
            wall_reattach_grace: 0.1,
            world_bound_epsilon: 2.0,

            dash_speed: 700.0,
            air_dash_speed: 700.0,
            dash_duration: 0.25,
            dash_cooldown: 0.4,
            dash_settle_delay: 0.016,

            crouch_slide_velocity_from_idle: 0.0,
            crouch_slide_duration_from_idle: 0.0,
            crouch_walk_speed: 175.0,
            run_to_crouch_slide_damping: 0.8,
            crouch_slide_drag: 300.0,
            min_crouch_slide_speed: 150.0,

            drop_through_duration: 0.25,
            drop_blocked_down_grace: 0.05,
            drop_through_nudge: 2.0,
            semi_solid_tolerance: 8.0,
            semi_solid_contact_slop: 1.0,

            normal_hitbox: HitboxSize::new(25.0, 50.0),
            crouch_hitbox: HitboxSize::new(25.0, 30.0),
            dash_hitbox: HitboxSize::new(25.0, 40.0),
        }
    }
}

impl MovementTuning {
    pub fn hitbox(&self, profile: HitboxProfile) -> HitboxSize {
        match profile {
            HitboxProfile::Normal => self.normal_hitbox,
            HitboxProfile::Crouch => self.crouch_hitbox,
            HitboxProfile::Dash => self.dash_hitbox,
        }
    }

    /// Apex height of a full-hold ground jump: h = v^2 / (2g)
    pub fn single_jump_height(&self) -> f32 {
        self.jump_velocity * self.jump_velocity / (2.0 * self.gravity)
    }
}

/// Raw held state of every action button for one simulation step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeldButtons {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub dash: bool,
    pub attack: bool,
}

/// Per-step input snapshot. Edges are derived from consecutive held states,
/// so "just pressed" is true for exactly one step per physical press.
#[derive(Resource, Debug, Default, Clone)]
pub struct MovementInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump_held: bool,
    pub dash_held: bool,
    pub attack_held: bool,
    pub jump_just_pressed: bool,
    pub dash_just_pressed: bool,
    pub attack_just_pressed: bool,
    pub down_just_pressed: bool,
}

impl MovementInput {
    pub fn advance(&mut self, held: HeldButtons) {
        self.jump_just_pressed = held.jump && !self.jump_held;
        self.dash_just_pressed = held.dash && !self.dash_held;
        self.attack_just_pressed = held.attack && !self.attack_held;
        self.down_just_pressed = held.down && !self.down;

        self.left = held.left;
        self.right = held.right;
        self.up = held.up;
        self.down = held.down;
        self.jump_held = held.jump;
        self.dash_held = held.dash;
        self.attack_held = held.attack;
    }

    /// -1, 0 or 1. Left wins when both directions are held.
    pub fn horizontal(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }

    pub fn any_horizontal(&self) -> bool {
        self.left || self.right
    }
}

/// Horizontal world limits. Touching these never starts a wall slide.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min_x: f32,
    pub max_x: f32,
}
