//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Solid floors and blocks
    Ground,
    /// Wall surfaces
    Wall,
    /// One-way platforms that can be dropped through
    SemiSolid,
    /// Player character
    Player,
    /// Spikes and other lethal geometry
    Hazard,
    /// Pickups and checkpoints - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Zero maps to `None`; callers keep their current facing in that case.
    pub fn from_direction(direction: f32) -> Option<Self> {
        if direction > 0.0 {
            Some(Facing::Right)
        } else if direction < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Which side of the body a wall was touched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// Direction pointing into the wall.
    pub fn sign(self) -> f32 {
        match self {
            WallSide::Left => -1.0,
            WallSide::Right => 1.0,
        }
    }

    /// Direction pointing away from the wall.
    pub fn away(self) -> f32 {
        -self.sign()
    }
}

/// Collision box profiles. Every profile shares the same feet line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitboxProfile {
    #[default]
    Normal,
    Crouch,
    Dash,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct HitboxSize {
    pub width: f32,
    pub height: f32,
}

impl HitboxSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The downward pogo hitbox used by the air attack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackHitbox {
    pub enabled: bool,
}

/// Physics-side bookkeeping for the player collider: which profile the
/// attached `Collider` currently has.
#[derive(Component, Debug, Default)]
pub struct AppliedHitbox(pub HitboxProfile);

/// One-way platform. Collision is toggled per step by inserting or removing
/// `ColliderDisabled`.
#[derive(Component, Debug, Clone, Copy)]
pub struct SemiSolidPlatform {
    pub half_size: Vec2,
}

impl SemiSolidPlatform {
    pub fn top(&self, transform: &Transform) -> f32 {
        transform.translation.y + self.half_size.y
    }
}
