//! Level domain: components and resources for level geometry and pickups.

use bevy::ecs::message::Message;
use bevy::prelude::*;
use std::time::Duration;

#[derive(Component, Debug)]
pub struct Ground;

#[derive(Component, Debug)]
pub struct Wall;

/// Everything spawned for the current level, for bulk despawn.
#[derive(Component, Debug)]
pub struct LevelEntity;

/// Axis-aligned trigger region centred on the entity's transform. Triggers
/// are tested by overlap, never by the physics solver.
#[derive(Component, Debug, Clone, Copy)]
pub struct TriggerArea {
    pub half_size: Vec2,
}

impl TriggerArea {
    pub fn new(size: Vec2) -> Self {
        Self {
            half_size: size * 0.5,
        }
    }

    pub fn rect(&self, transform: &Transform) -> Rect {
        Rect::from_center_half_size(transform.translation.truncate(), self.half_size)
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Hazard {
    pub pogoable: bool,
}

/// Restores dash and grants an air jump. Hidden while recharging.
#[derive(Component, Debug)]
pub struct RefreshCrystal {
    recharge: Timer,
    active: bool,
}

impl RefreshCrystal {
    pub fn new(respawn_secs: f32) -> Self {
        Self {
            recharge: Timer::from_seconds(respawn_secs.max(0.0), TimerMode::Once),
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Uses up the crystal. Returns false if it was already spent.
    pub fn consume(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.recharge.reset();
        true
    }

    /// Advances the recharge. Returns true on the tick the crystal reappears.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.active {
            return false;
        }
        self.recharge.tick(delta);
        if self.recharge.is_finished() {
            self.active = true;
            return true;
        }
        false
    }
}

#[derive(Component, Debug, Clone)]
pub struct Checkpoint {
    pub id: String,
    /// Feet position used when respawning here.
    pub respawn: Vec2,
}

/// Where the player comes back after dying.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RespawnPoint {
    pub position: Vec2,
    pub checkpoint: Option<String>,
}

impl RespawnPoint {
    pub fn at_spawn(position: Vec2) -> Self {
        Self {
            position,
            checkpoint: None,
        }
    }

    /// Records a checkpoint. Returns true only when it is a new one.
    pub fn activate(&mut self, checkpoint: &Checkpoint) -> bool {
        if self.checkpoint.as_deref() == Some(checkpoint.id.as_str()) {
            return false;
        }
        self.checkpoint = Some(checkpoint.id.clone());
        self.position = checkpoint.respawn;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Hazard,
    FellOutOfWorld,
}

/// Sent after the player has been put back at the respawn point.
#[derive(Debug, Clone, Copy)]
pub struct PlayerRespawned {
    pub player: Entity,
    pub cause: DeathCause,
}

impl Message for PlayerRespawned {}
