//! Core domain: camera settings.

use bevy::prelude::*;

/// How the camera trails the player.
#[derive(Resource, Debug, Clone)]
pub struct CameraFollow {
    /// Higher values catch up faster. Units: 1/s.
    pub smoothing: f32,
    /// Horizontal offset toward the facing direction.
    pub lookahead: f32,
    pub vertical_offset: f32,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self {
            smoothing: 6.0,
            lookahead: 60.0,
            vertical_offset: 40.0,
        }
    }
}

impl CameraFollow {
    /// Frame-rate independent exponential approach of `current` toward `target`.
    pub fn approach(&self, current: Vec2, target: Vec2, dt: f32) -> Vec2 {
        let t = 1.0 - (-self.smoothing * dt).exp();
        current.lerp(target, t)
    }
}
