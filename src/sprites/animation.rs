//! Animation playback driven by locomotion cues.
//!
//! There is no sprite sheet yet: each animation key has a placeholder tint
//! and the frame index drives a small brightness pulse so playback is
//! visible.

use bevy::prelude::*;

use crate::movement::AnimationKey;

/// Animation playback for the player body.
#[derive(Component, Debug)]
pub struct AnimationController {
    pub key: AnimationKey,
    pub current_frame: u32,
    pub total_frames: u32,
    /// Time accumulator for frame timing.
    pub frame_timer: f32,
    /// Seconds per frame.
    pub frame_duration: f32,
    pub looping: bool,
    /// Whether the animation has finished (for non-looping).
    pub finished: bool,
}

impl Default for AnimationController {
    fn default() -> Self {
        let mut controller = Self {
            key: AnimationKey::Idle,
            current_frame: 0,
            total_frames: 1,
            frame_timer: 0.0,
            frame_duration: 0.15,
            looping: true,
            finished: false,
        };
        controller.configure(AnimationKey::Idle);
        controller
    }
}

impl AnimationController {
    fn configure(&mut self, key: AnimationKey) {
        self.key = key;
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.finished = false;

        self.looping = !matches!(
            key,
            AnimationKey::Jump | AnimationKey::Dash | AnimationKey::Pogoslash
        );

        self.total_frames = match key {
            AnimationKey::Idle => 4,
            AnimationKey::Run => 6,
            AnimationKey::Jump => 2,
            AnimationKey::WallSlide => 2,
            AnimationKey::Dash => 3,
            AnimationKey::Slide => 2,
            AnimationKey::Crouch => 2,
            AnimationKey::CrouchWalk => 4,
            AnimationKey::Pogoslash => 4,
        };

        self.frame_duration = match key {
            AnimationKey::Dash => 0.06,
            AnimationKey::Pogoslash => 0.08,
            AnimationKey::Run | AnimationKey::CrouchWalk => 0.1,
            _ => 0.15,
        };
    }

    /// Switches animation, restarting from frame 0. Replaying the current
    /// key is a no-op.
    pub fn play(&mut self, key: AnimationKey) -> bool {
        if self.key == key {
            return false;
        }
        self.configure(key);
        true
    }

    /// Advances playback by `delta` seconds.
    pub fn advance(&mut self, delta: f32) {
        if self.finished {
            return;
        }

        self.frame_timer += delta;
        while self.frame_timer >= self.frame_duration {
            self.frame_timer -= self.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= self.total_frames {
                if self.looping {
                    self.current_frame = 0;
                } else {
                    self.current_frame = self.total_frames - 1;
                    self.finished = true;
                    return;
                }
            }
        }
    }

    /// Placeholder colour for the current frame.
    pub fn tint(&self) -> Color {
        let base = base_tint(self.key).to_srgba();
        let pulse = 1.0 - 0.06 * (self.current_frame % 2) as f32;
        Color::srgb(base.red * pulse, base.green * pulse, base.blue * pulse)
    }
}

fn base_tint(key: AnimationKey) -> Color {
    match key {
        AnimationKey::Idle => Color::srgb(0.9, 0.9, 0.95),
        AnimationKey::Run => Color::srgb(0.85, 0.9, 1.0),
        AnimationKey::Jump => Color::srgb(0.75, 0.85, 1.0),
        AnimationKey::WallSlide => Color::srgb(0.7, 0.7, 0.95),
        AnimationKey::Dash => Color::srgb(0.5, 0.95, 1.0),
        AnimationKey::Slide => Color::srgb(0.95, 0.8, 0.6),
        AnimationKey::Crouch | AnimationKey::CrouchWalk => Color::srgb(0.85, 0.8, 0.75),
        AnimationKey::Pogoslash => Color::srgb(1.0, 0.75, 0.75),
    }
}

/// Briefly whitens the body after a respawn.
#[derive(Component, Debug)]
pub struct RespawnFlash {
    pub timer: Timer,
}

impl Default for RespawnFlash {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(0.3, TimerMode::Once),
        }
    }
}

/// System that advances frames and applies the frame tint.
pub fn update_animation_frames(
    time: Res<Time>,
    mut query: Query<(&mut AnimationController, &mut Sprite, Option<&RespawnFlash>)>,
) {
    for (mut controller, mut sprite, flash) in &mut query {
        controller.advance(time.delta_secs());
        sprite.color = if flash.is_some() {
            Color::WHITE
        } else {
            controller.tint()
        };
    }
}

pub fn tick_respawn_flash(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut RespawnFlash)>,
) {
    for (entity, mut flash) in &mut query {
        flash.timer.tick(time.delta());
        if flash.timer.is_finished() {
            commands.entity(entity).remove::<RespawnFlash>();
        }
    }
}
