//! Short-lived particle sprites for dust trails and jump/landing bursts.

use bevy::prelude::*;
use rand::Rng;

use crate::movement::{ParticleEmitter, Player, PlayerController};

const PARTICLE_SIZE: f32 = 4.0;
const GRAVITY: f32 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Burst {
    Jump,
    Landing,
}

/// One particle to spawn, relative to an origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpawn {
    pub offset: Vec2,
    pub velocity: Vec2,
    pub lifetime: f32,
}

/// Rolls the particles for a burst. Counts and spread are randomised.
pub fn roll_burst(rng: &mut impl Rng, burst: Burst) -> Vec<ParticleSpawn> {
    let count = match burst {
        Burst::Jump => rng.random_range(6..=9),
        Burst::Landing => rng.random_range(8..=12),
    };
    (0..count)
        .map(|_| {
            let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let velocity = match burst {
                Burst::Jump => Vec2::new(
                    side * rng.random_range(20.0..90.0),
                    rng.random_range(-60.0..10.0),
                ),
                Burst::Landing => Vec2::new(
                    side * rng.random_range(60.0..160.0),
                    rng.random_range(10.0..70.0),
                ),
            };
            ParticleSpawn {
                offset: Vec2::new(rng.random_range(-8.0..8.0), 0.0),
                velocity,
                lifetime: rng.random_range(0.2..0.45),
            }
        })
        .collect()
}

#[derive(Component, Debug)]
pub struct Particle {
    pub velocity: Vec2,
    pub life: Timer,
}

/// Continuous emitters toggled by cues.
#[derive(Component, Debug)]
pub struct ParticleEmitters {
    pub run: bool,
    pub idle: bool,
    run_timer: Timer,
    idle_timer: Timer,
}

impl Default for ParticleEmitters {
    fn default() -> Self {
        Self {
            run: false,
            idle: false,
            run_timer: Timer::from_seconds(0.08, TimerMode::Repeating),
            idle_timer: Timer::from_seconds(0.6, TimerMode::Repeating),
        }
    }
}

impl ParticleEmitters {
    pub fn set(&mut self, emitter: ParticleEmitter, on: bool) {
        match emitter {
            ParticleEmitter::Run => self.run = on,
            ParticleEmitter::Idle => self.idle = on,
        }
    }
}

fn spawn_particle(commands: &mut Commands, origin: Vec2, spawn: ParticleSpawn, color: Color) {
    let position = origin + spawn.offset;
    commands.spawn((
        Particle {
            velocity: spawn.velocity,
            life: Timer::from_seconds(spawn.lifetime, TimerMode::Once),
        },
        Sprite {
            color,
            custom_size: Some(Vec2::splat(PARTICLE_SIZE)),
            ..default()
        },
        Transform::from_xyz(position.x, position.y, 15.0),
    ));
}

/// Spawns a burst at the player's feet.
pub fn spawn_burst(commands: &mut Commands, feet: Vec2, burst: Burst) {
    let mut rng = rand::rng();
    for spawn in roll_burst(&mut rng, burst) {
        spawn_particle(commands, feet, spawn, Color::srgba(0.9, 0.9, 0.85, 0.9));
    }
}

pub fn update_emitters(
    mut commands: Commands,
    time: Res<Time>,
    mut players: Query<(&PlayerController, &mut ParticleEmitters), With<Player>>,
) {
    let mut rng = rand::rng();
    for (controller, mut emitters) in &mut players {
        let feet = controller.body.position;
        let emitters = &mut *emitters;

        if emitters.run {
            emitters.run_timer.tick(time.delta());
            for _ in 0..emitters.run_timer.times_finished_this_tick() {
                let spawn = ParticleSpawn {
                    offset: Vec2::new(-controller.ability.facing.sign() * 6.0, 1.0),
                    velocity: Vec2::new(
                        -controller.ability.facing.sign() * rng.random_range(10.0..40.0),
                        rng.random_range(5.0..30.0),
                    ),
                    lifetime: 0.25,
                };
                spawn_particle(&mut commands, feet, spawn, Color::srgba(0.8, 0.75, 0.6, 0.8));
            }
        }

        if emitters.idle {
            emitters.idle_timer.tick(time.delta());
            for _ in 0..emitters.idle_timer.times_finished_this_tick() {
                let spawn = ParticleSpawn {
                    offset: Vec2::new(rng.random_range(-10.0..10.0), rng.random_range(10.0..40.0)),
                    velocity: Vec2::new(0.0, rng.random_range(15.0..30.0)),
                    lifetime: 0.5,
                };
                spawn_particle(&mut commands, feet, spawn, Color::srgba(0.6, 0.9, 1.0, 0.5));
            }
        }
    }
}

pub fn update_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut particles: Query<(Entity, &mut Particle, &mut Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();
    for (entity, mut particle, mut transform, mut sprite) in &mut particles {
        particle.life.tick(time.delta());
        if particle.life.is_finished() {
            commands.entity(entity).despawn();
            continue;
        }
        particle.velocity.y -= GRAVITY * dt;
        transform.translation += (particle.velocity * dt).extend(0.0);
        sprite.color.set_alpha(1.0 - particle.life.fraction());
    }
}
