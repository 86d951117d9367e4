//! Movement domain: the player aggregate that owns the locomotion core.

use std::time::Duration;

use bevy::prelude::*;

use super::ability::AbilityState;
use super::body::CharacterBody;
use super::components::AttackHitbox;
use super::context::{Frame, StepContext};
use super::cues::{AnimationKey, CueBuffer, PlayerCue};
use super::fsm::{StateMachine, StateName, Transition};
use super::resources::MovementTuning;
use super::timers::{ActionTimers, TimerAction, TimerOwner};

#[derive(Component, Debug)]
pub struct PlayerController {
    pub body: CharacterBody,
    pub ability: AbilityState,
    pub attack: AttackHitbox,
    timers: ActionTimers,
    machine: StateMachine,
    cues: CueBuffer,
}

impl PlayerController {
    pub fn new(spawn: Vec2, tuning: &MovementTuning) -> Self {
        Self {
            body: CharacterBody::new(spawn, tuning),
            ability: AbilityState::default(),
            attack: AttackHitbox::default(),
            timers: ActionTimers::default(),
            machine: StateMachine::default(),
            cues: CueBuffer::default(),
        }
    }

    pub fn state(&self) -> StateName {
        self.machine.current()
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    pub fn timers(&self) -> &ActionTimers {
        &self.timers
    }

    pub fn animation(&self) -> Option<AnimationKey> {
        self.cues.current_animation()
    }

    pub fn drain_cues(&mut self) -> std::vec::Drain<'_, PlayerCue> {
        self.cues.drain()
    }

    fn with_context<R>(
        &mut self,
        frame: &Frame<'_>,
        run: impl FnOnce(&mut StateMachine, &mut StepContext<'_>) -> R,
    ) -> R {
        let Self {
            body,
            ability,
            attack,
            timers,
            machine,
            cues,
        } = self;
        let mut ctx = StepContext::new(frame, body, ability, attack, timers, cues);
        run(machine, &mut ctx)
    }

    /// Advances the player by one simulation step. Contact flags on `body`
    /// must already reflect this step.
    pub fn step(&mut self, frame: &Frame<'_>, delta: Duration) {
        let fired = self.timers.tick(delta);
        self.with_context(frame, |machine, ctx| {
            machine.start(ctx);

            for timer in fired {
                match timer.owner {
                    TimerOwner::Player => apply_player_timer(ctx, timer.action),
                    TimerOwner::State(owner) => machine.dispatch_timer(ctx, owner, timer.action),
                }
            }

            update_bookkeeping(ctx);
            machine.step(ctx);
        });
    }

    /// Puts the player back at `position` with every ability and timer reset
    /// and the machine forced into Idle.
    pub fn respawn(&mut self, frame: &Frame<'_>, position: Vec2) {
        info!("Player respawning at ({:.0}, {:.0})", position.x, position.y);
        self.with_context(frame, |machine, ctx| {
            machine.force(ctx, Transition::Idle { from_respawn: true }, |ctx| {
                ctx.timers.clear();
                *ctx.ability = AbilityState::default();
                ctx.body.teleport(position);
                ctx.body.restore_defaults(ctx.tuning);
                ctx.set_attack_hitbox(false);
            });
        });
    }

    /// Bounce off a pogoable surface. Only an armed air attack bounces.
    pub fn pogo_bounce(&mut self, frame: &Frame<'_>) -> bool {
        if self.state() != StateName::AirAttack || !self.attack.enabled {
            return false;
        }
        self.with_context(frame, |machine, ctx| {
            ctx.set_attack_hitbox(false);
            ctx.body.velocity.y = ctx.tuning.pogo_velocity;
            ctx.ability.has_air_dashed = false;
            machine.force(ctx, Transition::FALL, |_| {});
        });
        true
    }

    pub fn refresh_from_crystal(&mut self) {
        self.ability.refresh_from_crystal();
    }
}

fn apply_player_timer(ctx: &mut StepContext, action: TimerAction) {
    match action {
        TimerAction::DashCooldown => ctx.ability.can_dash = true,
        other => warn!("Locomotion: {:?} timer has no player-level handler", other),
    }
}

/// Per-step flags every state relies on, refreshed before the machine runs.
fn update_bookkeeping(ctx: &mut StepContext) {
    let grounded = ctx.grounded();
    ctx.ability.is_attempting_drop_through = false;
    if grounded {
        ctx.ability.time_last_blocked_down = Some(ctx.now);
    }
    ctx.ability.is_holding_fall_through_keys = ctx.input.down && ctx.input.jump_held;

    if grounded && ctx.ability.was_airborne {
        ctx.cue(PlayerCue::LandingBurst);
    }
    ctx.ability.was_airborne = !grounded;
}
