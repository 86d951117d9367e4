use crate::movement::context::StepContext;
use crate::movement::cues::{AnimationKey, LegsPose, PlayerCue, SpriteLayers};
use crate::movement::fsm::{LocomotionState, StateName, Transition};
use crate::movement::timers::{TimerAction, TimerHandle};

/// Downward pogo slash. The hitbox arms after a short delay and the state
/// falls back to Jump when the attack runs out.
#[derive(Debug, Default)]
pub struct AirAttack {
    attack_timer: Option<TimerHandle>,
    hitbox_timer: Option<TimerHandle>,
    legs: Option<LegsPose>,
}

impl AirAttack {
    fn cleanup(&mut self, ctx: &mut StepContext) {
        ctx.set_attack_hitbox(false);
        ctx.cancel(&mut self.attack_timer);
        ctx.cancel(&mut self.hitbox_timer);
    }

    fn update_legs(&mut self, ctx: &mut StepContext) {
        let vy = ctx.body.velocity.y;
        let pose = if vy > 600.0 {
            LegsPose::Up
        } else if vy > 200.0 {
            LegsPose::Max
        } else {
            LegsPose::Down
        };
        if self.legs != Some(pose) {
            self.legs = Some(pose);
            ctx.cue(PlayerCue::Legs(pose));
        }
    }
}

impl LocomotionState for AirAttack {
    fn name(&self) -> StateName {
        StateName::AirAttack
    }

    fn enter(&mut self, ctx: &mut StepContext, _transition: &Transition) {
        ctx.cue(PlayerCue::Layers(SpriteLayers::AttackPose));
        ctx.play(AnimationKey::Pogoslash);
        self.legs = Some(LegsPose::Up);
        ctx.cue(PlayerCue::Legs(LegsPose::Up));

        self.hitbox_timer = Some(ctx.schedule(ctx.tuning.attack_hitbox_delay, TimerAction::HitboxArmed));
        self.attack_timer = Some(ctx.schedule(ctx.tuning.attack_duration, TimerAction::AttackElapsed));

        ctx.ability.is_sliding = false;
        ctx.ability.can_wall_jump = false;
    }

    fn on_timer(&mut self, ctx: &mut StepContext, action: TimerAction) {
        match action {
            TimerAction::HitboxArmed => {
                self.hitbox_timer = None;
                ctx.set_attack_hitbox(true);
            }
            TimerAction::AttackElapsed => {
                self.attack_timer = None;
                ctx.transition(Transition::FALL);
            }
            _ => {}
        }
    }

    fn execute(&mut self, ctx: &mut StepContext) {
        if ctx.input.jump_just_pressed && ctx.ability.can_air_jump {
            self.cleanup(ctx);
            ctx.transition(Transition::AIR_JUMP);
            return;
        }

        if ctx.input.dash_just_pressed && ctx.ability.air_dash_available() {
            self.cleanup(ctx);
            ctx.transition(Transition::AirDash);
            return;
        }

        let direction = ctx.input.horizontal();
        if direction != 0.0 {
            // Facing stays locked for the slash.
            ctx.body.velocity.x = direction * ctx.tuning.pogo_air_control_speed;
        } else {
            ctx.body.velocity.x *= ctx.tuning.pogo_drift_damping;
        }

        let attack_running = self.attack_timer.is_some_and(|handle| ctx.timers.is_pending(handle));
        if !attack_running && ctx.should_wall_slide() && ctx.ability.past_wall_jump_grace(ctx.now) {
            self.cleanup(ctx);
            ctx.transition(Transition::WallSlide);
            return;
        }

        self.update_legs(ctx);
    }

    fn exit(&mut self, ctx: &mut StepContext, _next: &Transition) {
        self.cleanup(ctx);
        ctx.cue(PlayerCue::Layers(SpriteLayers::FullBody));
    }
}
