use crate::movement::components::HitboxProfile;
use crate::movement::context::StepContext;
use crate::movement::cues::{AnimationKey, PlayerCue, SpriteLayers};
use crate::movement::fsm::{CrouchEntry, LocomotionState, StateName, Transition};
use crate::movement::timers::{TimerAction, TimerHandle};

/// Horizontal burst from the ground. Entered from crouch it becomes a low
/// slide-dash that keeps the crouch hitbox.
#[derive(Debug, Default)]
pub struct GroundDash {
    from_crouch: bool,
    dash_timer: Option<TimerHandle>,
    settle_timer: Option<TimerHandle>,
}

impl GroundDash {
    /// Picks the follow-up state once gravity has had a step to act.
    fn finish(&mut self, ctx: &mut StepContext) {
        let grounded = ctx.grounded();
        if self.from_crouch && ctx.input.down && grounded {
            ctx.transition(Transition::crouch(CrouchEntry::DashEnd));
        } else if grounded && !ctx.can_stand_up() {
            ctx.transition(Transition::crouch(CrouchEntry::DashLandForced));
        } else if grounded {
            ctx.transition(Transition::IDLE);
        } else {
            ctx.transition(Transition::FALL);
        }
    }
}

impl LocomotionState for GroundDash {
    fn name(&self) -> StateName {
        StateName::GroundDash
    }

    fn enter(&mut self, ctx: &mut StepContext, transition: &Transition) {
        self.from_crouch = matches!(transition, Transition::GroundDash { from_crouch: true });

        ctx.cue(PlayerCue::Layers(SpriteLayers::FullBody));
        if self.from_crouch {
            ctx.play(AnimationKey::Slide);
            ctx.set_hitbox(HitboxProfile::Crouch);
        } else {
            ctx.play(AnimationKey::Dash);
            ctx.set_hitbox(HitboxProfile::Dash);
        }

        ctx.ability.is_dashing = true;
        ctx.ability.can_dash = false;
        ctx.body.max_velocity.x = ctx.tuning.dash_speed;

        let input = ctx.input.horizontal();
        let direction = if input != 0.0 { input } else { ctx.ability.facing.sign() };
        ctx.ability.set_facing(direction, true);

        ctx.body.velocity.x = ctx.tuning.dash_speed * direction;
        ctx.body.velocity.y = 0.0;
        ctx.body.gravity_enabled = false;

        self.dash_timer = Some(ctx.schedule(ctx.tuning.dash_duration, TimerAction::DashElapsed));
        ctx.schedule_for_player(ctx.tuning.dash_cooldown, TimerAction::DashCooldown);
    }

    fn on_timer(&mut self, ctx: &mut StepContext, action: TimerAction) {
        match action {
            TimerAction::DashElapsed => {
                self.dash_timer = None;
                ctx.body.gravity_enabled = true;
                self.settle_timer = Some(ctx.schedule(ctx.tuning.dash_settle_delay, TimerAction::DashSettled));
            }
            TimerAction::DashSettled => {
                self.settle_timer = None;
                self.finish(ctx);
            }
            _ => {}
        }
    }

    fn execute(&mut self, ctx: &mut StepContext) {
        if ctx.input.attack_just_pressed {
            ctx.transition(Transition::AirAttack);
        }
    }

    fn exit(&mut self, ctx: &mut StepContext, next: &Transition) {
        ctx.ability.is_dashing = false;
        ctx.body.gravity_enabled = true;
        ctx.body.drag_x = ctx.tuning.ground_drag;
        ctx.body.max_velocity.x = ctx.tuning.max_velocity_x;
        ctx.cancel(&mut self.dash_timer);
        ctx.cancel(&mut self.settle_timer);

        let keeps_crouch = self.from_crouch && matches!(next, Transition::Crouch { .. });
        if !keeps_crouch {
            ctx.set_hitbox(HitboxProfile::Normal);
        }
    }
}
