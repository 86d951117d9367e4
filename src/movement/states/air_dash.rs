use crate::movement::components::HitboxProfile;
use crate::movement::context::StepContext;
use crate::movement::cues::{AnimationKey, PlayerCue, SpriteLayers};
use crate::movement::fsm::{LocomotionState, StateName, Transition};
use crate::movement::timers::{TimerAction, TimerHandle};

#[derive(Debug, Default)]
pub struct AirDash {
    dash_timer: Option<TimerHandle>,
}

impl LocomotionState for AirDash {
    fn name(&self) -> StateName {
        StateName::AirDash
    }

    fn enter(&mut self, ctx: &mut StepContext, _transition: &Transition) {
        ctx.cue(PlayerCue::Layers(SpriteLayers::FullBody));
        ctx.play(AnimationKey::Dash);
        ctx.ability.is_dashing = true;
        ctx.set_hitbox(HitboxProfile::Dash);
        ctx.ability.can_dash = false;
        ctx.body.max_velocity.x = ctx.tuning.air_dash_speed;

        let direction = match ctx.ability.dash_away_direction.take() {
            Some(away) => away,
            None => {
                let input = ctx.input.horizontal();
                if input != 0.0 { input } else { ctx.ability.facing.sign() }
            }
        };

        ctx.body.velocity.x = ctx.tuning.air_dash_speed * direction;
        ctx.body.velocity.y = 0.0;
        ctx.body.gravity_enabled = false;
        ctx.ability.has_air_dashed = true;

        self.dash_timer = Some(ctx.schedule(ctx.tuning.dash_duration, TimerAction::DashElapsed));
        ctx.schedule_for_player(ctx.tuning.dash_cooldown, TimerAction::DashCooldown);
        ctx.ability.set_facing(direction, true);
    }

    fn on_timer(&mut self, ctx: &mut StepContext, action: TimerAction) {
        if action == TimerAction::DashElapsed {
            self.dash_timer = None;
            ctx.transition(Transition::FALL);
        }
    }

    fn execute(&mut self, ctx: &mut StepContext) {
        if ctx.input.jump_just_pressed && ctx.ability.can_air_jump {
            ctx.cancel(&mut self.dash_timer);
            ctx.transition(Transition::AIR_JUMP);
            return;
        }

        if ctx.input.attack_just_pressed {
            ctx.cancel(&mut self.dash_timer);
            ctx.transition(Transition::AirAttack);
        }
    }

    fn exit(&mut self, ctx: &mut StepContext, _next: &Transition) {
        ctx.ability.is_dashing = false;
        ctx.set_hitbox(HitboxProfile::Normal);
        ctx.body.gravity_enabled = true;
        ctx.body.drag_x = ctx.tuning.ground_drag;
        ctx.body.max_velocity.x = ctx.tuning.max_velocity_x;
        ctx.cancel(&mut self.dash_timer);
        ctx.play(AnimationKey::Jump);
    }
}
