use crate::movement::components::WallSide;
use crate::movement::context::StepContext;
use crate::movement::cues::AnimationKey;
use crate::movement::fsm::{LocomotionState, StateName, Transition};

#[derive(Debug)]
pub struct WallJump;

impl LocomotionState for WallJump {
    fn name(&self) -> StateName {
        StateName::WallJump
    }

    fn enter(&mut self, ctx: &mut StepContext, _transition: &Transition) {
        let blocked = ctx.body.blocked;
        let side = if blocked.left {
            Some(WallSide::Left)
        } else if blocked.right {
            Some(WallSide::Right)
        } else {
            ctx.ability.last_wall_side
        };
        let Some(side) = side else {
            ctx.transition(Transition::FALL);
            return;
        };

        ctx.play(AnimationKey::Jump);
        ctx.ability.last_wall_side = Some(side);

        let direction = side.away();
        ctx.body.velocity.x = ctx.tuning.wall_jump_velocity_x * direction;
        ctx.body.velocity.y = ctx.tuning.wall_jump_velocity_y;
        ctx.ability.set_facing(direction, true);

        ctx.ability.has_air_dashed = false;
        ctx.ability.jump_being_held = true;
        ctx.ability.jump_cutoff = false;
        ctx.ability.wall_jump_action_until = Some(ctx.now + ctx.tuning.wall_jump_action_delay);
        ctx.ability.wall_jump_ground_check_until = Some(ctx.now + ctx.tuning.wall_jump_ground_check_delay);
    }

    fn execute(&mut self, ctx: &mut StepContext) {
        let now = ctx.now;
        let actions_allowed = ctx.ability.wall_jump_action_until.is_none_or(|until| now > until);

        if actions_allowed {
            if ctx.input.jump_just_pressed && ctx.ability.can_air_jump {
                ctx.transition(Transition::AIR_JUMP);
                return;
            }
            if ctx.input.dash_just_pressed && ctx.ability.air_dash_available() {
                ctx.transition(Transition::AirDash);
                return;
            }
            if ctx.input.attack_just_pressed {
                ctx.transition(Transition::AirAttack);
                return;
            }
            if ctx.should_wall_slide() && ctx.ability.past_wall_jump_grace(now) {
                ctx.transition(Transition::WallSlide);
                return;
            }
            ctx.air_control(ctx.tuning.air_speed);
        }

        ctx.apply_jump_cutoff();

        let ground_check = ctx.ability.wall_jump_ground_check_until.is_none_or(|until| now > until);
        if ground_check && ctx.grounded() {
            ctx.ability.clear_air_abilities();
            ctx.transition(Transition::IDLE);
        }
    }

    fn exit(&mut self, ctx: &mut StepContext, _next: &Transition) {
        ctx.ability.jump_being_held = false;
    }
}
