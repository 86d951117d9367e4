use crate::movement::components::WallSide;
use crate::movement::context::StepContext;
use crate::movement::cues::AnimationKey;
use crate::movement::fsm::{LocomotionState, StateName, Transition};

#[derive(Debug, Default)]
pub struct WallSlide {
    side: Option<WallSide>,
}

/// Side of the wall being touched. Falls back to the remembered side while
/// the player still presses toward it and is not touching the other wall.
fn resolve_wall_side(ctx: &StepContext) -> Option<WallSide> {
    let blocked = ctx.body.blocked;
    if blocked.left {
        return Some(WallSide::Left);
    }
    if blocked.right {
        return Some(WallSide::Right);
    }
    match ctx.ability.last_wall_side {
        Some(WallSide::Left) if ctx.input.left && !blocked.right => Some(WallSide::Left),
        Some(WallSide::Right) if ctx.input.right && !blocked.left => Some(WallSide::Right),
        _ => None,
    }
}

fn pressing_toward(ctx: &StepContext, side: WallSide) -> bool {
    match side {
        WallSide::Left => ctx.input.left,
        WallSide::Right => ctx.input.right,
    }
}

fn touching(ctx: &StepContext, side: WallSide) -> bool {
    match side {
        WallSide::Left => ctx.body.blocked.left,
        WallSide::Right => ctx.body.blocked.right,
    }
}

impl LocomotionState for WallSlide {
    fn name(&self) -> StateName {
        StateName::WallSlide
    }

    fn enter(&mut self, ctx: &mut StepContext, _transition: &Transition) {
        ctx.body.velocity.y = 0.0;

        let Some(side) = resolve_wall_side(ctx) else {
            ctx.transition(Transition::FALL);
            return;
        };
        self.side = Some(side);

        ctx.play(AnimationKey::WallSlide);
        ctx.ability.last_wall_side = Some(side);
        ctx.ability.set_facing(side.sign(), true);
        ctx.body.velocity.x = ctx.tuning.wall_nudge_speed * side.sign();
        ctx.ability.wall_contact_lost_until = None;
        ctx.ability.is_sliding = true;
        ctx.ability.can_wall_jump = true;
        ctx.ability.has_air_dashed = false;
    }

    fn execute(&mut self, ctx: &mut StepContext) {
        let Some(side) = self.side else {
            ctx.transition(Transition::FALL);
            return;
        };

        if ctx.input.jump_just_pressed {
            ctx.transition(Transition::WallJump);
            return;
        }

        if ctx.input.dash_just_pressed && ctx.ability.air_dash_available() {
            ctx.ability.dash_away_direction = Some(side.away());
            ctx.transition(Transition::AirDash);
            return;
        }

        let pressing_into = pressing_toward(ctx, side);
        let pressing_away = match side {
            WallSide::Left => ctx.input.right,
            WallSide::Right => ctx.input.left,
        };
        if pressing_away && !pressing_into {
            ctx.ability.wall_jump_grace_until = Some(ctx.now + ctx.tuning.explicit_detach_grace);
            ctx.body.velocity.x = 0.0;
            ctx.transition(Transition::FALL);
            return;
        }

        ctx.body.velocity.y = -ctx.tuning.wall_slide_speed;

        if pressing_into {
            ctx.body.velocity.x = ctx.tuning.wall_stick_speed * side.sign();
            if touching(ctx, side) {
                ctx.ability.wall_contact_lost_until = None;
            } else {
                match ctx.ability.wall_contact_lost_until {
                    None => {
                        ctx.ability.wall_contact_lost_until = Some(ctx.now + ctx.tuning.wall_contact_grace);
                    }
                    Some(until) if ctx.now > until => {
                        ctx.transition(Transition::FALL);
                        return;
                    }
                    Some(_) => {}
                }
            }
        } else {
            ctx.body.velocity.x = 0.0;
            ctx.transition(Transition::FALL);
            return;
        }

        if ctx.grounded() {
            ctx.transition(Transition::IDLE);
        }
    }

    fn exit(&mut self, ctx: &mut StepContext, next: &Transition) {
        ctx.ability.is_sliding = false;
        ctx.ability.can_wall_jump = false;
        ctx.ability.wall_contact_lost_until = None;

        if matches!(next, Transition::WallJump) {
            ctx.ability.wall_jump_grace_until = None;
            return;
        }

        let reattach = ctx.now + ctx.tuning.wall_reattach_grace;
        let keep_detach = ctx
            .ability
            .wall_jump_grace_until
            .is_some_and(|until| until > reattach);
        if !keep_detach {
            ctx.ability.wall_jump_grace_until = Some(reattach);
        }
    }
}
