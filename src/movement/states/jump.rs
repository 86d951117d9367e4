use crate::movement::components::HitboxProfile;
use crate::movement::context::StepContext;
use crate::movement::cues::{AnimationKey, PlayerCue};
use crate::movement::fsm::{CrouchEntry, LocomotionState, StateName, Transition};

/// Every airborne moment that is not a dash, slide or attack: real jumps,
/// air jumps and plain falls.
#[derive(Debug)]
pub struct Jump;

impl LocomotionState for Jump {
    fn name(&self) -> StateName {
        StateName::Jump
    }

    fn enter(&mut self, ctx: &mut StepContext, transition: &Transition) {
        ctx.set_hitbox(HitboxProfile::Normal);
        ctx.ability.is_crouching = false;
        ctx.play(AnimationKey::Jump);
        ctx.body.drag_x = 0.0;

        let Transition::Jump {
            is_actual_jump,
            is_air_jump,
        } = *transition
        else {
            return;
        };

        if is_actual_jump {
            ctx.body.velocity.y = ctx.tuning.jump_velocity;
            ctx.ability.jump_being_held = true;
            ctx.ability.jump_cutoff = false;
            if is_air_jump {
                ctx.ability.has_air_dashed = false;
                ctx.ability.can_air_jump = false;
                ctx.cue(PlayerCue::JumpBurst);
            }
        }
    }

    fn execute(&mut self, ctx: &mut StepContext) {
        if ctx.input.jump_just_pressed {
            if ctx.ability.can_air_jump {
                ctx.transition(Transition::AIR_JUMP);
                return;
            }
            ctx.ability.buffer_jump(ctx.now);
        }

        ctx.apply_jump_cutoff();

        if ctx.input.dash_just_pressed && ctx.ability.air_dash_available() {
            ctx.transition(Transition::AirDash);
            return;
        }

        if !ctx.ability.is_dashing && ctx.should_wall_slide() && ctx.ability.past_wall_jump_grace(ctx.now) {
            ctx.transition(Transition::WallSlide);
            return;
        }

        ctx.air_control(ctx.tuning.air_speed);

        if ctx.input.attack_just_pressed {
            ctx.transition(Transition::AirAttack);
            return;
        }

        if ctx.grounded() {
            ctx.ability.clear_air_abilities();
            if ctx.jump_buffer_valid() {
                ctx.ability.consume_jump();
                ctx.cue(PlayerCue::JumpBurst);
                ctx.transition(Transition::GROUND_JUMP);
            } else if !ctx.can_stand_up() {
                ctx.transition(Transition::crouch(CrouchEntry::JumpLandForced));
            } else if ctx.input.any_horizontal() {
                ctx.transition(Transition::Run);
            } else {
                ctx.transition(Transition::IDLE);
            }
        }
    }

    fn exit(&mut self, ctx: &mut StepContext, _next: &Transition) {
        ctx.ability.jump_being_held = false;
        ctx.body.velocity.x = 0.0;
    }
}
