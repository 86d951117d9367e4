use crate::movement::components::HitboxProfile;
use crate::movement::context::StepContext;
use crate::movement::cues::{AnimationKey, ParticleEmitter, PlayerCue};
use crate::movement::fsm::{CrouchEntry, LocomotionState, StateName, Transition};

#[derive(Debug)]
pub struct Run;

impl LocomotionState for Run {
    fn name(&self) -> StateName {
        StateName::Run
    }

    fn enter(&mut self, ctx: &mut StepContext, _transition: &Transition) {
        ctx.set_hitbox(HitboxProfile::Normal);
        ctx.ability.is_crouching = false;
        ctx.play(AnimationKey::Run);
        ctx.body.drag_x = ctx.tuning.ground_drag;
        ctx.refresh_grounded();
        ctx.cue(PlayerCue::StartEmitter(ParticleEmitter::Run));
    }

    fn execute(&mut self, ctx: &mut StepContext) {
        if ctx.drop_through_tap() {
            ctx.transition(Transition::FALL);
            return;
        }

        if !ctx.ability.is_crouching && !ctx.input.down && !ctx.can_stand_up() {
            ctx.transition(Transition::Crouch {
                entry: CrouchEntry::RunForcedByCeiling,
                initial_velocity_x: ctx.body.velocity.x,
            });
            return;
        }

        ctx.refresh_grounded();

        if ctx.input.dash_just_pressed && ctx.ability.can_dash {
            ctx.transition(Transition::GroundDash { from_crouch: false });
            return;
        }

        if ctx.try_ground_jump() {
            ctx.transition(Transition::GROUND_JUMP);
            return;
        }

        if ctx.input.down {
            ctx.transition(Transition::Crouch {
                entry: CrouchEntry::FromRun,
                initial_velocity_x: ctx.body.velocity.x,
            });
            return;
        }

        let direction = ctx.input.horizontal();
        if direction != 0.0 {
            ctx.body.velocity.x = direction * ctx.tuning.run_speed;
            ctx.ability.set_facing(direction, false);
        } else if ctx.grounded() {
            ctx.transition(Transition::IDLE);
            return;
        }

        if !ctx.grounded() {
            if ctx.should_wall_slide() && ctx.ability.past_wall_jump_grace(ctx.now) {
                ctx.transition(Transition::WallSlide);
            } else if !ctx.coyote_available() {
                ctx.transition(Transition::FALL);
            }
        }
    }

    fn exit(&mut self, ctx: &mut StepContext, _next: &Transition) {
        ctx.body.velocity.x = 0.0;
        ctx.cue(PlayerCue::StopEmitter(ParticleEmitter::Run));
    }
}
