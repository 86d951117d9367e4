use crate::movement::components::HitboxProfile;
use crate::movement::context::StepContext;
use crate::movement::cues::{AnimationKey, ParticleEmitter, PlayerCue};
use crate::movement::fsm::{CrouchEntry, LocomotionState, StateName, Transition};

#[derive(Debug)]
pub struct Idle;

impl LocomotionState for Idle {
    fn name(&self) -> StateName {
        StateName::Idle
    }

    fn enter(&mut self, ctx: &mut StepContext, _transition: &Transition) {
        ctx.set_hitbox(HitboxProfile::Normal);
        ctx.ability.is_crouching = false;
        ctx.play(AnimationKey::Idle);
        ctx.body.velocity.x = 0.0;
        ctx.body.drag_x = ctx.tuning.ground_drag;
        ctx.refresh_grounded();
        ctx.cue(PlayerCue::StopEmitter(ParticleEmitter::Run));
        ctx.cue(PlayerCue::StartEmitter(ParticleEmitter::Idle));
    }

    fn execute(&mut self, ctx: &mut StepContext) {
        if ctx.drop_through_tap() {
            ctx.transition(Transition::FALL);
            return;
        }

        if !ctx.ability.is_crouching && !ctx.input.down && !ctx.can_stand_up() {
            ctx.transition(Transition::crouch(CrouchEntry::IdleForcedByCeiling));
            return;
        }

        ctx.refresh_grounded();

        if ctx.input.dash_just_pressed && ctx.ability.can_dash {
            if ctx.grounded() {
                ctx.transition(Transition::GroundDash { from_crouch: false });
            }
            return;
        }

        if ctx.try_ground_jump() {
            ctx.transition(Transition::GROUND_JUMP);
            return;
        }

        if ctx.input.down {
            ctx.transition(Transition::crouch(CrouchEntry::FromIdle));
            return;
        }

        if ctx.grounded() {
            if ctx.input.any_horizontal() {
                ctx.transition(Transition::Run);
            }
        } else if !ctx.coyote_available() {
            ctx.transition(Transition::FALL);
        }
    }

    fn exit(&mut self, ctx: &mut StepContext, _next: &Transition) {
        ctx.cue(PlayerCue::StopEmitter(ParticleEmitter::Idle));
    }
}
