use crate::movement::components::HitboxProfile;
use crate::movement::context::StepContext;
use crate::movement::cues::{AnimationKey, ParticleEmitter, PlayerCue};
use crate::movement::fsm::{CrouchEntry, LocomotionState, StateName, Transition};
use crate::movement::timers::{TimerAction, TimerHandle};

#[derive(Debug)]
pub struct Crouch {
    entry: CrouchEntry,
    slide_complete: bool,
    slide_timer: Option<TimerHandle>,
}

impl Default for Crouch {
    fn default() -> Self {
        Self {
            entry: CrouchEntry::FromIdle,
            slide_complete: true,
            slide_timer: None,
        }
    }
}

impl Crouch {
    fn complete_slide(&mut self, ctx: &mut StepContext) {
        self.slide_complete = true;
        ctx.body.velocity.x = 0.0;
        ctx.body.drag_x = ctx.tuning.ground_drag;
    }

    fn play_crouch_pose(ctx: &mut StepContext) {
        if ctx.input.any_horizontal() {
            ctx.play(AnimationKey::CrouchWalk);
        } else {
            ctx.play(AnimationKey::Crouch);
        }
    }

    fn slides_from_run(&self) -> bool {
        matches!(self.entry, CrouchEntry::FromRun | CrouchEntry::RunForcedByCeiling)
    }
}

impl LocomotionState for Crouch {
    fn name(&self) -> StateName {
        StateName::Crouch
    }

    fn enter(&mut self, ctx: &mut StepContext, transition: &Transition) {
        let Transition::Crouch {
            entry,
            initial_velocity_x,
        } = *transition
        else {
            return;
        };
        self.entry = entry;

        ctx.ability.is_crouching = true;
        ctx.set_hitbox(HitboxProfile::Crouch);
        ctx.cue(PlayerCue::StopEmitter(ParticleEmitter::Run));
        ctx.cue(PlayerCue::StopEmitter(ParticleEmitter::Idle));
        if ctx.grounded() {
            ctx.ability.clear_air_abilities();
        }

        let tuning = ctx.tuning;
        if entry.skips_slide() {
            self.complete_slide(ctx);
            Self::play_crouch_pose(ctx);
        } else if self.slides_from_run() {
            self.slide_complete = false;
            ctx.play(AnimationKey::Slide);
            ctx.body.velocity.x = initial_velocity_x * tuning.run_to_crouch_slide_damping;
            ctx.body.drag_x = tuning.crouch_slide_drag;
        } else if tuning.crouch_slide_velocity_from_idle == 0.0 && tuning.crouch_slide_duration_from_idle == 0.0 {
            self.complete_slide(ctx);
            Self::play_crouch_pose(ctx);
        } else {
            self.slide_complete = false;
            ctx.play(AnimationKey::Crouch);
            ctx.body.velocity.x = tuning.crouch_slide_velocity_from_idle * ctx.ability.facing.sign();
            ctx.body.drag_x = tuning.ground_drag;
            self.slide_timer = Some(ctx.schedule(
                tuning.crouch_slide_duration_from_idle,
                TimerAction::CrouchSlideElapsed,
            ));
        }
    }

    fn on_timer(&mut self, ctx: &mut StepContext, action: TimerAction) {
        if action == TimerAction::CrouchSlideElapsed {
            self.slide_timer = None;
            self.complete_slide(ctx);
        }
    }

    fn execute(&mut self, ctx: &mut StepContext) {
        if ctx.drop_through_tap() {
            ctx.transition(Transition::FALL);
            return;
        }

        if !self.slide_complete
            && self.slides_from_run()
            && ctx.body.velocity.x.abs() < ctx.tuning.min_crouch_slide_speed
        {
            self.complete_slide(ctx);
        }

        // Uncrouch, jump and dash stay live while a slide is still running.
        let can_stand = ctx.can_stand_up();
        if !ctx.input.down && can_stand {
            if ctx.input.any_horizontal() {
                ctx.transition(Transition::Run);
            } else {
                ctx.transition(Transition::IDLE);
            }
            return;
        }

        if self.slide_complete {
            let direction = ctx.input.horizontal();
            if direction != 0.0 {
                ctx.body.velocity.x = direction * ctx.tuning.crouch_walk_speed;
                ctx.ability.set_facing(direction, true);
                ctx.play(AnimationKey::CrouchWalk);
            } else {
                ctx.body.velocity.x = 0.0;
                ctx.play(AnimationKey::Crouch);
            }
        } else if self.slides_from_run() {
            ctx.play(AnimationKey::Slide);
        } else {
            ctx.play(AnimationKey::Crouch);
        }

        if can_stand && ctx.try_ground_jump() {
            ctx.transition(Transition::GROUND_JUMP);
            return;
        }

        if ctx.input.dash_just_pressed && ctx.ability.can_dash {
            ctx.transition(Transition::GroundDash { from_crouch: true });
        }
    }

    fn exit(&mut self, ctx: &mut StepContext, next: &Transition) {
        ctx.ability.is_crouching = false;
        ctx.cancel(&mut self.slide_timer);
        if !matches!(next, Transition::GroundDash { from_crouch: true }) {
            ctx.set_hitbox(HitboxProfile::Normal);
        }
        ctx.body.drag_x = ctx.tuning.ground_drag;
    }
}
