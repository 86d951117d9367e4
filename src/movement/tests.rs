//! Movement domain: tests for the locomotion state machine, timers and
//! one-way platform rules.

use bevy::prelude::{Rect, Vec2};
use std::time::Duration;

use super::ability::AbilityState;
use super::body::CharacterBody;
use super::components::{AttackHitbox, Facing, HitboxProfile};
use super::context::{Frame, StepContext};
use super::controller::PlayerController;
use super::cues::{AnimationKey, CueBuffer, PlayerCue};
use super::fsm::{CrouchEntry, StateMachine, StateName, Transition};
use super::geometry::{LevelGeometry, OpenLevel, can_stand_up, headroom_region};
use super::resources::{HeldButtons, MovementInput, MovementTuning};
use super::semisolid::{ContactResolution, SemiSolidContact, resolve_semi_solid_contact};
use super::timers::{ActionTimers, StateInstanceId, TimerAction, TimerOwner};

const DT: f32 = 1.0 / 60.0;

const NONE: HeldButtons = HeldButtons {
    left: false,
    right: false,
    up: false,
    down: false,
    jump: false,
    dash: false,
    attack: false,
};
const LEFT: HeldButtons = HeldButtons { left: true, ..NONE };
const RIGHT: HeldButtons = HeldButtons { right: true, ..NONE };
const DOWN: HeldButtons = HeldButtons { down: true, ..NONE };
const JUMP: HeldButtons = HeldButtons { jump: true, ..NONE };
const DASH: HeldButtons = HeldButtons { dash: true, ..NONE };
const ATTACK: HeldButtons = HeldButtons { attack: true, ..NONE };

#[derive(Default)]
struct TestLevel {
    solids: Vec<Rect>,
    bounds: Option<(f32, f32)>,
}

impl LevelGeometry for TestLevel {
    fn is_solid_in(&self, region: Rect) -> bool {
        self.solids.iter().any(|solid| !solid.intersect(region).is_empty())
    }

    fn horizontal_bounds(&self) -> Option<(f32, f32)> {
        self.bounds
    }
}

/// Drives a controller with scripted input. Contacts are set by hand; no
/// physics runs unless `apply_drag` is on.
struct Harness {
    controller: PlayerController,
    tuning: MovementTuning,
    input: MovementInput,
    level: TestLevel,
    now: f32,
    apply_drag: bool,
    cues: Vec<PlayerCue>,
}

impl Harness {
    fn grounded() -> Self {
        let tuning = MovementTuning::default();
        let mut controller = PlayerController::new(Vec2::ZERO, &tuning);
        controller.body.blocked.down = true;
        let mut harness = Self {
            controller,
            tuning,
            input: MovementInput::default(),
            level: TestLevel::default(),
            now: 1.0,
            apply_drag: false,
            cues: Vec::new(),
        };
        harness.step(NONE);
        harness
    }

    /// Falling in the Jump state, nothing underfoot.
    fn airborne() -> Self {
        let tuning = MovementTuning::default();
        let controller = PlayerController::new(Vec2::new(0.0, 200.0), &tuning);
        let mut harness = Self {
            controller,
            tuning,
            input: MovementInput::default(),
            level: TestLevel::default(),
            now: 1.0,
            apply_drag: false,
            cues: Vec::new(),
        };
        harness.step(NONE);
        assert_eq!(harness.state(), StateName::Jump);
        harness
    }

    fn step(&mut self, held: HeldButtons) {
        self.now += DT;
        self.input.advance(held);
        let frame = Frame {
            now: self.now,
            input: &self.input,
            tuning: &self.tuning,
            level: &self.level,
        };
        self.controller.step(&frame, Duration::from_secs_f32(DT));
        self.cues = self.controller.drain_cues().collect();
        if self.apply_drag {
            self.controller.body.integrate_forces(DT, 0.0);
        }
    }

    fn run(&mut self, held: HeldButtons, steps: usize) {
        for _ in 0..steps {
            self.step(held);
        }
    }

    fn respawn(&mut self, position: Vec2) {
        let frame = Frame {
            now: self.now,
            input: &self.input,
            tuning: &self.tuning,
            level: &self.level,
        };
        self.controller.respawn(&frame, position);
    }

    fn pogo(&mut self) -> bool {
        let frame = Frame {
            now: self.now,
            input: &self.input,
            tuning: &self.tuning,
            level: &self.level,
        };
        self.controller.pogo_bounce(&frame)
    }

    fn state(&self) -> StateName {
        self.controller.state()
    }

    fn ability(&self) -> &AbilityState {
        &self.controller.ability
    }

    fn body(&mut self) -> &mut CharacterBody {
        &mut self.controller.body
    }

    /// Falling against the left wall while pressing into it.
    fn wall_sliding_left() -> Self {
        let mut harness = Self::airborne();
        harness.body().blocked.left = true;
        harness.body().velocity.y = -100.0;
        harness.step(LEFT);
        assert_eq!(harness.state(), StateName::WallSlide);
        harness
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

// -----------------------------------------------------------------------------
// Input tests
// -----------------------------------------------------------------------------

#[test]
fn test_input_edges_fire_once_per_press() {
    let mut input = MovementInput::default();

    input.advance(JUMP);
    assert!(input.jump_just_pressed);
    assert!(input.jump_held);

    input.advance(JUMP);
    assert!(!input.jump_just_pressed);
    assert!(input.jump_held);

    input.advance(NONE);
    input.advance(HeldButtons { jump: true, down: true, ..NONE });
    assert!(input.jump_just_pressed);
    assert!(input.down_just_pressed);
}

#[test]
fn test_input_left_wins_over_right() {
    let mut input = MovementInput::default();
    input.advance(HeldButtons { left: true, right: true, ..NONE });
    assert_eq!(input.horizontal(), -1.0);

    input.advance(RIGHT);
    assert_eq!(input.horizontal(), 1.0);

    input.advance(NONE);
    assert_eq!(input.horizontal(), 0.0);
}

// -----------------------------------------------------------------------------
// Timer service tests
// -----------------------------------------------------------------------------

#[test]
fn test_timer_fires_once_with_owner_and_action() {
    let mut timers = ActionTimers::default();
    let owner = TimerOwner::State(StateInstanceId(7));
    let handle = timers.schedule(0.25, owner, TimerAction::DashElapsed);

    assert!(timers.is_pending(handle));
    assert_eq!(timers.progress(handle), 0.0);

    assert!(timers.tick(Duration::from_millis(125)).is_empty());
    assert!((timers.progress(handle) - 0.5).abs() < 1e-3);

    let fired = timers.tick(Duration::from_millis(125));
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].handle, handle);
    assert_eq!(fired[0].owner, owner);
    assert_eq!(fired[0].action, TimerAction::DashElapsed);

    assert!(!timers.is_pending(handle));
    assert_eq!(timers.progress(handle), 1.0);
    assert!(timers.tick(Duration::from_millis(500)).is_empty());
}

#[test]
fn test_cancelled_timer_never_fires() {
    let mut timers = ActionTimers::default();
    let cancelled = timers.schedule(0.1, TimerOwner::Player, TimerAction::DashCooldown);
    let kept = timers.schedule(0.1, TimerOwner::Player, TimerAction::AttackElapsed);

    timers.cancel(cancelled);
    timers.cancel(cancelled);

    let fired = timers.tick(Duration::from_millis(150));
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].handle, kept);
}

#[test]
fn test_clear_drops_everything() {
    let mut timers = ActionTimers::default();
    timers.schedule(0.1, TimerOwner::Player, TimerAction::DashCooldown);
    timers.schedule(0.3, TimerOwner::State(StateInstanceId(1)), TimerAction::HitboxArmed);
    assert_eq!(timers.len(), 2);

    timers.clear();
    assert!(timers.is_empty());
    assert!(timers.tick(Duration::from_secs(1)).is_empty());
}

// -----------------------------------------------------------------------------
// State machine core tests
// -----------------------------------------------------------------------------

#[test]
fn test_stale_state_timer_is_discarded() {
    let tuning = MovementTuning::default();
    let input = MovementInput::default();
    let level = OpenLevel;
    let frame = Frame {
        now: 1.0,
        input: &input,
        tuning: &tuning,
        level: &level,
    };
    let mut body = CharacterBody::new(Vec2::ZERO, &tuning);
    body.blocked.down = true;
    let mut ability = AbilityState::default();
    let mut attack = AttackHitbox::default();
    let mut timers = ActionTimers::default();
    let mut cues = CueBuffer::default();
    let mut machine = StateMachine::default();
    let mut ctx = StepContext::new(&frame, &mut body, &mut ability, &mut attack, &mut timers, &mut cues);

    machine.step(&mut ctx);
    assert_eq!(machine.current(), StateName::Idle);
    let idle_instance = machine.instance();

    ctx.transition(Transition::GroundDash { from_crouch: false });
    machine.step(&mut ctx);
    assert_eq!(machine.current(), StateName::GroundDash);
    assert_ne!(machine.instance(), idle_instance);

    // A settle callback from a superseded instance must not end the dash
    machine.dispatch_timer(&mut ctx, idle_instance, TimerAction::DashSettled);
    assert_eq!(machine.current(), StateName::GroundDash);
    assert!(ctx.ability.is_dashing);

    let active = machine.instance();
    machine.dispatch_timer(&mut ctx, active, TimerAction::DashSettled);
    assert_eq!(machine.current(), StateName::Idle);
    assert!(!ctx.ability.is_dashing);
}

#[test]
fn test_reentering_same_state_issues_new_instance() {
    let mut harness = Harness::airborne();
    harness.controller.refresh_from_crystal();
    let before = harness.controller.machine().instance();

    harness.step(JUMP);

    assert_eq!(harness.state(), StateName::Jump);
    assert_eq!(harness.controller.machine().previous(), Some(StateName::Jump));
    assert_ne!(harness.controller.machine().instance(), before);
}

#[test]
fn test_transition_requested_on_enter_chains_in_same_step() {
    let tuning = MovementTuning::default();
    let input = MovementInput::default();
    let level = OpenLevel;
    let frame = Frame {
        now: 1.0,
        input: &input,
        tuning: &tuning,
        level: &level,
    };
    let mut body = CharacterBody::new(Vec2::new(0.0, 100.0), &tuning);
    let mut ability = AbilityState::default();
    let mut attack = AttackHitbox::default();
    let mut timers = ActionTimers::default();
    let mut cues = CueBuffer::default();
    let mut machine = StateMachine::default();
    let mut ctx = StepContext::new(&frame, &mut body, &mut ability, &mut attack, &mut timers, &mut cues);

    // No wall and no remembered side: wall slide bails straight to a fall
    ctx.transition(Transition::WallSlide);
    machine.step(&mut ctx);

    assert_eq!(machine.current(), StateName::Jump);
    assert!(!ctx.ability.is_sliding);
}

#[test]
fn test_forced_exit_cancels_dash_callbacks() {
    let mut harness = Harness::grounded();

    harness.step(DASH);
    assert_eq!(harness.state(), StateName::GroundDash);
    assert!(harness.ability().is_dashing);

    harness.step(ATTACK);
    assert_eq!(harness.state(), StateName::AirAttack);
    assert!(!harness.ability().is_dashing);
    assert!(harness.controller.body.gravity_enabled);

    // Past the dash duration and settle delay, but inside the attack
    harness.run(NONE, 18);
    assert_eq!(harness.state(), StateName::AirAttack);
}

#[test]
fn test_dash_cooldown_outlives_dash_state() {
    let mut harness = Harness::grounded();

    harness.step(DASH);
    assert!(!harness.ability().can_dash);

    harness.run(NONE, 18);
    assert_eq!(harness.state(), StateName::Idle);
    assert!(!harness.ability().can_dash);

    harness.run(NONE, 10);
    assert!(harness.ability().can_dash);
}

// -----------------------------------------------------------------------------
// Jump tests
// -----------------------------------------------------------------------------

#[test]
fn test_ground_jump_applies_impulse() {
    let mut harness = Harness::grounded();
    harness.step(JUMP);

    assert_eq!(harness.state(), StateName::Jump);
    assert_eq!(harness.controller.body.velocity.y, harness.tuning.jump_velocity);
    assert!(harness.ability().jump_being_held);
    assert!(harness.cues.contains(&PlayerCue::JumpBurst));
}

#[test]
fn test_coyote_jump_inside_window() {
    let mut harness = Harness::grounded();
    harness.body().blocked.down = false;

    harness.run(NONE, 3);
    assert_eq!(harness.state(), StateName::Idle);

    harness.step(JUMP);
    assert_eq!(harness.state(), StateName::Jump);
    assert_eq!(harness.controller.body.velocity.y, harness.tuning.jump_velocity);
}

#[test]
fn test_no_coyote_jump_after_window() {
    let mut harness = Harness::grounded();
    harness.body().blocked.down = false;
    harness.body().velocity.y = -50.0;

    harness.run(NONE, 8);
    assert_eq!(harness.state(), StateName::Jump);

    harness.step(JUMP);
    assert_eq!(harness.state(), StateName::Jump);
    assert_eq!(harness.controller.body.velocity.y, -50.0);
}

#[test]
fn test_jump_buffered_before_landing_fires_on_landing() {
    let mut harness = Harness::airborne();
    harness.body().velocity.y = -300.0;

    harness.step(JUMP);
    assert!(harness.ability().jump_buffered_at.is_some());
    harness.run(NONE, 3);

    harness.body().blocked.down = true;
    harness.step(NONE);

    assert_eq!(harness.state(), StateName::Jump);
    assert_eq!(harness.controller.body.velocity.y, harness.tuning.jump_velocity);
    assert!(harness.ability().jump_buffered_at.is_none());
}

#[test]
fn test_stale_jump_buffer_lands_in_idle() {
    let mut harness = Harness::airborne();
    harness.body().velocity.y = -300.0;

    harness.step(JUMP);
    harness.run(NONE, 10);

    harness.body().blocked.down = true;
    harness.step(NONE);

    assert_eq!(harness.state(), StateName::Idle);
    assert!(harness.cues.contains(&PlayerCue::LandingBurst));
}

#[test]
fn test_jump_release_cuts_rise_once() {
    let mut harness = Harness::grounded();
    harness.step(JUMP);
    harness.body().blocked.down = false;

    harness.step(NONE);
    let cut = harness.tuning.jump_velocity * harness.tuning.jump_cut_multiplier;
    assert!(approx(harness.controller.body.velocity.y, cut));
    assert!(harness.ability().jump_cutoff);

    harness.step(NONE);
    assert!(approx(harness.controller.body.velocity.y, cut));
}

#[test]
fn test_second_jump_without_crystal_does_nothing() {
    let mut harness = Harness::grounded();
    harness.step(JUMP);
    harness.body().blocked.down = false;
    harness.step(NONE);
    let after_cut = harness.controller.body.velocity.y;

    harness.step(JUMP);

    assert_eq!(harness.state(), StateName::Jump);
    assert!(approx(harness.controller.body.velocity.y, after_cut));
    assert!(!harness.ability().can_air_jump);
}

#[test]
fn test_crystal_touched_on_ground_is_lost() {
    let mut harness = Harness::grounded();
    harness.controller.refresh_from_crystal();

    harness.step(NONE);
    assert!(!harness.ability().can_air_jump);

    harness.step(JUMP);
    harness.body().blocked.down = false;
    harness.step(NONE);
    let after_cut = harness.controller.body.velocity.y;

    harness.step(JUMP);
    assert_eq!(harness.state(), StateName::Jump);
    assert!(approx(harness.controller.body.velocity.y, after_cut));
}

#[test]
fn test_jump_buffer_window_is_exclusive() {
    let tuning = MovementTuning::default();
    let mut ability = AbilityState::default();
    ability.buffer_jump(0.0);

    assert!(ability.jump_buffer_valid(tuning.jump_buffer_time * 0.5, &tuning));
    assert!(!ability.jump_buffer_valid(tuning.jump_buffer_time, &tuning));
}

#[test]
fn test_crystal_grants_one_air_jump() {
    let mut harness = Harness::airborne();
    harness.controller.refresh_from_crystal();

    harness.step(JUMP);
    assert_eq!(harness.controller.body.velocity.y, harness.tuning.jump_velocity);
    assert!(!harness.ability().can_air_jump);
    assert!(harness.cues.contains(&PlayerCue::JumpBurst));

    harness.body().velocity.y = -100.0;
    harness.step(NONE);
    harness.step(JUMP);
    assert_eq!(harness.controller.body.velocity.y, -100.0);
}

// -----------------------------------------------------------------------------
// Dash tests
// -----------------------------------------------------------------------------

#[test]
fn test_air_dash_is_single_use_until_refreshed() {
    let mut harness = Harness::airborne();

    harness.step(DASH);
    assert_eq!(harness.state(), StateName::AirDash);
    assert_eq!(harness.controller.body.velocity.x, harness.tuning.air_dash_speed);
    assert!(!harness.controller.body.gravity_enabled);
    assert!(harness.ability().has_air_dashed);

    harness.run(NONE, 30);
    assert_eq!(harness.state(), StateName::Jump);
    assert!(harness.ability().can_dash);

    harness.step(DASH);
    assert_eq!(harness.state(), StateName::Jump);
    harness.step(JUMP);
    assert_eq!(harness.controller.body.velocity.y, 0.0);

    harness.controller.refresh_from_crystal();
    harness.step(NONE);
    harness.step(JUMP);
    assert_eq!(harness.controller.body.velocity.y, harness.tuning.jump_velocity);
    harness.step(DASH);
    assert_eq!(harness.state(), StateName::AirDash);
}

#[test]
fn test_ground_dash_uses_facing_without_input() {
    let mut harness = Harness::grounded();
    harness.run(LEFT, 2);
    harness.step(NONE);
    assert_eq!(harness.state(), StateName::Idle);
    assert_eq!(harness.ability().facing, Facing::Left);

    harness.step(DASH);
    assert_eq!(harness.state(), StateName::GroundDash);
    assert_eq!(harness.controller.body.velocity.x, -harness.tuning.dash_speed);
    assert_eq!(harness.controller.body.velocity.y, 0.0);
    assert_eq!(harness.controller.body.hitbox, HitboxProfile::Dash);
    assert_eq!(harness.controller.body.max_velocity.x, harness.tuning.dash_speed);

    harness.run(NONE, 20);
    assert_eq!(harness.state(), StateName::Idle);
    assert_eq!(harness.controller.body.hitbox, HitboxProfile::Normal);
    assert_eq!(harness.controller.body.max_velocity.x, harness.tuning.max_velocity_x);
}

#[test]
fn test_crouch_dash_keeps_crouch_hitbox() {
    let mut harness = Harness::grounded();
    harness.step(DOWN);
    assert_eq!(harness.state(), StateName::Crouch);

    harness.step(HeldButtons { down: true, dash: true, ..NONE });
    assert_eq!(harness.state(), StateName::GroundDash);
    assert_eq!(harness.controller.body.hitbox, HitboxProfile::Crouch);
    assert_eq!(harness.controller.animation(), Some(AnimationKey::Slide));

    harness.run(DOWN, 20);
    assert_eq!(harness.state(), StateName::Crouch);
    assert_eq!(harness.controller.body.hitbox, HitboxProfile::Crouch);
}

// -----------------------------------------------------------------------------
// Wall tests
// -----------------------------------------------------------------------------

#[test]
fn test_wall_slide_refreshes_air_dash() {
    let mut harness = Harness::airborne();
    harness.controller.ability.has_air_dashed = true;
    harness.body().blocked.left = true;
    harness.body().velocity.y = -100.0;

    harness.step(LEFT);

    assert_eq!(harness.state(), StateName::WallSlide);
    assert!(!harness.ability().has_air_dashed);
    assert!(harness.ability().is_sliding);
    assert_eq!(harness.ability().facing, Facing::Left);

    harness.step(LEFT);
    assert_eq!(harness.controller.body.velocity.y, -harness.tuning.wall_slide_speed);
}

#[test]
fn test_world_bound_is_not_a_wall() {
    let mut harness = Harness::airborne();
    let half_width = harness.tuning.normal_hitbox.width * 0.5;
    harness.level.bounds = Some((-100.0, 100.0));
    harness.body().position.x = -100.0 + half_width;
    harness.body().blocked.left = true;
    harness.body().velocity.y = -100.0;

    harness.step(LEFT);

    assert_eq!(harness.state(), StateName::Jump);
}

#[test]
fn test_wall_jump_launches_away_and_locks_control() {
    let mut harness = Harness::wall_sliding_left();

    harness.step(HeldButtons { jump: true, left: true, ..NONE });
    assert_eq!(harness.state(), StateName::WallJump);
    assert_eq!(harness.controller.body.velocity.x, harness.tuning.wall_jump_velocity_x);
    assert_eq!(harness.controller.body.velocity.y, harness.tuning.wall_jump_velocity_y);
    assert_eq!(harness.ability().facing, Facing::Right);
    assert!(harness.ability().wall_jump_grace_until.is_none());

    harness.body().blocked.left = false;
    harness.run(HeldButtons { jump: true, left: true, ..NONE }, 3);
    assert_eq!(harness.controller.body.velocity.x, harness.tuning.wall_jump_velocity_x);

    harness.run(HeldButtons { jump: true, left: true, ..NONE }, 10);
    assert_eq!(harness.controller.body.velocity.x, -harness.tuning.air_speed);
}

#[test]
fn test_wall_dash_goes_away_from_wall() {
    let mut harness = Harness::wall_sliding_left();

    harness.step(HeldButtons { dash: true, left: true, ..NONE });

    assert_eq!(harness.state(), StateName::AirDash);
    assert_eq!(harness.controller.body.velocity.x, harness.tuning.air_dash_speed);
    assert!(harness.ability().dash_away_direction.is_none());
}

#[test]
fn test_brief_wall_contact_loss_is_tolerated() {
    let mut harness = Harness::wall_sliding_left();

    harness.body().blocked.left = false;
    harness.run(LEFT, 3);
    assert_eq!(harness.state(), StateName::WallSlide);

    harness.run(LEFT, 4);
    assert_eq!(harness.state(), StateName::Jump);
}

#[test]
fn test_releasing_wall_exits_with_reattach_grace() {
    let mut harness = Harness::wall_sliding_left();

    harness.step(NONE);
    assert_eq!(harness.state(), StateName::Jump);
    let grace = harness.ability().wall_jump_grace_until.expect("grace armed");
    assert!(approx(grace, harness.now + harness.tuning.wall_reattach_grace));
}

#[test]
fn test_explicit_detach_keeps_longer_grace() {
    let mut harness = Harness::wall_sliding_left();

    harness.step(RIGHT);
    assert_eq!(harness.state(), StateName::Jump);
    let detach_until = harness.now + harness.tuning.explicit_detach_grace;
    let grace = harness.ability().wall_jump_grace_until.expect("grace armed");
    assert!(approx(grace, detach_until));

    // A jump press inside the window is not a wall jump and resets nothing
    harness.step(JUMP);
    assert_eq!(harness.state(), StateName::Jump);
    assert_eq!(harness.ability().wall_jump_grace_until, Some(grace));

    // Pushing back into the wall cannot re-attach until the grace passes
    harness.body().velocity.y = -100.0;
    harness.step(LEFT);
    assert_eq!(harness.state(), StateName::Jump);
    harness.run(LEFT, 10);
    assert_eq!(harness.state(), StateName::WallSlide);
}

// -----------------------------------------------------------------------------
// Crouch tests
// -----------------------------------------------------------------------------

#[test]
fn test_crouch_from_idle_without_slide() {
    let mut harness = Harness::grounded();
    harness.step(DOWN);

    assert_eq!(harness.state(), StateName::Crouch);
    assert_eq!(harness.controller.body.velocity.x, 0.0);
    assert_eq!(harness.controller.animation(), Some(AnimationKey::Crouch));
    assert_eq!(harness.controller.body.hitbox, HitboxProfile::Crouch);
    assert!(harness.ability().is_crouching);

    harness.step(NONE);
    assert_eq!(harness.state(), StateName::Idle);
    assert_eq!(harness.controller.body.hitbox, HitboxProfile::Normal);
}

#[test]
fn test_crouch_from_idle_with_configured_slide() {
    let mut harness = Harness::grounded();
    harness.tuning.crouch_slide_velocity_from_idle = 200.0;
    harness.tuning.crouch_slide_duration_from_idle = 0.1;

    harness.step(DOWN);
    assert_eq!(harness.controller.body.velocity.x, 200.0);
    assert_eq!(harness.controller.animation(), Some(AnimationKey::Crouch));
    assert_eq!(harness.controller.body.drag_x, harness.tuning.ground_drag);

    harness.run(DOWN, 10);
    assert_eq!(harness.controller.body.velocity.x, 0.0);
    assert_eq!(harness.controller.animation(), Some(AnimationKey::Crouch));
}

#[test]
fn test_run_into_crouch_slides_and_decays() {
    let mut harness = Harness::grounded();
    harness.apply_drag = true;
    harness.run(RIGHT, 2);
    assert_eq!(harness.state(), StateName::Run);

    harness.step(HeldButtons { down: true, right: true, ..NONE });
    assert_eq!(harness.state(), StateName::Crouch);
    assert_eq!(harness.controller.animation(), Some(AnimationKey::Slide));
    assert_eq!(harness.controller.body.drag_x, harness.tuning.crouch_slide_drag);
    assert!(harness.controller.body.velocity.x > harness.tuning.min_crouch_slide_speed);

    harness.run(DOWN, 40);
    assert_eq!(harness.state(), StateName::Crouch);
    assert_eq!(harness.controller.body.velocity.x, 0.0);
    assert_eq!(harness.controller.body.drag_x, harness.tuning.ground_drag);
}

#[test]
fn test_releasing_down_ends_run_slide_early() {
    let mut harness = Harness::grounded();
    harness.run(RIGHT, 2);
    harness.step(HeldButtons { down: true, right: true, ..NONE });
    assert_eq!(harness.controller.animation(), Some(AnimationKey::Slide));

    harness.step(RIGHT);

    assert_eq!(harness.state(), StateName::Run);
    assert_eq!(harness.controller.body.hitbox, HitboxProfile::Normal);
}

#[test]
fn test_dash_interrupts_run_slide() {
    let mut harness = Harness::grounded();
    harness.run(RIGHT, 2);
    harness.step(HeldButtons { down: true, right: true, ..NONE });
    assert!(harness.controller.body.velocity.x > harness.tuning.min_crouch_slide_speed);

    harness.step(HeldButtons { down: true, dash: true, ..NONE });

    assert_eq!(harness.state(), StateName::GroundDash);
    assert_eq!(harness.controller.body.hitbox, HitboxProfile::Crouch);
}

#[test]
fn test_run_slide_starts_from_damped_run_speed() {
    let mut harness = Harness::grounded();
    harness.run(RIGHT, 2);
    harness.step(HeldButtons { down: true, right: true, ..NONE });

    let expected = harness.tuning.run_speed * harness.tuning.run_to_crouch_slide_damping;
    assert!(approx(harness.controller.body.velocity.x, expected));
}

#[test]
fn test_low_ceiling_blocks_standing_up() {
    let mut harness = Harness::grounded();
    harness.level.solids.push(Rect::new(-50.0, 35.0, 50.0, 60.0));

    harness.step(NONE);
    assert_eq!(harness.state(), StateName::Crouch);

    harness.run(NONE, 5);
    assert_eq!(harness.state(), StateName::Crouch);

    harness.step(JUMP);
    assert_eq!(harness.state(), StateName::Crouch);

    harness.step(RIGHT);
    assert_eq!(harness.state(), StateName::Crouch);
    assert_eq!(harness.controller.body.velocity.x, harness.tuning.crouch_walk_speed);
    assert_eq!(harness.controller.animation(), Some(AnimationKey::CrouchWalk));

    harness.level.solids.clear();
    harness.step(RIGHT);
    assert_eq!(harness.state(), StateName::Run);
}

#[test]
fn test_landing_under_ceiling_forces_crouch() {
    let mut harness = Harness::airborne();
    harness.level.solids.push(Rect::new(-50.0, 240.0, 50.0, 260.0));
    harness.body().velocity.y = -200.0;

    harness.body().blocked.down = true;
    harness.step(NONE);

    assert_eq!(harness.state(), StateName::Crouch);
    assert_eq!(harness.controller.body.hitbox, HitboxProfile::Crouch);
}

#[test]
fn test_headroom_region_is_narrowed() {
    let tuning = MovementTuning::default();
    let body = CharacterBody::new(Vec2::new(10.0, 0.0), &tuning);
    let region = headroom_region(&body, &tuning).expect("normal is taller than crouch");

    assert!(approx(region.width(), tuning.normal_hitbox.width * 0.75));
    assert!(approx(region.min.y, tuning.crouch_hitbox.height));
    assert!(approx(region.max.y, tuning.normal_hitbox.height));

    // A wall beside the body is not a ceiling
    let level = TestLevel {
        solids: vec![Rect::new(23.0, 0.0, 40.0, 200.0)],
        bounds: None,
    };
    assert!(can_stand_up(&body, &tuning, &level));
}

// -----------------------------------------------------------------------------
// Drop-through and one-way platform tests
// -----------------------------------------------------------------------------

fn standing_on(top: f32) -> SemiSolidContact {
    SemiSolidContact {
        platform_top: top,
        feet_y: top,
        previous_feet_y: top,
        velocity_y: 0.0,
        blocked_down: true,
    }
}

#[test]
fn test_platform_supports_from_above() {
    let tuning = MovementTuning::default();
    let mut ability = AbilityState::default();

    let landing = SemiSolidContact {
        platform_top: 100.0,
        feet_y: 97.0,
        previous_feet_y: 105.0,
        velocity_y: -300.0,
        blocked_down: false,
    };
    assert_eq!(resolve_semi_solid_contact(&mut ability, landing, &tuning, 1.0), ContactResolution::Solid);
    assert_eq!(
        resolve_semi_solid_contact(&mut ability, standing_on(100.0), &tuning, 1.0),
        ContactResolution::Solid
    );
}

#[test]
fn test_platform_passes_from_below_and_side() {
    let tuning = MovementTuning::default();
    let mut ability = AbilityState::default();

    let rising = SemiSolidContact {
        platform_top: 100.0,
        feet_y: 98.0,
        previous_feet_y: 90.0,
        velocity_y: 400.0,
        blocked_down: false,
    };
    assert_eq!(resolve_semi_solid_contact(&mut ability, rising, &tuning, 1.0), ContactResolution::PassThrough);

    // Walking into the side just below the surface must not snap up
    let side = SemiSolidContact {
        platform_top: 100.0,
        feet_y: 96.0,
        previous_feet_y: 96.0,
        velocity_y: 0.0,
        blocked_down: true,
    };
    assert_eq!(resolve_semi_solid_contact(&mut ability, side, &tuning, 1.0), ContactResolution::PassThrough);
}

#[test]
fn test_holding_down_and_jump_passes_through() {
    let tuning = MovementTuning::default();
    let mut ability = AbilityState::default();
    ability.is_holding_fall_through_keys = true;

    for now in [1.0, 2.0, 5.0] {
        assert_eq!(
            resolve_semi_solid_contact(&mut ability, standing_on(100.0), &tuning, now),
            ContactResolution::PassThrough
        );
    }
}

#[test]
fn test_controller_tracks_fall_through_keys() {
    let mut harness = Harness::grounded();
    harness.step(HeldButtons { down: true, jump: true, ..NONE });

    assert!(harness.ability().is_holding_fall_through_keys);
    assert!(harness.ability().is_attempting_drop_through);
    assert_eq!(harness.state(), StateName::Jump);

    harness.step(DOWN);
    assert!(!harness.ability().is_holding_fall_through_keys);
    assert!(!harness.ability().is_attempting_drop_through);
}

#[test]
fn test_drop_tap_passes_for_fixed_duration() {
    let tuning = MovementTuning::default();
    let mut ability = AbilityState::default();
    ability.is_attempting_drop_through = true;
    ability.time_last_blocked_down = Some(1.0);

    let start = resolve_semi_solid_contact(&mut ability, standing_on(100.0), &tuning, 1.0);
    assert_eq!(
        start,
        ContactResolution::BeginDrop {
            nudge: tuning.drop_through_nudge
        }
    );
    assert!(ability.is_dropping_through);
    ability.is_attempting_drop_through = false;

    let during = resolve_semi_solid_contact(&mut ability, standing_on(100.0), &tuning, 1.1);
    assert_eq!(during, ContactResolution::PassThrough);

    let after = resolve_semi_solid_contact(&mut ability, standing_on(100.0), &tuning, 1.3);
    assert_eq!(after, ContactResolution::Solid);
    assert!(!ability.is_dropping_through);
}

#[test]
fn test_drop_tap_ignores_distant_platform() {
    let tuning = MovementTuning::default();
    let mut ability = AbilityState::default();
    ability.is_attempting_drop_through = true;

    let far_below = SemiSolidContact {
        platform_top: 40.0,
        feet_y: 100.0,
        previous_feet_y: 100.0,
        velocity_y: 0.0,
        blocked_down: true,
    };
    assert_eq!(resolve_semi_solid_contact(&mut ability, far_below, &tuning, 1.0), ContactResolution::Solid);
    assert!(!ability.is_dropping_through);
}

#[test]
fn test_drop_tap_tolerates_one_step_of_lag() {
    let tuning = MovementTuning::default();
    let mut ability = AbilityState::default();
    ability.is_attempting_drop_through = true;
    ability.time_last_blocked_down = Some(1.0);

    let mut contact = standing_on(100.0);
    contact.blocked_down = false;
    let result = resolve_semi_solid_contact(&mut ability, contact, &tuning, 1.0 + DT);
    assert!(matches!(result, ContactResolution::BeginDrop { .. }));
}

// -----------------------------------------------------------------------------
// Attack, pogo and respawn tests
// -----------------------------------------------------------------------------

#[test]
fn test_air_attack_arms_hitbox_after_delay() {
    let mut harness = Harness::airborne();
    harness.step(ATTACK);
    assert_eq!(harness.state(), StateName::AirAttack);
    assert!(!harness.controller.attack.enabled);
    assert_eq!(harness.controller.animation(), Some(AnimationKey::Pogoslash));

    harness.run(NONE, 8);
    assert!(harness.controller.attack.enabled);

    harness.run(NONE, 20);
    assert_eq!(harness.state(), StateName::Jump);
    assert!(!harness.controller.attack.enabled);
}

#[test]
fn test_air_attack_steers_without_turning() {
    let mut harness = Harness::airborne();
    harness.step(ATTACK);
    assert_eq!(harness.ability().facing, Facing::Right);

    harness.run(LEFT, 3);

    assert_eq!(harness.state(), StateName::AirAttack);
    assert_eq!(
        harness.controller.body.velocity.x,
        -harness.tuning.pogo_air_control_speed
    );
    assert_eq!(harness.ability().facing, Facing::Right);
}

#[test]
fn test_air_dash_interrupts_attack_and_disarms_hitbox() {
    let mut harness = Harness::airborne();
    harness.step(ATTACK);
    harness.run(NONE, 8);
    assert!(harness.controller.attack.enabled);

    harness.step(DASH);
    assert_eq!(harness.state(), StateName::AirDash);
    assert!(!harness.controller.attack.enabled);
    assert!(harness.cues.contains(&PlayerCue::AttackHitbox(false)));

    // The attack's own timer must not pull the dash back into a fall early
    harness.run(NONE, 10);
    assert_eq!(harness.state(), StateName::AirDash);
}

#[test]
fn test_pogo_bounce_requires_armed_attack() {
    let mut harness = Harness::airborne();
    assert!(!harness.pogo());

    harness.step(ATTACK);
    assert!(!harness.pogo());

    harness.run(NONE, 8);
    harness.controller.ability.has_air_dashed = true;
    assert!(harness.pogo());

    assert_eq!(harness.state(), StateName::Jump);
    assert_eq!(harness.controller.body.velocity.y, harness.tuning.pogo_velocity);
    assert!(!harness.controller.attack.enabled);
    assert!(!harness.ability().has_air_dashed);
}

#[test]
fn test_respawn_resets_everything() {
    let mut harness = Harness::airborne();
    harness.controller.refresh_from_crystal();
    harness.step(DASH);
    assert_eq!(harness.state(), StateName::AirDash);
    assert!(!harness.controller.timers().is_empty());

    harness.respawn(Vec2::new(300.0, 40.0));

    assert_eq!(harness.state(), StateName::Idle);
    assert!(harness.controller.timers().is_empty());
    assert_eq!(harness.controller.body.position, Vec2::new(300.0, 40.0));
    assert_eq!(harness.controller.body.velocity, Vec2::ZERO);
    assert!(harness.controller.body.gravity_enabled);
    assert_eq!(harness.controller.body.hitbox, HitboxProfile::Normal);
    assert!(harness.ability().can_dash);
    assert!(!harness.ability().has_air_dashed);
    assert!(!harness.ability().can_air_jump);
    assert!(!harness.ability().is_dashing);

    // Nothing scheduled before the respawn can fire into the new life
    harness.body().blocked.down = true;
    harness.run(NONE, 30);
    assert_eq!(harness.state(), StateName::Idle);
}

// -----------------------------------------------------------------------------
// Cue tests
// -----------------------------------------------------------------------------

#[test]
fn test_repeated_animation_requests_are_deduplicated() {
    let mut cues = CueBuffer::default();
    cues.push(PlayerCue::Animation(AnimationKey::Run));
    cues.push(PlayerCue::Animation(AnimationKey::Run));
    cues.push(PlayerCue::JumpBurst);
    cues.push(PlayerCue::Animation(AnimationKey::Jump));

    assert_eq!(
        cues.pending(),
        &[
            PlayerCue::Animation(AnimationKey::Run),
            PlayerCue::JumpBurst,
            PlayerCue::Animation(AnimationKey::Jump),
        ]
    );
    assert_eq!(cues.drain().count(), 3);
    assert_eq!(cues.current_animation(), Some(AnimationKey::Jump));
}

#[test]
fn test_crouch_entry_slide_rules() {
    assert!(CrouchEntry::IdleForcedByCeiling.skips_slide());
    assert!(CrouchEntry::DashEnd.skips_slide());
    assert!(!CrouchEntry::RunForcedByCeiling.skips_slide());
    assert!(!CrouchEntry::FromRun.skips_slide());
}
