//! Movement domain: the locomotion state machine.
//!
//! One state is active at a time. States request transitions through the
//! [`StepContext`]; the machine runs `exit` on the old state, then builds a
//! fresh instance of the target and runs its `enter`. Requests made while
//! entering chain into further transitions within the same step.

use std::fmt;

use bevy::prelude::*;

use super::context::StepContext;
use super::states;
use super::timers::{StateInstanceId, TimerAction};

/// Upper bound on transitions applied back to back without an `execute`.
pub const MAX_CHAINED_TRANSITIONS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateName {
    Idle,
    Run,
    Jump,
    AirAttack,
    WallSlide,
    WallJump,
    GroundDash,
    AirDash,
    Crouch,
}

impl StateName {
    pub fn label(self) -> &'static str {
        match self {
            StateName::Idle => "idle",
            StateName::Run => "run",
            StateName::Jump => "jump",
            StateName::AirAttack => "air_attack",
            StateName::WallSlide => "wall_slide",
            StateName::WallJump => "wall_jump",
            StateName::GroundDash => "ground_dash",
            StateName::AirDash => "air_dash",
            StateName::Crouch => "crouch",
        }
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why the crouch state was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrouchEntry {
    FromIdle,
    FromRun,
    IdleForcedByCeiling,
    RunForcedByCeiling,
    JumpLandForced,
    DashLandForced,
    DashEnd,
}

impl CrouchEntry {
    /// Entries that go straight to crouch-idle or crouch-walk. A run that
    /// hits a low ceiling still slides.
    pub fn skips_slide(self) -> bool {
        matches!(
            self,
            CrouchEntry::IdleForcedByCeiling
                | CrouchEntry::JumpLandForced
                | CrouchEntry::DashLandForced
                | CrouchEntry::DashEnd
        )
    }
}

/// A transition target together with its entry parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Idle { from_respawn: bool },
    Run,
    Jump { is_actual_jump: bool, is_air_jump: bool },
    AirAttack,
    WallSlide,
    WallJump,
    GroundDash { from_crouch: bool },
    AirDash,
    Crouch { entry: CrouchEntry, initial_velocity_x: f32 },
}

impl Transition {
    pub const IDLE: Transition = Transition::Idle { from_respawn: false };
    /// Jump state entered without jumping: walking off ledges, ending dashes.
    pub const FALL: Transition = Transition::Jump {
        is_actual_jump: false,
        is_air_jump: false,
    };
    pub const GROUND_JUMP: Transition = Transition::Jump {
        is_actual_jump: true,
        is_air_jump: false,
    };
    pub const AIR_JUMP: Transition = Transition::Jump {
        is_actual_jump: true,
        is_air_jump: true,
    };

    pub fn crouch(entry: CrouchEntry) -> Transition {
        Transition::Crouch {
            entry,
            initial_velocity_x: 0.0,
        }
    }

    pub fn state(&self) -> StateName {
        match self {
            Transition::Idle { .. } => StateName::Idle,
            Transition::Run => StateName::Run,
            Transition::Jump { .. } => StateName::Jump,
            Transition::AirAttack => StateName::AirAttack,
            Transition::WallSlide => StateName::WallSlide,
            Transition::WallJump => StateName::WallJump,
            Transition::GroundDash { .. } => StateName::GroundDash,
            Transition::AirDash => StateName::AirDash,
            Transition::Crouch { .. } => StateName::Crouch,
        }
    }
}

pub trait LocomotionState: fmt::Debug + Send + Sync {
    fn name(&self) -> StateName;

    fn enter(&mut self, _ctx: &mut StepContext, _transition: &Transition) {}

    fn execute(&mut self, ctx: &mut StepContext);

    /// `next` is the transition being applied; a request made here replaces it.
    fn exit(&mut self, _ctx: &mut StepContext, _next: &Transition) {}

    /// A timer scheduled by this instance fired.
    fn on_timer(&mut self, _ctx: &mut StepContext, _action: TimerAction) {}
}

fn instantiate(name: StateName) -> Box<dyn LocomotionState> {
    match name {
        StateName::Idle => Box::new(states::Idle),
        StateName::Run => Box::new(states::Run),
        StateName::Jump => Box::new(states::Jump),
        StateName::AirAttack => Box::new(states::AirAttack::default()),
        StateName::WallSlide => Box::new(states::WallSlide::default()),
        StateName::WallJump => Box::new(states::WallJump),
        StateName::GroundDash => Box::new(states::GroundDash::default()),
        StateName::AirDash => Box::new(states::AirDash::default()),
        StateName::Crouch => Box::new(states::Crouch::default()),
    }
}

#[derive(Debug)]
pub struct StateMachine {
    current: Box<dyn LocomotionState>,
    instance: StateInstanceId,
    previous: Option<StateName>,
    next_instance: u64,
    started: bool,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self {
            current: instantiate(StateName::Idle),
            instance: StateInstanceId(1),
            previous: None,
            next_instance: 1,
            started: false,
        }
    }
}

impl StateMachine {
    pub fn current(&self) -> StateName {
        self.current.name()
    }

    pub fn previous(&self) -> Option<StateName> {
        self.previous
    }

    pub fn instance(&self) -> StateInstanceId {
        self.instance
    }

    /// Runs the initial state's `enter` the first time the machine is used.
    pub fn start(&mut self, ctx: &mut StepContext) {
        if self.started {
            return;
        }
        self.started = true;
        ctx.set_active_instance(self.instance);
        self.current.enter(ctx, &Transition::IDLE);
        self.resolve(ctx);
    }

    /// One simulation step: pending transitions, `execute`, and whatever
    /// `execute` requested.
    pub fn step(&mut self, ctx: &mut StepContext) {
        self.start(ctx);
        self.resolve(ctx);
        ctx.set_active_instance(self.instance);
        self.current.execute(ctx);
        self.resolve(ctx);
    }

    /// Delivers a state-owned timer. Timers whose owner is no longer the
    /// active instance are dropped.
    pub fn dispatch_timer(&mut self, ctx: &mut StepContext, owner: StateInstanceId, action: TimerAction) {
        if owner != self.instance {
            debug!(
                "Locomotion: discarding stale {:?} timer (owner {:?}, active {:?} {:?})",
                action,
                owner,
                self.current.name(),
                self.instance
            );
            return;
        }
        ctx.set_active_instance(self.instance);
        self.current.on_timer(ctx, action);
        self.resolve(ctx);
    }

    /// Applies `transition` immediately, bypassing whatever the active state
    /// would do. `prepare` runs between the old state's exit and the new
    /// state's enter.
    pub fn force(
        &mut self,
        ctx: &mut StepContext,
        transition: Transition,
        prepare: impl FnOnce(&mut StepContext),
    ) {
        self.started = true;
        ctx.set_active_instance(self.instance);
        self.current.exit(ctx, &transition);
        ctx.take_transition();
        prepare(ctx);
        self.enter_new(ctx, transition);
        self.resolve(ctx);
    }

    fn resolve(&mut self, ctx: &mut StepContext) {
        let mut applied = 0;
        while let Some(next) = ctx.take_transition() {
            if applied == MAX_CHAINED_TRANSITIONS {
                warn!(
                    "Locomotion: dropped transition to {} after {} chained transitions from {}",
                    next.state(),
                    MAX_CHAINED_TRANSITIONS,
                    self.current.name()
                );
                break;
            }
            applied += 1;
            self.swap(ctx, next);
        }
    }

    fn swap(&mut self, ctx: &mut StepContext, next: Transition) {
        ctx.set_active_instance(self.instance);
        self.current.exit(ctx, &next);
        let next = ctx.take_transition().unwrap_or(next);
        self.enter_new(ctx, next);
    }

    fn enter_new(&mut self, ctx: &mut StepContext, transition: Transition) {
        let from = self.current.name();
        debug!("Locomotion: {} -> {} ({:?})", from, transition.state(), transition);
        self.previous = Some(from);
        self.next_instance += 1;
        self.instance = StateInstanceId(self.next_instance);
        self.current = instantiate(transition.state());
        ctx.set_active_instance(self.instance);
        self.current.enter(ctx, &transition);
    }
}
