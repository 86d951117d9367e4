//! Movement domain: the mutable view a locomotion state works through for one
//! step, plus the small rules several states share.

use super::ability::AbilityState;
use super::body::CharacterBody;
use super::components::{AttackHitbox, HitboxProfile};
use super::cues::{AnimationKey, CueBuffer, PlayerCue};
use super::fsm::Transition;
use super::geometry::{self, LevelGeometry};
use super::resources::{MovementInput, MovementTuning};
use super::timers::{ActionTimers, StateInstanceId, TimerAction, TimerHandle, TimerOwner};

/// Read-only inputs for one simulation step.
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    pub now: f32,
    pub input: &'a MovementInput,
    pub tuning: &'a MovementTuning,
    pub level: &'a dyn LevelGeometry,
}

pub struct StepContext<'a> {
    pub now: f32,
    pub input: &'a MovementInput,
    pub tuning: &'a MovementTuning,
    pub level: &'a dyn LevelGeometry,
    pub body: &'a mut CharacterBody,
    pub ability: &'a mut AbilityState,
    pub attack: &'a mut AttackHitbox,
    pub timers: &'a mut ActionTimers,
    cues: &'a mut CueBuffer,
    active_instance: StateInstanceId,
    requested: Option<Transition>,
}

impl<'a> StepContext<'a> {
    pub fn new(
        frame: &Frame<'a>,
        body: &'a mut CharacterBody,
        ability: &'a mut AbilityState,
        attack: &'a mut AttackHitbox,
        timers: &'a mut ActionTimers,
        cues: &'a mut CueBuffer,
    ) -> Self {
        Self {
            now: frame.now,
            input: frame.input,
            tuning: frame.tuning,
            level: frame.level,
            body,
            ability,
            attack,
            timers,
            cues,
            active_instance: StateInstanceId(0),
            requested: None,
        }
    }

    // -------------------------------------------------------------------------
    // Transitions and timers

    /// Requests a state change. States return right after calling this; the
    /// machine applies it once the current hook finishes. A request made from
    /// `exit` replaces the one being applied.
    pub fn transition(&mut self, next: Transition) {
        self.requested = Some(next);
    }

    pub fn pending_transition(&self) -> Option<&Transition> {
        self.requested.as_ref()
    }

    pub(crate) fn take_transition(&mut self) -> Option<Transition> {
        self.requested.take()
    }

    pub(crate) fn set_active_instance(&mut self, id: StateInstanceId) {
        self.active_instance = id;
    }

    pub fn active_instance(&self) -> StateInstanceId {
        self.active_instance
    }

    /// Schedules a timer owned by the state instance currently running.
    pub fn schedule(&mut self, after_secs: f32, action: TimerAction) -> TimerHandle {
        let owner = TimerOwner::State(self.active_instance);
        self.timers.schedule(after_secs, owner, action)
    }

    pub fn schedule_for_player(&mut self, after_secs: f32, action: TimerAction) -> TimerHandle {
        self.timers.schedule(after_secs, TimerOwner::Player, action)
    }

    pub fn cancel(&mut self, handle: &mut Option<TimerHandle>) {
        if let Some(handle) = handle.take() {
            self.timers.cancel(handle);
        }
    }

    // -------------------------------------------------------------------------
    // Cues

    pub fn play(&mut self, animation: AnimationKey) {
        self.cues.push(PlayerCue::Animation(animation));
    }

    pub fn cue(&mut self, cue: PlayerCue) {
        self.cues.push(cue);
    }

    pub fn set_attack_hitbox(&mut self, enabled: bool) {
        if self.attack.enabled != enabled {
            self.attack.enabled = enabled;
            self.cues.push(PlayerCue::AttackHitbox(enabled));
        }
    }

    // -------------------------------------------------------------------------
    // Queries

    pub fn grounded(&self) -> bool {
        self.body.blocked.down
    }

    pub fn set_hitbox(&mut self, profile: HitboxProfile) {
        self.body.hitbox = profile;
    }

    pub fn can_stand_up(&self) -> bool {
        geometry::can_stand_up(self.body, self.tuning, self.level)
    }

    pub fn pressing_into_wall(&self) -> bool {
        (self.body.blocked.left && self.input.left) || (self.body.blocked.right && self.input.right)
    }

    /// Airborne, falling, touching a wall and pushing into it. The level's
    /// outer boundary never counts as a wall.
    pub fn should_wall_slide(&self) -> bool {
        let blocked = self.body.blocked;
        if blocked.down || self.body.velocity.y >= 0.0 || !self.pressing_into_wall() {
            return false;
        }
        if let Some((min_x, max_x)) = self.level.horizontal_bounds() {
            let (left, right) = self.body.horizontal_extent(self.tuning);
            let epsilon = self.tuning.world_bound_epsilon;
            if blocked.left && left <= min_x + epsilon {
                return false;
            }
            if blocked.right && right >= max_x - epsilon {
                return false;
            }
        }
        true
    }

    pub fn coyote_available(&self) -> bool {
        self.ability.coyote_available(self.now, self.tuning)
    }

    pub fn jump_buffer_valid(&self) -> bool {
        self.ability.jump_buffer_valid(self.now, self.tuning)
    }

    // -------------------------------------------------------------------------
    // Shared rules

    /// Grounded Idle and Run stamp the ground time and drop any air
    /// abilities a refresh granted while standing.
    pub fn refresh_grounded(&mut self) {
        if self.grounded() {
            self.ability.refresh_grounded(self.now);
            self.ability.clear_air_abilities();
        }
    }

    /// Down + jump on the ground marks a drop-through attempt. The caller
    /// transitions to the fall state.
    pub fn drop_through_tap(&mut self) -> bool {
        if self.input.down && self.input.jump_just_pressed && self.grounded() {
            self.ability.is_attempting_drop_through = true;
            return true;
        }
        false
    }

    /// Handles a jump press from a grounded state: the press is buffered, and
    /// if the buffer is live while grounded or within coyote time, both are
    /// consumed and the caller should enter a real jump.
    pub fn try_ground_jump(&mut self) -> bool {
        if !self.input.jump_just_pressed {
            return false;
        }
        self.ability.buffer_jump(self.now);
        if self.jump_buffer_valid() && (self.grounded() || self.coyote_available()) {
            self.ability.consume_jump();
            self.ability.has_air_dashed = false;
            self.cue(PlayerCue::JumpBurst);
            return true;
        }
        false
    }

    pub fn air_control(&mut self, speed: f32) {
        let direction = self.input.horizontal();
        self.body.velocity.x = direction * speed;
        self.ability.set_facing(direction, false);
    }

    /// Shortens a rising jump once when the button is released early.
    pub fn apply_jump_cutoff(&mut self) {
        if self.ability.jump_being_held
            && !self.input.jump_held
            && !self.ability.jump_cutoff
            && self.body.velocity.y > 0.0
        {
            self.body.velocity.y *= self.tuning.jump_cut_multiplier;
            self.ability.jump_cutoff = true;
        }
        if self.input.jump_held {
            self.ability.jump_cutoff = false;
        }
    }
}
