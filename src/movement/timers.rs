//! Movement domain: cancellable one-shot timers owned by states or the player.

use std::time::Duration;

use bevy::prelude::*;

/// Identity of one activation of a locomotion state. A fresh id is issued on
/// every transition, including re-entering the same state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateInstanceId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOwner {
    /// Survives state changes; cleared only by respawn.
    Player,
    State(StateInstanceId),
}

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    DashCooldown,
    DashElapsed,
    DashSettled,
    AttackElapsed,
    HitboxArmed,
    CrouchSlideElapsed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub owner: TimerOwner,
    pub action: TimerAction,
}

#[derive(Debug)]
struct ScheduledTimer {
    handle: TimerHandle,
    owner: TimerOwner,
    action: TimerAction,
    timer: Timer,
}

#[derive(Debug, Default)]
pub struct ActionTimers {
    entries: Vec<ScheduledTimer>,
    next_handle: u64,
}

impl ActionTimers {
    pub fn schedule(&mut self, after_secs: f32, owner: TimerOwner, action: TimerAction) -> TimerHandle {
        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        self.entries.push(ScheduledTimer {
            handle,
            owner,
            action,
            timer: Timer::from_seconds(after_secs.max(0.0), TimerMode::Once),
        });
        handle
    }

    /// Cancelling an unknown or already-fired handle is a no-op.
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.entries.retain(|entry| entry.handle != handle);
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|entry| entry.handle == handle)
    }

    /// Elapsed fraction in [0, 1]. Fired or cancelled timers report 1.
    pub fn progress(&self, handle: TimerHandle) -> f32 {
        self.entries
            .iter()
            .find(|entry| entry.handle == handle)
            .map_or(1.0, |entry| entry.timer.fraction())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advances every timer and removes the ones that finished, returned in
    /// scheduling order.
    pub fn tick(&mut self, delta: Duration) -> Vec<FiredTimer> {
        let mut fired = Vec::new();
        self.entries.retain_mut(|entry| {
            entry.timer.tick(delta);
            if entry.timer.is_finished() {
                fired.push(FiredTimer {
                    handle: entry.handle,
                    owner: entry.owner,
                    action: entry.action,
                });
                false
            } else {
                true
            }
        });
        fired
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
