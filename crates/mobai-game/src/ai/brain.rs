//! Brain ECS component: owns a mob's active state and drives the per-frame loop.

use std::time::Duration;

use bevy_ecs::prelude::*;

use super::mob::Mob;
use super::state::{MobState, StateKind, Transition};
use super::tuning::AiTuning;
use crate::level::Level;

/// Callbacks fired on every state transition edge (animation, audio, telemetry).
///
/// For callers that drive a [`Brain`] themselves. Mobs ticked by
/// `system_ai_tick` run with `()` and report transitions as
/// `GameEvent::StateChanged` instead.
pub trait StateHooks<M: ?Sized> {
    fn entered(&mut self, _state: StateKind, _mob: &mut M) {}

    fn exited(&mut self, _state: StateKind, _mob: &mut M) {}
}

impl<M: ?Sized> StateHooks<M> for () {}

/// The active state plus the states suspended beneath it.
///
/// A `Switch` suspends the current state and enters the new one; a `Pop`
/// discards the current state and resumes the most recently suspended one,
/// or a fresh search when nothing is suspended.
#[derive(Component, Debug, Default)]
pub struct Brain {
    active: MobState,
    /// Oldest first.
    history: Vec<MobState>,
    started: bool,
}

impl Brain {
    /// A brain that starts idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// A brain starting in `state` instead of idle.
    pub fn with_state(state: MobState) -> Self {
        Self {
            active: state,
            history: Vec::new(),
            started: false,
        }
    }

    pub fn active(&self) -> &MobState {
        &self.active
    }

    pub fn kind(&self) -> StateKind {
        self.active.kind()
    }

    pub fn history(&self) -> &[MobState] {
        &self.history
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Enter the initial state. Called once by whoever spawns the mob;
    /// later calls do nothing.
    pub fn start<M, H>(&mut self, mob: &mut M, hooks: &mut H)
    where
        M: Mob + ?Sized,
        H: StateHooks<M> + ?Sized,
    {
        if self.started {
            return;
        }
        self.started = true;
        self.active.enter(mob, hooks);
    }

    /// Run one frame: examine, resolve the transition, then update the
    /// state that is active afterwards.
    ///
    /// Returns `(from, to)` when the active state changed this frame.
    pub fn tick<M, L, H>(
        &mut self,
        mob: &mut M,
        delta: Duration,
        level: &L,
        tuning: &AiTuning,
        hooks: &mut H,
    ) -> Option<(StateKind, StateKind)>
    where
        M: Mob + ?Sized,
        L: Level + ?Sized,
        H: StateHooks<M> + ?Sized,
    {
        self.start(mob, hooks);
        let transition = self.active.examine_world(mob, level, tuning);
        let changed = self.apply(transition, mob, tuning, hooks);
        self.active.update(mob, delta, level, tuning);
        changed
    }

    fn apply<M, H>(
        &mut self,
        transition: Transition,
        mob: &mut M,
        tuning: &AiTuning,
        hooks: &mut H,
    ) -> Option<(StateKind, StateKind)>
    where
        M: Mob + ?Sized,
        H: StateHooks<M> + ?Sized,
    {
        let from = self.active.kind();
        match transition {
            Transition::Stay => return None,
            Transition::Switch(next) => {
                self.active.exit(mob, hooks);
                let previous = std::mem::replace(&mut self.active, next);
                self.suspend(previous, tuning.max_history);
            }
            Transition::Pop => {
                self.active.exit(mob, hooks);
                self.active = match self.history.pop() {
                    Some(resumed) => resumed,
                    None => MobState::search_for(mob),
                };
            }
        }
        self.active.enter(mob, hooks);
        Some((from, self.active.kind()))
    }

    /// Idle is never resumed: it only ever leads straight back to a search.
    fn suspend(&mut self, state: MobState, max_history: usize) {
        if max_history == 0 || matches!(state, MobState::Idle) {
            return;
        }
        self.history.push(state);
        if self.history.len() > max_history {
            let excess = self.history.len() - max_history;
            self.history.drain(..excess);
        }
    }
}
