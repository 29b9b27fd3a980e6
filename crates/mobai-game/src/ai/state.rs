//! Mob behavior states and their transition rules.
//!
//! Every state answers the same protocol: `examine_world` decides whether to
//! stay, switch to a new state, or pop back out; `update` runs once per frame
//! on whichever state is active after that decision; `enter`/`exit` bracket
//! each transition edge.

use std::fmt;
use std::time::Duration;

use glam::Vec2;
use tracing::debug;

use super::brain::StateHooks;
use super::mob::Mob;
use super::movement::{heading, move_mob};
use super::perception::player_seen;
use super::tuning::AiTuning;
use crate::level::Level;

/// Which behavior a state implements, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Idle,
    Search,
    Hunt,
}

impl StateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateKind::Idle => "idle",
            StateKind::Search => "search",
            StateKind::Hunt => "hunt",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`MobState::examine_world`].
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Keep the current state. No enter/exit fires.
    Stay,
    /// Leave the current state for a freshly built one.
    Switch(MobState),
    /// Leave the current state and fall back to whatever came before it.
    Pop,
}

/// Wandering between fixed waypoints, hoping to chance across the player.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pattern: Vec<Vec2>,
    target: usize,
}

impl SearchState {
    /// Start at the first waypoint.
    pub fn new(pattern: Vec<Vec2>) -> Self {
        Self { pattern, target: 0 }
    }

    pub fn pattern(&self) -> &[Vec2] {
        &self.pattern
    }

    /// Index of the waypoint currently headed for.
    pub fn target_index(&self) -> usize {
        self.target
    }

    fn examine_world<M, L>(&mut self, mob: &M, level: &L, tuning: &AiTuning) -> Transition
    where
        M: Mob + ?Sized,
        L: Level + ?Sized,
    {
        if player_seen(mob, level, tuning.padding) {
            return Transition::Switch(MobState::Hunt(HuntState::new()));
        }
        Transition::Stay
    }

    fn update<M, L>(&mut self, mob: &mut M, level: &L, tuning: &AiTuning)
    where
        M: Mob + ?Sized,
        L: Level + ?Sized,
    {
        if self.pattern.is_empty() {
            return;
        }

        let position = mob.position();
        let mut target = self.pattern[self.target];
        if position.distance(target) < tuning.arrival_radius {
            self.target = (self.target + 1) % self.pattern.len();
            target = self.pattern[self.target];
        }

        let step = heading(position, target, mob.speed());
        if step == Vec2::ZERO {
            return;
        }
        move_mob(mob, step, level, tuning.padding);
    }
}

/// Actively hunting the player; tracks how long since the player was last seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HuntState {
    since_contact: Duration,
}

impl HuntState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A hunt that already lost the player `since_contact` ago.
    pub fn with_since_contact(since_contact: Duration) -> Self {
        Self { since_contact }
    }

    pub fn since_contact(&self) -> Duration {
        self.since_contact
    }

    fn examine_world<M, L>(&mut self, mob: &M, level: &L, tuning: &AiTuning) -> Transition
    where
        M: Mob + ?Sized,
        L: Level + ?Sized,
    {
        if player_seen(mob, level, tuning.padding) {
            self.since_contact = Duration::ZERO;
            return Transition::Stay;
        }
        if !mob.is_bored(self.since_contact) {
            return Transition::Stay;
        }
        Transition::Pop
    }

    // No chase movement: the hunt only keeps time.
    fn update(&mut self, delta: Duration) {
        self.since_contact += delta;
    }
}

/// The behavior a mob is currently in. New mobs start in `Idle`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MobState {
    /// Vegetating. Always escalates to a search on the first evaluation.
    #[default]
    Idle,
    Search(SearchState),
    Hunt(HuntState),
}

impl MobState {
    /// A fresh search over the mob's own waypoints.
    pub fn search_for<M: Mob + ?Sized>(mob: &M) -> Self {
        MobState::Search(SearchState::new(mob.search_pattern().to_vec()))
    }

    pub fn kind(&self) -> StateKind {
        match self {
            MobState::Idle => StateKind::Idle,
            MobState::Search(_) => StateKind::Search,
            MobState::Hunt(_) => StateKind::Hunt,
        }
    }

    /// Decide the transition for this frame. May mutate the state's own
    /// bookkeeping (a hunt resets its contact timer on sight).
    pub fn examine_world<M, L>(&mut self, mob: &M, level: &L, tuning: &AiTuning) -> Transition
    where
        M: Mob + ?Sized,
        L: Level + ?Sized,
    {
        match self {
            MobState::Idle => Transition::Switch(MobState::search_for(mob)),
            MobState::Search(search) => search.examine_world(mob, level, tuning),
            MobState::Hunt(hunt) => hunt.examine_world(mob, level, tuning),
        }
    }

    /// Per-frame work for the active state.
    pub fn update<M, L>(&mut self, mob: &mut M, delta: Duration, level: &L, tuning: &AiTuning)
    where
        M: Mob + ?Sized,
        L: Level + ?Sized,
    {
        match self {
            MobState::Idle => {}
            MobState::Search(search) => search.update(mob, level, tuning),
            MobState::Hunt(hunt) => hunt.update(delta),
        }
    }

    pub fn enter<M, H>(&mut self, mob: &mut M, hooks: &mut H)
    where
        M: Mob + ?Sized,
        H: StateHooks<M> + ?Sized,
    {
        match self {
            MobState::Idle => debug!(state = "idle", "entering state"),
            MobState::Search(search) => debug!(
                state = "search",
                waypoints = search.pattern.len(),
                "entering state"
            ),
            MobState::Hunt(_) => debug!(state = "hunt", "entering state"),
        }
        hooks.entered(self.kind(), mob);
    }

    pub fn exit<M, H>(&mut self, mob: &mut M, hooks: &mut H)
    where
        M: Mob + ?Sized,
        H: StateHooks<M> + ?Sized,
    {
        let kind = self.kind();
        match self {
            MobState::Hunt(hunt) => debug!(
                state = "hunt",
                since_contact_ms = hunt.since_contact.as_millis() as u64,
                "leaving state"
            ),
            _ => debug!(state = kind.as_str(), "leaving state"),
        }
        hooks.exited(kind, mob);
    }
}
