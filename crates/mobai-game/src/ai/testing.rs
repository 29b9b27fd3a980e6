//! Test doubles for the level, the collision provider, mobs, and hooks.

use std::cell::RefCell;
use std::time::Duration;

use glam::Vec2;
use mobai_world::{Collisions, Rect};

use super::brain::StateHooks;
use super::mob::Mob;
use super::state::StateKind;
use crate::level::Level;

/// What the scripted provider answers to `fix_move`.
#[derive(Debug, Clone, Copy)]
pub enum Correction {
    PassThrough,
    Scale(f32),
    Fixed(Vec2),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixMoveCall {
    pub bounds: [f32; 4],
    pub desired: Vec2,
    pub pad: Vec2,
}

#[derive(Debug)]
pub struct ScriptedCollisions {
    pub sight: bool,
    pub correction: Correction,
    pub calls: RefCell<Vec<FixMoveCall>>,
}

impl Collisions for ScriptedCollisions {
    fn fix_move(&self, bounds: [f32; 4], desired: Vec2, pad: Vec2) -> Vec2 {
        self.calls.borrow_mut().push(FixMoveCall {
            bounds,
            desired,
            pad,
        });
        match self.correction {
            Correction::PassThrough => desired,
            Correction::Scale(k) => desired * k,
            Correction::Fixed(v) => v,
        }
    }

    fn can_see(&self, _from: Vec2, _to: Vec2, _pad: Vec2) -> bool {
        self.sight
    }
}

#[derive(Debug)]
pub struct ScriptedLevel {
    pub collisions: ScriptedCollisions,
    pub player: Vec2,
}

impl ScriptedLevel {
    /// Player far away at (1000, 1000), line of sight clear.
    pub fn new(correction: Correction) -> Self {
        Self {
            collisions: ScriptedCollisions {
                sight: true,
                correction,
                calls: RefCell::new(Vec::new()),
            },
            player: Vec2::splat(1000.0),
        }
    }

    pub fn with_player(mut self, player: Vec2, sight: bool) -> Self {
        self.player = player;
        self.collisions.sight = sight;
        self
    }
}

impl Level for ScriptedLevel {
    fn collisions(&self) -> &dyn Collisions {
        &self.collisions
    }

    fn player_position(&self) -> Vec2 {
        self.player
    }
}

/// A mob that counts how often it was relocated.
#[derive(Debug, Clone)]
pub struct TestMob {
    pub position: Vec2,
    pub speed: f32,
    pub detection_radius: f32,
    pub bored_threshold: Duration,
    pub pattern: Vec<Vec2>,
    pub relocations: usize,
}

/// Speed 1, detection radius 10, bored after one second, 1x1 hitbox.
pub fn test_mob(position: Vec2, pattern: Vec<Vec2>) -> TestMob {
    TestMob {
        position,
        speed: 1.0,
        detection_radius: 10.0,
        bored_threshold: Duration::from_secs(1),
        pattern,
        relocations: 0,
    }
}

impl Mob for TestMob {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn bounds(&self) -> Rect {
        Rect::from_center(self.position, Vec2::splat(0.5))
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    fn detection_radius(&self) -> f32 {
        self.detection_radius
    }

    fn bored_threshold(&self) -> Duration {
        self.bored_threshold
    }

    fn search_pattern(&self) -> &[Vec2] {
        &self.pattern
    }

    fn relocate(&mut self, to: Vec2) {
        self.position = to;
        self.relocations += 1;
    }
}

/// Records every enter/exit notification in order.
#[derive(Debug, Default)]
pub struct CountingHooks {
    pub entered: Vec<StateKind>,
    pub exited: Vec<StateKind>,
}

impl<M: Mob + ?Sized> StateHooks<M> for CountingHooks {
    fn entered(&mut self, state: StateKind, _mob: &mut M) {
        self.entered.push(state);
    }

    fn exited(&mut self, state: StateKind, _mob: &mut M) {
        self.exited.push(state);
    }
}
