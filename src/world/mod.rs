//! Physics world capability interface.
//!
//! The game core never talks to Rapier directly.  Every rule (merging,
//! spawning, game-over detection) is written against [`BubbleWorld`], which
//! exposes exactly the operations the game needs from a rigid-body engine.
//!
//! | Implementation | Module | Used by |
//! |----------------|--------|---------|
//! | [`MemoryWorld`] | [`memory`] | unit + integration tests, headless drivers |
//! | `RapierBoard` | [`crate::physics`] | the Bevy binary |
//!
//! Positions and velocities crossing this boundary are in board coordinates
//! (origin at the bottom-left corner of the box, y upward).

pub mod memory;

pub use memory::MemoryWorld;

use crate::bubble::{BubbleCategory, BubbleDescriptor, Tier};
use crate::config::GameConfig;
use bevy::math::Vec2;
use std::fmt::Debug;
use std::hash::Hash;

/// Read-only view of one live bubble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleSnapshot<Id> {
    pub id: Id,
    pub tier: Tier,
    pub category: BubbleCategory,
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Operations the game needs from a physics engine.
pub trait BubbleWorld {
    /// Body handle.  Walls and bubbles share the same id space.
    type Id: Copy + Eq + Hash + Debug;

    /// Remove every body, walls included.
    fn clear(&mut self);

    /// Create the static ground and side walls described by `config`.
    fn build_box(&mut self, config: &GameConfig);

    /// Insert a bubble body and return its handle.
    fn insert_bubble(&mut self, bubble: BubbleDescriptor) -> Self::Id;

    /// Remove a body.  Removing an unknown id is a no-op.
    fn remove(&mut self, id: Self::Id);

    /// Whether `id` still refers to a live body.
    fn contains(&self, id: Self::Id) -> bool;

    /// Snapshot of a live bubble; `None` for walls and removed bodies.
    fn bubble(&self, id: Self::Id) -> Option<BubbleSnapshot<Self::Id>>;

    /// Snapshots of every live bubble.
    fn bubbles(&self) -> Vec<BubbleSnapshot<Self::Id>>;

    /// Move a bubble horizontally, keeping its height.
    fn set_x(&mut self, id: Self::Id, x: f32);

    /// Wake a pending bubble and switch it to the active collision category.
    fn release(&mut self, id: Self::Id);

    /// Stop or resume the stepping loop.
    fn set_paused(&mut self, paused: bool);
}
