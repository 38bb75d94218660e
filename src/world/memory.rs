//! In-memory [`BubbleWorld`] with no simulation of its own.
//!
//! Bodies stay exactly where they are put; tests move them with
//! [`MemoryWorld::set_position`] / [`MemoryWorld::set_velocity`] and feed
//! collisions to the session by hand.  Ids are handed out sequentially and
//! never reused, so a stale id can never alias a new body.

use super::{BubbleSnapshot, BubbleWorld};
use crate::bubble::{BubbleCategory, BubbleDescriptor, Tier};
use crate::config::GameConfig;
use bevy::math::Vec2;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Body {
    Wall,
    Bubble {
        tier: Tier,
        category: BubbleCategory,
        position: Vec2,
        velocity: Vec2,
    },
}

/// Deterministic fake physics world.
#[derive(Debug, Default)]
pub struct MemoryWorld {
    bodies: BTreeMap<u64, Body>,
    next_id: u64,
    paused: bool,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self, body: Body) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.bodies.insert(id, body);
        id
    }

    /// Ids of the static box bodies.
    pub fn walls(&self) -> Vec<u64> {
        self.bodies
            .iter()
            .filter(|(_, body)| matches!(body, Body::Wall))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Whether the stepping loop is currently frozen.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_position(&mut self, id: u64, to: Vec2) {
        if let Some(Body::Bubble { position, .. }) = self.bodies.get_mut(&id) {
            *position = to;
        }
    }

    pub fn set_velocity(&mut self, id: u64, to: Vec2) {
        if let Some(Body::Bubble { velocity, .. }) = self.bodies.get_mut(&id) {
            *velocity = to;
        }
    }

    /// Live bubbles in the given category.
    pub fn count(&self, category: BubbleCategory) -> usize {
        self.bubbles()
            .iter()
            .filter(|b| b.category == category)
            .count()
    }
}

impl BubbleWorld for MemoryWorld {
    type Id = u64;

    fn clear(&mut self) {
        self.bodies.clear();
    }

    fn build_box(&mut self, _config: &GameConfig) {
        // ground, left wall, right wall
        for _ in 0..3 {
            self.allocate(Body::Wall);
        }
    }

    fn insert_bubble(&mut self, bubble: BubbleDescriptor) -> u64 {
        self.allocate(Body::Bubble {
            tier: bubble.tier,
            category: bubble.category,
            position: bubble.position,
            velocity: Vec2::ZERO,
        })
    }

    fn remove(&mut self, id: u64) {
        self.bodies.remove(&id);
    }

    fn contains(&self, id: u64) -> bool {
        self.bodies.contains_key(&id)
    }

    fn bubble(&self, id: u64) -> Option<BubbleSnapshot<u64>> {
        match self.bodies.get(&id)? {
            Body::Wall => None,
            Body::Bubble {
                tier,
                category,
                position,
                velocity,
            } => Some(BubbleSnapshot {
                id,
                tier: *tier,
                category: *category,
                position: *position,
                velocity: *velocity,
            }),
        }
    }

    fn bubbles(&self) -> Vec<BubbleSnapshot<u64>> {
        self.bodies.keys().filter_map(|id| self.bubble(*id)).collect()
    }

    fn set_x(&mut self, id: u64, x: f32) {
        if let Some(Body::Bubble { position, .. }) = self.bodies.get_mut(&id) {
            position.x = x;
        }
    }

    fn release(&mut self, id: u64) {
        if let Some(Body::Bubble { category, .. }) = self.bodies.get_mut(&id) {
            *category = BubbleCategory::Active;
        }
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubble::create_bubble;

    #[test]
    fn walls_are_bodies_but_not_bubbles() {
        let mut world = MemoryWorld::new();
        world.build_box(&GameConfig::default());
        let walls = world.walls();
        assert_eq!(walls.len(), 3);
        assert!(walls.iter().all(|id| world.contains(*id)));
        assert!(walls.iter().all(|id| world.bubble(*id).is_none()));
        assert!(world.bubbles().is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut world = MemoryWorld::new();
        let first = world.insert_bubble(create_bubble(Tier::MIN, 0.0, 0.0, BubbleCategory::Active));
        world.clear();
        let second =
            world.insert_bubble(create_bubble(Tier::MIN, 0.0, 0.0, BubbleCategory::Active));
        assert_ne!(first, second);
        assert!(!world.contains(first));
    }

    #[test]
    fn release_activates_pending_bubble() {
        let mut world = MemoryWorld::new();
        let id = world.insert_bubble(create_bubble(Tier::MIN, 0.0, 0.0, BubbleCategory::Pending));
        world.release(id);
        assert_eq!(
            world.bubble(id).map(|b| b.category),
            Some(BubbleCategory::Active)
        );
    }
}
