//! Game-over detection.
//!
//! Polled once per physics step.  A bubble that is above the deadline *and*
//! still moving upward means the stack has overflowed; a bubble resting
//! above the line (or the frozen pending bubble) does not count.

use crate::world::BubbleWorld;

/// True when any live bubble is above `deadline` with upward velocity.
///
/// Pure read of the world: holds no state between calls.
pub fn deadline_crossed<W: BubbleWorld>(world: &W, deadline: f32) -> bool {
    world
        .bubbles()
        .iter()
        .any(|bubble| bubble.position.y > deadline && bubble.velocity.y > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubble::{create_bubble, BubbleCategory, Tier};
    use crate::world::MemoryWorld;
    use bevy::math::Vec2;

    fn world_with(position: Vec2, velocity: Vec2) -> MemoryWorld {
        let mut world = MemoryWorld::new();
        let id = world.insert_bubble(create_bubble(
            Tier::MIN,
            position.x,
            position.y,
            BubbleCategory::Active,
        ));
        world.set_velocity(id, velocity);
        world
    }

    #[test]
    fn upward_bubble_above_line_ends_game() {
        let world = world_with(Vec2::new(320.0, 640.0), Vec2::new(0.0, 35.0));
        assert!(deadline_crossed(&world, 635.0));
    }

    #[test]
    fn resting_or_falling_bubble_above_line_is_fine() {
        let resting = world_with(Vec2::new(320.0, 640.0), Vec2::ZERO);
        let falling = world_with(Vec2::new(320.0, 640.0), Vec2::new(0.0, -35.0));
        assert!(!deadline_crossed(&resting, 635.0));
        assert!(!deadline_crossed(&falling, 635.0));
    }

    #[test]
    fn upward_bubble_below_line_is_fine() {
        let world = world_with(Vec2::new(320.0, 300.0), Vec2::new(0.0, 200.0));
        assert!(!deadline_crossed(&world, 635.0));
    }

    #[test]
    fn repeated_polling_is_stable() {
        let world = world_with(Vec2::new(320.0, 640.0), Vec2::ZERO);
        for _ in 0..1000 {
            assert!(!deadline_crossed(&world, 635.0));
        }
        assert_eq!(world.bubbles().len(), 1);
    }
}
