//! Merge rule: two equal-tier active bubbles that touch become one bubble of
//! the next tier at their midpoint.
//!
//! Rapier reports every contact pair of a step as a batch, and one bubble can
//! appear in several pairs of the same batch.  The existence check at the top
//! of [`resolve_collision`] makes the rule idempotent: once a bubble has been
//! consumed by one pair, every later pair that mentions it is ignored.

use crate::bubble::{create_bubble, BubbleCategory, BubbleMaterial, Tier};
use crate::world::BubbleWorld;
use bevy::math::Vec2;

/// Outcome of one successful merge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeResult<Id> {
    /// Tier of the two consumed bubbles.
    pub tier: Tier,
    /// Midpoint of the consumed bubbles (board coordinates).
    pub position: Vec2,
    /// Replacement bubble; `None` when two `MAX_TIER` bubbles annihilate.
    pub spawned: Option<Id>,
    /// Score to award: `2^tier`.
    pub reward: u64,
}

/// Apply the merge rule to one reported contact pair.
///
/// Returns `None`, leaving the world untouched, when either body is gone,
/// either body is not a bubble, either bubble is still pending, or the tiers
/// differ.
pub fn resolve_collision<W: BubbleWorld>(
    world: &mut W,
    a: W::Id,
    b: W::Id,
    material: BubbleMaterial,
) -> Option<MergeResult<W::Id>> {
    if a == b || !world.contains(a) || !world.contains(b) {
        return None;
    }
    let first = world.bubble(a)?;
    let second = world.bubble(b)?;
    if first.category != BubbleCategory::Active || second.category != BubbleCategory::Active {
        return None;
    }
    if first.tier != second.tier {
        return None;
    }

    let tier = first.tier;
    let position = (first.position + second.position) / 2.0;
    world.remove(a);
    world.remove(b);

    let spawned = tier.next().map(|next| {
        let bubble = create_bubble(next, position.x, position.y, BubbleCategory::Active)
            .with_material(material);
        world.insert_bubble(bubble)
    });

    Some(MergeResult {
        tier,
        position,
        spawned,
        reward: tier.reward(),
    })
}
