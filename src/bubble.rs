//! Bubble factory: tiers, collision layers and spawn descriptors.
//!
//! A bubble is fully described by its [`Tier`]; radius, colour and merge
//! reward are derived from it and never stored alongside, so they cannot
//! drift apart.  [`create_bubble`] only builds a [`BubbleDescriptor`];
//! inserting it into a physics world is the caller's job.

use crate::constants::{
    BUBBLE_BASE_RADIUS, BUBBLE_FRICTION, BUBBLE_MASS, BUBBLE_RADIUS_STEP, MAX_TIER, SPAWN_TIERS,
};
use bevy::prelude::*;
use rand::Rng;

// ── Tier ──────────────────────────────────────────────────────────────────────

/// Integer rank of a bubble, always within `0..=MAX_TIER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tier(u8);

/// sRGB fill colour per tier.  Tiers 0–10 appear through spawns and merges;
/// tier 11 only through merges.
const TIER_COLORS: [[u8; 3]; MAX_TIER as usize + 1] = [
    [0x8b, 0x00, 0x00], // dark red
    [0xff, 0x69, 0xb4], // hot pink
    [0x94, 0x00, 0xd3], // dark violet
    [0xf4, 0xa4, 0x60], // sandy brown
    [0xff, 0x8c, 0x00], // dark orange
    [0xff, 0x00, 0x00], // red
    [0xf0, 0xe6, 0x8c], // khaki
    [0xff, 0xb6, 0xc1], // light pink
    [0xff, 0xff, 0x00], // yellow
    [0x3c, 0xb3, 0x71], // medium sea green
    [0x00, 0x64, 0x00], // dark green
    [0x41, 0x69, 0xe1], // royal blue
];

impl Tier {
    pub const MIN: Tier = Tier(0);
    pub const MAX: Tier = Tier(MAX_TIER);

    /// Returns `None` when `value > MAX_TIER`.
    pub fn new(value: u8) -> Option<Self> {
        (value <= MAX_TIER).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// `radius = 20 + 10 × tier`.
    pub fn radius(self) -> f32 {
        BUBBLE_BASE_RADIUS + BUBBLE_RADIUS_STEP * f32::from(self.0)
    }

    /// Tier produced by merging two bubbles of this tier; `None` at the cap.
    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// Score awarded for merging two bubbles of this tier: `2^tier`.
    pub fn reward(self) -> u64 {
        1u64 << self.0
    }

    pub fn color(self) -> Color {
        let [r, g, b] = TIER_COLORS[self.0 as usize];
        Color::srgb_u8(r, g, b)
    }
}

/// Draw the tier of a freshly spawned pending bubble, uniformly from
/// [`SPAWN_TIERS`].
pub fn random_spawn_tier<R: Rng + ?Sized>(rng: &mut R) -> Tier {
    let index = rng.gen_range(0..SPAWN_TIERS.len());
    Tier::new(SPAWN_TIERS[index]).unwrap_or(Tier::MIN)
}

// ── Collision layers ──────────────────────────────────────────────────────────

/// Collision category bits shared by every world adapter.
pub mod layers {
    pub const WALL: u32 = 0x0001;
    pub const BUBBLE: u32 = 0x0002;
    pub const BUBBLE_PENDING: u32 = 0x0004;
}

/// Membership / filter bitmask pair for one body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionLayer {
    pub membership: u32,
    pub filter: u32,
}

impl CollisionLayer {
    pub const WALL: CollisionLayer = CollisionLayer {
        membership: layers::WALL,
        filter: layers::WALL | layers::BUBBLE | layers::BUBBLE_PENDING,
    };

    /// Both sides must accept each other, as in Rapier's interaction groups.
    pub fn collides_with(self, other: CollisionLayer) -> bool {
        self.membership & other.filter != 0 && other.membership & self.filter != 0
    }
}

/// Lifecycle category of a bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BubbleCategory {
    /// Awaiting placement: frozen, collides with walls only.
    Pending,
    /// Released into the simulation: collides with walls and active bubbles.
    Active,
}

impl BubbleCategory {
    pub fn layer(self) -> CollisionLayer {
        match self {
            BubbleCategory::Pending => CollisionLayer {
                membership: layers::BUBBLE_PENDING,
                filter: layers::WALL,
            },
            BubbleCategory::Active => CollisionLayer {
                membership: layers::BUBBLE,
                filter: layers::WALL | layers::BUBBLE,
            },
        }
    }
}

// ── Descriptor ────────────────────────────────────────────────────────────────

/// Physical material shared by all bubbles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleMaterial {
    pub friction: f32,
    pub mass: f32,
}

impl Default for BubbleMaterial {
    fn default() -> Self {
        Self {
            friction: BUBBLE_FRICTION,
            mass: BUBBLE_MASS,
        }
    }
}

/// Everything a world adapter needs to insert a bubble body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleDescriptor {
    pub tier: Tier,
    /// Board coordinates of the centre.
    pub position: Vec2,
    pub category: BubbleCategory,
    pub material: BubbleMaterial,
}

impl BubbleDescriptor {
    pub fn radius(&self) -> f32 {
        self.tier.radius()
    }

    pub fn color(&self) -> Color {
        self.tier.color()
    }

    pub fn with_material(mut self, material: BubbleMaterial) -> Self {
        self.material = material;
        self
    }
}

/// Build the descriptor of a bubble of `tier` centred at `(x, y)`.
pub fn create_bubble(tier: Tier, x: f32, y: f32, category: BubbleCategory) -> BubbleDescriptor {
    BubbleDescriptor {
        tier,
        position: Vec2::new(x, y),
        category,
        material: BubbleMaterial::default(),
    }
}
