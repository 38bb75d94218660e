//! Rapier-backed [`BubbleWorld`] and the ECS components it manages.
//!
//! ## Bodies
//!
//! | Body            | Rigid body                | Collision groups (member → filter)        |
//! |-----------------|---------------------------|-------------------------------------------|
//! | Ground / walls  | `Fixed` cuboid            | `GROUP_1` → all                           |
//! | Active bubble   | `Dynamic` ball            | `GROUP_2` → `GROUP_1 \| GROUP_2`          |
//! | Pending bubble  | `KinematicPositionBased`  | `GROUP_3` → `GROUP_1`                     |
//!
//! The group bits come straight from [`crate::bubble::layers`], so the
//! Rapier filter and the in-memory filter can never disagree.
//!
//! ## Batching
//!
//! [`RapierBoard`] is rebuilt by every call of the session driver from the
//! current ECS state.  Structural changes go through `Commands` and only land
//! at the next sync point, so the board keeps its own mirror of which bodies
//! exist: a bubble despawned by the first pair of a collision batch is already
//! gone for the second pair.

use crate::bubble::{BubbleCategory, BubbleDescriptor, CollisionLayer, Tier};
use crate::config::GameConfig;
use crate::world::{BubbleSnapshot, BubbleWorld};
use bevy::prelude::*;
use bevy_rapier2d::geometry::Group;
use bevy_rapier2d::prelude::*;
use std::collections::{HashMap, HashSet};

/// Ground and wall fill colour (teal).
const WALL_COLOR: Color = Color::srgb(0.0, 0.5, 0.5);

// ── Components ────────────────────────────────────────────────────────────────

/// A bubble body.  The tier is the single source of truth for its radius.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Bubble {
    pub tier: Tier,
    pub category: BubbleCategory,
}

/// Static ground or side wall of the box.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wall;

/// Whether the session asked for the stepping loop to be frozen.
///
/// Written by the session driver, applied to `RapierConfiguration` by
/// [`apply_physics_settings_system`].
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhysicsFreeze(pub bool);

// ── Coordinates ───────────────────────────────────────────────────────────────

/// World-space position of the board origin (bottom-left corner).
///
/// The board is centred on the world origin.
pub fn board_origin(config: &GameConfig) -> Vec2 {
    Vec2::new(-config.board_width / 2.0, -config.board_height / 2.0)
}

fn collision_groups(layer: CollisionLayer) -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(layer.membership),
        Group::from_bits_truncate(layer.filter),
    )
}

fn rigid_body_for(category: BubbleCategory) -> RigidBody {
    match category {
        BubbleCategory::Pending => RigidBody::KinematicPositionBased,
        BubbleCategory::Active => RigidBody::Dynamic,
    }
}

// ── Bundles ───────────────────────────────────────────────────────────────────

/// Every component a bubble body needs, positioned from board coordinates.
///
/// Rendering is attached separately by
/// [`crate::graphics::attach_bubble_mesh_system`].
pub fn bubble_bundle(bubble: &BubbleDescriptor, origin: Vec2) -> impl Bundle {
    (
        Bubble {
            tier: bubble.tier,
            category: bubble.category,
        },
        rigid_body_for(bubble.category),
        Collider::ball(bubble.radius()),
        Friction::coefficient(bubble.material.friction),
        ColliderMassProperties::Mass(bubble.material.mass),
        collision_groups(bubble.category.layer()),
        ActiveEvents::COLLISION_EVENTS,
        Velocity::zero(),
        Transform::from_translation((origin + bubble.position).extend(0.0)),
        Visibility::default(),
    )
}

fn wall_bundle(centre: Vec2, size: Vec2, origin: Vec2) -> impl Bundle {
    (
        Wall,
        RigidBody::Fixed,
        Collider::cuboid(size.x / 2.0, size.y / 2.0),
        collision_groups(CollisionLayer::WALL),
        Sprite::from_color(WALL_COLOR, size),
        Transform::from_translation((origin + centre).extend(0.0)),
    )
}

/// Read a bubble entity back into board coordinates.
pub fn board_snapshot(
    entity: Entity,
    bubble: &Bubble,
    transform: &Transform,
    velocity: Option<&Velocity>,
    origin: Vec2,
) -> BubbleSnapshot<Entity> {
    BubbleSnapshot {
        id: entity,
        tier: bubble.tier,
        category: bubble.category,
        position: transform.translation.truncate() - origin,
        velocity: velocity.map_or(Vec2::ZERO, |v| v.linvel),
    }
}

// ── Adapter ───────────────────────────────────────────────────────────────────

/// [`BubbleWorld`] over the Bevy ECS + Rapier.
pub struct RapierBoard<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    origin: Vec2,
    bubbles: HashMap<Entity, BubbleSnapshot<Entity>>,
    walls: HashSet<Entity>,
    pause_request: Option<bool>,
}

impl<'a, 'w, 's> RapierBoard<'a, 'w, 's> {
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        config: &GameConfig,
        bubbles: impl IntoIterator<Item = BubbleSnapshot<Entity>>,
        walls: impl IntoIterator<Item = Entity>,
    ) -> Self {
        Self {
            commands,
            origin: board_origin(config),
            bubbles: bubbles.into_iter().map(|b| (b.id, b)).collect(),
            walls: walls.into_iter().collect(),
            pause_request: None,
        }
    }

    /// Last `set_paused` value requested during this batch, if any.
    pub fn pause_request(&self) -> Option<bool> {
        self.pause_request
    }
}

impl BubbleWorld for RapierBoard<'_, '_, '_> {
    type Id = Entity;

    fn clear(&mut self) {
        for entity in self.bubbles.keys().chain(self.walls.iter()) {
            self.commands.entity(*entity).try_despawn();
        }
        self.bubbles.clear();
        self.walls.clear();
    }

    fn build_box(&mut self, config: &GameConfig) {
        let (w, h, t) = (
            config.board_width,
            config.board_height,
            config.wall_thickness,
        );
        let pieces = [
            (Vec2::new(w / 2.0, t / 2.0), Vec2::new(w, t)),
            (Vec2::new(t / 2.0, h / 2.0), Vec2::new(t, h)),
            (Vec2::new(w - t / 2.0, h / 2.0), Vec2::new(t, h)),
        ];
        for (centre, size) in pieces {
            let entity = self.commands.spawn(wall_bundle(centre, size, self.origin)).id();
            self.walls.insert(entity);
        }
    }

    fn insert_bubble(&mut self, bubble: BubbleDescriptor) -> Entity {
        let entity = self.commands.spawn(bubble_bundle(&bubble, self.origin)).id();
        self.bubbles.insert(
            entity,
            BubbleSnapshot {
                id: entity,
                tier: bubble.tier,
                category: bubble.category,
                position: bubble.position,
                velocity: Vec2::ZERO,
            },
        );
        entity
    }

    fn remove(&mut self, id: Entity) {
        let known = self.bubbles.remove(&id).is_some() || self.walls.remove(&id);
        if known {
            self.commands.entity(id).try_despawn();
        }
    }

    fn contains(&self, id: Entity) -> bool {
        self.bubbles.contains_key(&id) || self.walls.contains(&id)
    }

    fn bubble(&self, id: Entity) -> Option<BubbleSnapshot<Entity>> {
        self.bubbles.get(&id).copied()
    }

    fn bubbles(&self) -> Vec<BubbleSnapshot<Entity>> {
        self.bubbles.values().copied().collect()
    }

    fn set_x(&mut self, id: Entity, x: f32) {
        let Some(snapshot) = self.bubbles.get_mut(&id) else {
            return;
        };
        snapshot.position.x = x;
        let translation = (self.origin + snapshot.position).extend(0.0);
        self.commands
            .entity(id)
            .try_insert(Transform::from_translation(translation));
    }

    fn release(&mut self, id: Entity) {
        let Some(snapshot) = self.bubbles.get_mut(&id) else {
            return;
        };
        snapshot.category = BubbleCategory::Active;
        self.commands.entity(id).try_insert((
            Bubble {
                tier: snapshot.tier,
                category: BubbleCategory::Active,
            },
            rigid_body_for(BubbleCategory::Active),
            collision_groups(BubbleCategory::Active.layer()),
        ));
    }

    fn set_paused(&mut self, paused: bool) {
        self.pause_request = Some(paused);
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Push gravity and the freeze flag into every Rapier context.
///
/// Fields are only written when they differ, so Rapier's change detection is
/// not tripped every frame.
pub fn apply_physics_settings_system(
    config: Res<GameConfig>,
    freeze: Res<PhysicsFreeze>,
    mut rapier: Query<&mut RapierConfiguration>,
) {
    let gravity = Vec2::new(0.0, -config.gravity);
    for mut cfg in rapier.iter_mut() {
        if cfg.gravity != gravity {
            cfg.gravity = gravity;
        }
        if cfg.physics_pipeline_active == freeze.0 {
            cfg.physics_pipeline_active = !freeze.0;
        }
    }
}
