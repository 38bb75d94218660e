//! Game plugin: owns the [`GameSession`] resource and feeds it events.
//!
//! ## Systems (registered by `GamePlugin`)
//!
//! | System                          | Schedule                     | Purpose                                 |
//! |---------------------------------|------------------------------|-----------------------------------------|
//! | `init_session_system`           | `Startup` (after config)     | Build box, insert `Session`             |
//! | `pointer_input_system`          | `Update / in Playing`        | Cursor x → `PointerMove`                |
//! | `drop_input_system`             | `Update / in Playing`        | Click / Space → `Drop`                  |
//! | `drive_session_system`          | `PostUpdate` after writeback | Inputs, collisions, tick → session      |
//! | `apply_physics_settings_system` | `PostUpdate` after driver    | Gravity + freeze → `RapierConfiguration`|
//!
//! Within one frame the driver always applies player inputs first, then every
//! collision Rapier reported for the step, then the tick (cooldown + deadline
//! check), so the order is deterministic.

use crate::config::{load_game_config, GameConfig};
use crate::menu::Screen;
use crate::physics::{
    apply_physics_settings_system, board_origin, board_snapshot, Bubble, PhysicsFreeze,
    RapierBoard, Wall,
};
use crate::session::{GameNotice, GameSession, InputEvent, WorldEvent};
use crate::world::BubbleSnapshot;
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};
use bevy_rapier2d::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Resources & messages ──────────────────────────────────────────────────────

/// The one game session of this app.
#[derive(Resource, Debug)]
pub struct Session(pub GameSession<Entity>);

/// RNG used for spawn tiers.
#[derive(Resource, Debug)]
pub struct SpawnRng(pub StdRng);

impl Default for SpawnRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Player intent emitted by input systems and overlay buttons.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct PlayerInput(pub InputEvent);

/// Ordering anchor for the session driver.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionSet;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers the session resources, message types and driver systems.
///
/// Expects `RapierPhysicsPlugin` and `GameConfig` to be present.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnRng>()
            .init_resource::<PhysicsFreeze>()
            .add_message::<PlayerInput>()
            .add_message::<GameNotice>()
            .add_systems(Startup, init_session_system.after(load_game_config))
            .add_systems(
                Update,
                (pointer_input_system, drop_input_system).run_if(in_state(Screen::Playing)),
            )
            .add_systems(
                PostUpdate,
                (drive_session_system, apply_physics_settings_system)
                    .chain()
                    .in_set(SessionSet)
                    .after(PhysicsSet::Writeback),
            );
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Create the session from the loaded config and build the first box.
pub fn init_session_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut freeze: ResMut<PhysicsFreeze>,
    mut notices: MessageWriter<GameNotice>,
) {
    let mut session = GameSession::new(config.clone());
    let mut board = RapierBoard::new(
        &mut commands,
        &config,
        std::iter::empty::<BubbleSnapshot<Entity>>(),
        std::iter::empty::<Entity>(),
    );
    notices.write_batch(session.initialize(&mut board));
    if let Some(paused) = board.pause_request() {
        freeze.0 = paused;
    }
    commands.insert_resource(Session(session));
    info!("Game session ready");
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Translate the latest cursor position into a horizontal board coordinate.
///
/// Assumes the default `Camera2d` at the origin with unit scale, so window
/// pixels map one-to-one onto world units.
pub fn pointer_input_system(
    mut cursor: MessageReader<CursorMoved>,
    windows: Query<&Window, With<PrimaryWindow>>,
    config: Res<GameConfig>,
    mut input: MessageWriter<PlayerInput>,
) {
    let Some(moved) = cursor.read().last() else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    let world_x = moved.position.x - window.width() / 2.0;
    let x = world_x - board_origin(&config).x;
    input.write(PlayerInput(InputEvent::PointerMove { x }));
}

/// Left click or Space commits the pending bubble.
pub fn drop_input_system(
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut input: MessageWriter<PlayerInput>,
) {
    if buttons.just_pressed(MouseButton::Left) || keys.just_pressed(KeyCode::Space) {
        input.write(PlayerInput(InputEvent::Drop));
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

/// Feed this frame's inputs, collisions and tick to the session.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn drive_session_system(
    mut commands: Commands,
    session: Option<ResMut<Session>>,
    mut rng: ResMut<SpawnRng>,
    mut freeze: ResMut<PhysicsFreeze>,
    time: Res<Time>,
    mut inputs: MessageReader<PlayerInput>,
    mut collisions: MessageReader<CollisionEvent>,
    bubbles: Query<(Entity, &Bubble, &Transform, Option<&Velocity>)>,
    walls: Query<Entity, With<Wall>>,
    mut notices: MessageWriter<GameNotice>,
) {
    let Some(mut session) = session else {
        return;
    };
    let config = session.0.config().clone();
    let origin = board_origin(&config);
    let mut board = RapierBoard::new(
        &mut commands,
        &config,
        bubbles
            .iter()
            .map(|(entity, bubble, transform, velocity)| {
                board_snapshot(entity, bubble, transform, velocity, origin)
            }),
        walls.iter(),
    );

    let mut events: Vec<WorldEvent<Entity>> =
        inputs.read().map(|input| WorldEvent::Input(input.0)).collect();
    events.extend(collisions.read().filter_map(|event| match event {
        CollisionEvent::Started(a, b, _) => Some(WorldEvent::Collision(*a, *b)),
        CollisionEvent::Stopped(..) => None,
    }));
    events.push(WorldEvent::Tick {
        delta: time.delta(),
    });

    for event in events {
        notices.write_batch(session.0.dispatch(&mut board, &mut rng.0, event));
    }

    if let Some(paused) = board.pause_request() {
        freeze.0 = paused;
    }
}
