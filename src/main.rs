use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;
use std::env;

use bubble_merge::audio::SoundPlugin;
use bubble_merge::config::{self, GameConfig};
use bubble_merge::game::GamePlugin;
use bubble_merge::graphics;
use bubble_merge::hud::HudPlugin;
use bubble_merge::menu::ScreenPlugin;
use bubble_merge::testing;

fn main() {
    // Check for test mode
    let test_mode = env::var("BUBBLE_TEST").ok();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Bubble Merge".into(),
            resolution: WindowResolution::new(720, 760),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.96, 0.96, 0.92)))
    // Insert GameConfig with compiled defaults; load_game_config will
    // overwrite it from assets/game.toml (if present) in the Startup schedule.
    .insert_resource(GameConfig::default())
    // pixels_per_meter(1.0) keeps world units identical to board units, so
    // radii, gravity and the deadline are all expressed in pixels.
    .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
    .add_plugins((ScreenPlugin, GamePlugin, HudPlugin, SoundPlugin))
    .add_systems(
        Startup,
        (
            // Load config first so every other startup system sees the final values.
            config::load_game_config,
            graphics::setup_camera.after(config::load_game_config),
            graphics::setup_deadline_marker.after(config::load_game_config),
        ),
    )
    .add_systems(Update, graphics::attach_bubble_mesh_system);

    if let Some(test_name) = test_mode {
        testing::configure_test_mode(&mut app, &test_name);
    }

    app.run();
}
