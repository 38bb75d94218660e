//! Headless tests for the [`Screen`] mirror of the session phase.
//!
//! These tests use [`MinimalPlugins`] with no window, rendering or physics,
//! and feed [`GameNotice`]s straight into the message queue.
//!
//! Covered scenarios:
//! 1. Default initial screen is `Ready`.
//! 2. `Started` moves the screen to `Playing`.
//! 3. `GameOver` moves it to `GameOver`; `EnteredReady` brings it back.
//! 4. Notices that carry no phase change leave the screen alone.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bubble_merge::bubble::Tier;
use bubble_merge::menu::{sync_screen_system, Screen};
use bubble_merge::session::GameNotice;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Minimal headless app with `Screen`, the notice queue and the sync system.
fn screen_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<Screen>();
    app.add_message::<GameNotice>();
    app.add_systems(Update, sync_screen_system);
    app.update();
    app
}

/// Queue a notice, then run two frames: one for `sync_screen_system` to
/// request the change, one for `StateTransition` to apply it.
fn notify(app: &mut App, notice: GameNotice) {
    app.world_mut()
        .resource_mut::<Messages<GameNotice>>()
        .write(notice);
    app.update();
    app.update();
}

fn screen(app: &App) -> Screen {
    *app.world().resource::<State<Screen>>().get()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn default_screen_is_ready() {
    let app = screen_app();
    assert_eq!(screen(&app), Screen::Ready, "initial screen must be Ready");
}

#[test]
fn started_notice_enters_playing() {
    let mut app = screen_app();
    notify(&mut app, GameNotice::Started);
    assert_eq!(screen(&app), Screen::Playing);
}

#[test]
fn game_over_then_restart_cycles_back_to_ready() {
    let mut app = screen_app();
    notify(&mut app, GameNotice::Started);
    notify(&mut app, GameNotice::GameOver { score: 12 });
    assert_eq!(screen(&app), Screen::GameOver);

    notify(&mut app, GameNotice::ScoreChanged(0));
    assert_eq!(screen(&app), Screen::GameOver, "score alone is not a restart");

    notify(&mut app, GameNotice::EnteredReady);
    assert_eq!(screen(&app), Screen::Ready);
}

#[test]
fn gameplay_notices_keep_playing_screen() {
    let mut app = screen_app();
    notify(&mut app, GameNotice::Started);
    notify(&mut app, GameNotice::Dropped);
    notify(
        &mut app,
        GameNotice::Merged {
            tier: Tier::MIN,
            position: Vec2::new(320.0, 40.0),
        },
    );
    notify(&mut app, GameNotice::ScoreChanged(1));
    assert_eq!(screen(&app), Screen::Playing);
}
