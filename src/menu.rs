//! Screen overlays: `Screen` definition and `ScreenPlugin`.
//!
//! The game session is the authority on game phase; `Screen` only mirrors it
//! for the UI, following the [`GameNotice`] stream.
//!
//! ## States
//!
//! | State      | Entered on                 | Overlay                         |
//! |------------|----------------------------|---------------------------------|
//! | `Ready`    | `GameNotice::EnteredReady` | title, rules, START button      |
//! | `Playing`  | `GameNotice::Started`      | none                            |
//! | `GameOver` | `GameNotice::GameOver`     | final score, PLAY AGAIN button  |
//!
//! ## Systems (registered by `ScreenPlugin`)
//!
//! | System                    | Schedule               | Purpose                      |
//! |---------------------------|------------------------|------------------------------|
//! | `sync_screen_system`      | `Update`               | Notices → `NextState<Screen>`|
//! | `setup_ready_overlay`     | `OnEnter(Ready)`       | Spawn ready overlay          |
//! | `ready_button_system`     | `Update / in Ready`    | START click / Enter          |
//! | `setup_game_over_overlay` | `OnEnter(GameOver)`    | Spawn game-over overlay      |
//! | `game_over_button_system` | `Update / in GameOver` | PLAY AGAIN click / Enter     |
//! | `cleanup_overlay`         | `OnExit(Ready/GameOver)` | Despawn overlay entities   |

use crate::game::{PlayerInput, Session};
use crate::session::{GameNotice, InputEvent};
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

// ── Screen state ──────────────────────────────────────────────────────────────

/// UI-facing mirror of the session phase.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    /// Box built, waiting for START.
    #[default]
    Ready,
    /// Pending bubble / cooldown cycle.
    Playing,
    /// Physics frozen; final score shown.
    GameOver,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of whichever overlay is showing; despawned on screen exit.
#[derive(Component)]
pub struct OverlayRoot;

/// Tags the START button on the ready overlay.
#[derive(Component)]
pub struct StartButton;

/// Tags the PLAY AGAIN button on the game-over overlay.
#[derive(Component)]
pub struct PlayAgainButton;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `Screen`, the overlays and their button handlers.
///
/// Must be added before `GamePlugin`, whose input systems run under
/// `in_state(Screen::Playing)`.
pub struct ScreenPlugin;

impl Plugin for ScreenPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<Screen>()
            .add_systems(Update, sync_screen_system)
            .add_systems(OnEnter(Screen::Ready), setup_ready_overlay)
            .add_systems(OnExit(Screen::Ready), cleanup_overlay)
            .add_systems(OnEnter(Screen::GameOver), setup_game_over_overlay)
            .add_systems(OnExit(Screen::GameOver), cleanup_overlay)
            .add_systems(
                Update,
                (
                    ready_button_system.run_if(in_state(Screen::Ready)),
                    game_over_button_system.run_if(in_state(Screen::GameOver)),
                ),
            );
    }
}

/// Follow the session's phase changes.
pub fn sync_screen_system(
    mut notices: MessageReader<GameNotice>,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    for notice in notices.read() {
        match notice {
            GameNotice::EnteredReady => next_screen.set(Screen::Ready),
            GameNotice::Started => next_screen.set(Screen::Playing),
            GameNotice::GameOver { .. } => next_screen.set(Screen::GameOver),
            _ => {}
        }
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn button_bg() -> Color {
    Color::srgb(0.0, 0.32, 0.32)
}
fn button_border() -> Color {
    Color::srgb(0.0, 0.62, 0.62)
}
fn button_text() -> Color {
    Color::srgb(0.80, 1.0, 1.0)
}
fn title_color() -> Color {
    Color::srgb(0.95, 0.88, 0.45)
}
fn subtitle_color() -> Color {
    Color::srgb(0.75, 0.75, 0.82)
}
fn hint_color() -> Color {
    Color::srgb(0.45, 0.45, 0.52)
}

// ── Overlay building blocks ───────────────────────────────────────────────────

/// Full-screen translucent backdrop with a centred column card.
fn spawn_overlay(
    commands: &mut Commands,
    border: Color,
    build: impl FnOnce(&mut ChildSpawnerCommands<'_>),
) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            ZIndex(300),
            OverlayRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(36.0)),
                        row_gap: Val::Px(14.0),
                        border: UiRect::all(Val::Px(2.0)),
                        min_width: Val::Px(320.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.04, 0.06, 0.08)),
                    BorderColor::all(border),
                ))
                .with_children(build);
        });
}

fn text_line(parent: &mut ChildSpawnerCommands<'_>, text: impl Into<String>, size: f32, color: Color) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    ));
}

fn button(parent: &mut ChildSpawnerCommands<'_>, label: &str, marker: impl Component) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(50.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(button_bg()),
            BorderColor::all(button_border()),
            marker,
        ))
        .with_children(|btn| {
            text_line(btn, label, 18.0, button_text());
        });
}

/// Tint button text on hover; returns `true` when the button was pressed.
fn handle_button(
    interaction: &Interaction,
    children: &Children,
    btn_text: &mut Query<&mut TextColor>,
) -> bool {
    let tint = match interaction {
        Interaction::Pressed => return true,
        Interaction::Hovered => Color::WHITE,
        Interaction::None => button_text(),
    };
    for child in children.iter() {
        if let Ok(mut color) = btn_text.get_mut(child) {
            *color = TextColor(tint);
        }
    }
    false
}

// ── Ready overlay ─────────────────────────────────────────────────────────────

/// Spawn the pre-game overlay.
///
/// ```text
/// ┌──────────────────────────────────────┐
/// │            BUBBLE MERGE              │
/// │  Drop bubbles into the box and join  │
/// │   matching ones to grow them         │
/// │            [ START ]                 │
/// │   Move: mouse   Drop: click / Space  │
/// └──────────────────────────────────────┘
/// ```
pub fn setup_ready_overlay(mut commands: Commands) {
    spawn_overlay(&mut commands, button_border(), |card| {
        text_line(card, "BUBBLE MERGE", 46.0, title_color());
        text_line(
            card,
            "Drop bubbles into the box and join matching ones to grow them",
            16.0,
            subtitle_color(),
        );
        text_line(
            card,
            "Two equal bubbles merge into a bigger one",
            14.0,
            subtitle_color(),
        );
        button(card, "START", StartButton);
        text_line(
            card,
            "Move: mouse   Drop: click / Space   Start: Enter",
            12.0,
            hint_color(),
        );
    });
}

/// START click or Enter begins the game.
#[allow(clippy::type_complexity)]
pub fn ready_button_system(
    start_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<StartButton>)>,
    mut btn_text: Query<&mut TextColor>,
    keys: Res<ButtonInput<KeyCode>>,
    mut input: MessageWriter<PlayerInput>,
) {
    let mut wants_start = keys.just_pressed(KeyCode::Enter);
    for (interaction, children) in start_query.iter() {
        wants_start |= handle_button(interaction, children, &mut btn_text);
    }
    if wants_start {
        input.write(PlayerInput(InputEvent::Start));
    }
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

/// Spawn the game-over overlay over the frozen box.
pub fn setup_game_over_overlay(mut commands: Commands, session: Res<Session>) {
    let score = session.0.score();
    spawn_overlay(&mut commands, Color::srgb(0.55, 0.10, 0.10), |card| {
        text_line(card, "GAME OVER", 46.0, Color::srgb(1.0, 0.22, 0.22));
        text_line(card, format!("Score: {score}"), 20.0, subtitle_color());
        button(card, "PLAY AGAIN", PlayAgainButton);
        text_line(card, "Press Enter to play again", 12.0, hint_color());
    });
    info!("Game over with score {score}");
}

/// PLAY AGAIN click or Enter restarts the session.
#[allow(clippy::type_complexity)]
pub fn game_over_button_system(
    play_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<PlayAgainButton>)>,
    mut btn_text: Query<&mut TextColor>,
    keys: Res<ButtonInput<KeyCode>>,
    mut input: MessageWriter<PlayerInput>,
) {
    let mut wants_restart = keys.just_pressed(KeyCode::Enter);
    for (interaction, children) in play_query.iter() {
        wants_restart |= handle_button(interaction, children, &mut btn_text);
    }
    if wants_restart {
        input.write(PlayerInput(InputEvent::Restart));
    }
}

// ── OnExit: despawn overlay ───────────────────────────────────────────────────

/// Recursively despawn the current overlay.
pub fn cleanup_overlay(mut commands: Commands, query: Query<Entity, With<OverlayRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
