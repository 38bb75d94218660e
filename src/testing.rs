//! Scripted in-engine scenarios, selected with `BUBBLE_TEST=<name>`.
//!
//! Unlike the unit and integration tests, which drive the session against
//! the in-memory world, these run the real Rapier pipeline for a fixed number
//! of frames and then print a PASS / FAIL verdict before exiting.
//!
//! | Name         | Setup                                       | Expectation                      |
//! |--------------|---------------------------------------------|----------------------------------|
//! | `merge_pair` | two overlapping tier-0 bubbles on the floor | one tier-1 bubble, score 1       |
//! | `cap_merge`  | two overlapping tier-11 bubbles             | no bubbles left, score 2048      |
//! | `deadline`   | tier-0 bubble launched upward               | session ends in game over        |

use crate::bubble::{create_bubble, BubbleCategory, Tier};
use crate::config::GameConfig;
use crate::game::{init_session_system, Session, SessionSet};
use crate::physics::{board_origin, bubble_bundle, Bubble};
use bevy::prelude::*;
use bevy_rapier2d::prelude::Velocity;
use std::io::Write;

/// Test configuration
#[derive(Resource)]
pub struct TestConfig {
    pub enabled: bool,
    pub test_name: String,
    pub frame_limit: u32,
    pub frame_count: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            test_name: String::new(),
            frame_limit: 100,
            frame_count: 0,
        }
    }
}

/// Register the scenario named `test_name` plus the logging and verification
/// systems.  Unknown names fall back to `merge_pair`.
pub fn configure_test_mode(app: &mut App, test_name: &str) {
    app.insert_resource(TestConfig {
        enabled: true,
        ..Default::default()
    });

    match test_name {
        "cap_merge" => app.add_systems(Startup, spawn_test_cap_merge.after(init_session_system)),
        "deadline" => app.add_systems(Startup, spawn_test_deadline.after(init_session_system)),
        _ => app.add_systems(Startup, spawn_test_merge_pair.after(init_session_system)),
    };

    app.add_systems(
        PostUpdate,
        (test_logging_system, test_verification_system)
            .chain()
            .after(SessionSet),
    );

    info!("Running test: {test_name}");
}

fn spawn_active(commands: &mut Commands, config: &GameConfig, tier: u8, at: Vec2) -> Entity {
    let tier = Tier::new(tier).unwrap_or(Tier::MIN);
    let bubble = create_bubble(tier, at.x, at.y, BubbleCategory::Active);
    commands.spawn(bubble_bundle(&bubble, board_origin(config))).id()
}

/// Two tier-0 bubbles stacked so they already overlap by one unit.
pub fn spawn_test_merge_pair(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut test_config: ResMut<TestConfig>,
) {
    test_config.test_name = "merge_pair".to_string();
    test_config.frame_limit = 60;

    let floor = config.wall_thickness + Tier::MIN.radius();
    spawn_active(&mut commands, &config, 0, Vec2::new(320.0, floor));
    spawn_active(&mut commands, &config, 0, Vec2::new(320.0, floor + 39.0));

    println!("✓ Spawned test: two tier-0 bubbles overlapping at x=320");
}

/// Two tier-11 bubbles side by side on the floor, overlapping by ten units.
pub fn spawn_test_cap_merge(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut test_config: ResMut<TestConfig>,
) {
    test_config.test_name = "cap_merge".to_string();
    test_config.frame_limit = 30;

    let floor = config.wall_thickness + Tier::MAX.radius();
    spawn_active(&mut commands, &config, 11, Vec2::new(195.0, floor));
    spawn_active(&mut commands, &config, 11, Vec2::new(445.0, floor));

    println!("✓ Spawned test: two tier-11 bubbles overlapping on the floor");
}

/// One tier-0 bubble thrown upward hard enough to pass the deadline.
pub fn spawn_test_deadline(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut test_config: ResMut<TestConfig>,
) {
    test_config.test_name = "deadline".to_string();
    test_config.frame_limit = 120;

    let entity = spawn_active(&mut commands, &config, 0, Vec2::new(320.0, 500.0));
    commands
        .entity(entity)
        .insert(Velocity::linear(Vec2::new(0.0, 900.0)));

    println!("✓ Spawned test: tier-0 bubble launched upward from y=500");
}

/// Count frames and log a one-line summary every 10 frames.
pub fn test_logging_system(
    mut test_config: ResMut<TestConfig>,
    session: Option<Res<Session>>,
    bubbles: Query<&Bubble>,
) {
    if !test_config.enabled {
        return;
    }
    test_config.frame_count += 1;
    if test_config.frame_count % 10 != 0 {
        return;
    }
    let (status, score) = session
        .map(|s| (format!("{:?}", s.0.status()), s.0.score()))
        .unwrap_or_else(|| ("<none>".to_string(), 0));
    println!(
        "[frame {:>3}] bubbles={} status={} score={}",
        test_config.frame_count,
        bubbles.iter().count(),
        status,
        score
    );
}

/// Verify test results at the end and exit.
pub fn test_verification_system(
    test_config: Res<TestConfig>,
    session: Option<Res<Session>>,
    bubbles: Query<&Bubble>,
    mut exit: MessageWriter<AppExit>,
) {
    if !test_config.enabled || test_config.frame_count != test_config.frame_limit {
        return;
    }
    let Some(session) = session else {
        return;
    };

    let tiers: Vec<u8> = bubbles.iter().map(|b| b.tier.value()).collect();

    println!("\n╔════════════════════════════════════════════╗");
    println!("║           TEST COMPLETE                    ║");
    println!("╚════════════════════════════════════════════╝");
    println!("Test:    {}", test_config.test_name);
    println!("Frames:  {}", test_config.frame_count);
    println!("Bubbles: {:?}", tiers);
    println!("Score:   {}", session.0.score());

    let result = verify_test_result(
        &test_config.test_name,
        &tiers,
        session.0.score(),
        session.0.is_game_over(),
    );
    println!("{}\n", result);
    let _ = std::io::stdout().flush();

    exit.write(AppExit::Success);
}

/// Verify if test passed
fn verify_test_result(test_name: &str, tiers: &[u8], score: u64, game_over: bool) -> String {
    match test_name {
        "merge_pair" => {
            if tiers == [1] && score == 1 {
                "✓ PASS: tier-0 pair merged into one tier-1 bubble".to_string()
            } else {
                format!("✗ FAIL: expected [1] with score 1, got {tiers:?} with score {score}")
            }
        }
        "cap_merge" => {
            if tiers.is_empty() && score == 2048 {
                "✓ PASS: tier-11 pair annihilated for 2048 points".to_string()
            } else {
                format!("✗ FAIL: expected no bubbles and 2048, got {tiers:?} and {score}")
            }
        }
        "deadline" => {
            if game_over {
                "✓ PASS: upward bubble above the deadline ended the game".to_string()
            } else {
                "✗ FAIL: bubble crossed the deadline without ending the game".to_string()
            }
        }
        _ => format!("? UNKNOWN test '{test_name}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_pair_verdicts() {
        assert!(verify_test_result("merge_pair", &[1], 1, false).starts_with("✓"));
        assert!(verify_test_result("merge_pair", &[0, 0], 0, false).starts_with("✗"));
    }

    #[test]
    fn cap_merge_requires_empty_board() {
        assert!(verify_test_result("cap_merge", &[], 2048, false).starts_with("✓"));
        assert!(verify_test_result("cap_merge", &[11], 2048, false).starts_with("✗"));
    }

    #[test]
    fn deadline_requires_game_over() {
        assert!(verify_test_result("deadline", &[0], 0, true).starts_with("✓"));
        assert!(verify_test_result("deadline", &[0], 0, false).starts_with("✗"));
    }
}
