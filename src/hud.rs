//! Permanent score HUD in the top-right corner.

use crate::config::GameConfig;
use crate::session::GameNotice;
use bevy::prelude::*;

/// Marker for the score HUD root node.
#[derive(Component)]
pub struct HudScoreDisplay;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud_score.after(crate::config::load_game_config))
            .add_systems(Update, hud_score_display_system);
    }
}

/// Spawn the score label; it lives for the whole app run.
pub fn setup_hud_score(mut commands: Commands, config: Res<GameConfig>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(20.0),
                top: Val::Px(10.0),
                ..default()
            },
            HudScoreDisplay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(score_label(0)),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.88, 0.45)),
            ));
        });
}

pub fn score_label(score: u64) -> String {
    format!("Score: {score}")
}

/// Refresh the label from the latest `ScoreChanged` notice of the frame.
pub fn hud_score_display_system(
    mut notices: MessageReader<GameNotice>,
    parent_query: Query<&Children, With<HudScoreDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    let latest = notices
        .read()
        .filter_map(|notice| match notice {
            GameNotice::ScoreChanged(score) => Some(*score),
            _ => None,
        })
        .last();
    let Some(score) = latest else {
        return;
    };
    for children in parent_query.iter() {
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(score_label(score));
            }
        }
    }
}
