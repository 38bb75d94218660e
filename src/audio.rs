//! Background music and merge sounds.
//!
//! Audio files are optional: when `assets/audio/*.ogg` is missing the asset
//! server logs the load failure and the game plays on silently.

use crate::config::GameConfig;
use crate::session::GameNotice;
use bevy::audio::Volume;
use bevy::prelude::*;

const BGM_PATH: &str = "audio/bgm.ogg";
const MERGE_PATH: &str = "audio/merge.ogg";

/// Loaded sound handles.
#[derive(Resource, Default)]
pub struct SoundAssets {
    pub merge: Handle<AudioSource>,
}

/// Marker for the looping background-music entity.
#[derive(Component)]
pub struct BackgroundMusic;

pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoundAssets>()
            .add_systems(Startup, load_sounds.after(crate::config::load_game_config))
            .add_systems(Update, (start_music_system, merge_sound_system));
    }
}

/// Load sound handles at startup.
pub fn load_sounds(mut sounds: ResMut<SoundAssets>, asset_server: Res<AssetServer>) {
    sounds.merge = asset_server.load(MERGE_PATH);
    info!("Sound handles queued");
}

/// Start the background loop the first time a game is initialized.
///
/// Restarts do not respawn it; the loop keeps playing across games.
pub fn start_music_system(
    mut commands: Commands,
    mut notices: MessageReader<GameNotice>,
    existing: Query<(), With<BackgroundMusic>>,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) {
    let entered_ready = notices
        .read()
        .filter(|notice| matches!(notice, GameNotice::EnteredReady))
        .count()
        > 0;
    if !entered_ready || !existing.is_empty() {
        return;
    }
    commands.spawn((
        AudioPlayer::new(asset_server.load(BGM_PATH)),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(config.bgm_volume)),
        BackgroundMusic,
    ));
}

/// One-shot sound per merge.
pub fn merge_sound_system(
    mut commands: Commands,
    mut notices: MessageReader<GameNotice>,
    sounds: Res<SoundAssets>,
) {
    for notice in notices.read() {
        if let GameNotice::Merged { .. } = notice {
            commands.spawn((AudioPlayer::new(sounds.merge.clone()), PlaybackSettings::DESPAWN));
        }
    }
}
