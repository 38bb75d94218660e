//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GameConfig>` to any system parameter list and read values
//! with `config.board_width`, `config.deadline_height`, etc.  The game session
//! keeps its own copy, taken when the session is created.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::bubble::Tier;
use crate::constants::*;
use crate::error::{
    validate_non_negative, validate_open_range, validate_positive, GameError, GameResult,
};
use bevy::prelude::*;
use serde::Deserialize;

/// Path of the optional override file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable board, physics and presentation configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Board ────────────────────────────────────────────────────────────────
    pub board_width: f32,
    pub board_height: f32,
    pub wall_thickness: f32,
    pub deadline_height: f32,
    pub spawn_drop_from_top: f32,

    // ── Bubbles ──────────────────────────────────────────────────────────────
    pub bubble_friction: f32,
    pub bubble_mass: f32,

    // ── Physics ──────────────────────────────────────────────────────────────
    pub gravity: f32,

    // ── Timing ───────────────────────────────────────────────────────────────
    pub drop_cooldown_secs: f32,

    // ── Presentation ─────────────────────────────────────────────────────────
    pub hud_font_size: f32,
    pub bgm_volume: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            wall_thickness: WALL_THICKNESS,
            deadline_height: DEADLINE_HEIGHT,
            spawn_drop_from_top: SPAWN_DROP_FROM_TOP,
            bubble_friction: BUBBLE_FRICTION,
            bubble_mass: BUBBLE_MASS,
            gravity: GRAVITY,
            drop_cooldown_secs: DROP_COOLDOWN_SECS,
            hud_font_size: HUD_FONT_SIZE,
            bgm_volume: BGM_VOLUME,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document, filling missing keys from the defaults, and
    /// validate the result.
    pub fn from_toml_str(path: &str, contents: &str) -> GameResult<Self> {
        let config: GameConfig =
            toml::from_str(contents).map_err(|err| GameError::ConfigParse {
                path: path.to_string(),
                message: err.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the board unplayable.
    ///
    /// The largest bubble must fit between the walls, the deadline must lie
    /// inside the box, and the drop cooldown must lie in
    /// `(0, MAX_DROP_COOLDOWN_SECS)`.
    pub fn validate(&self) -> GameResult<()> {
        validate_positive("board_height", self.board_height)?;
        validate_positive("wall_thickness", self.wall_thickness)?;
        let widest = 2.0 * self.wall_thickness + 2.0 * Tier::MAX.radius();
        validate_open_range("board_width", self.board_width, widest, f32::INFINITY)?;
        validate_open_range(
            "deadline_height",
            self.deadline_height,
            self.wall_thickness,
            self.board_height,
        )?;
        validate_open_range(
            "spawn_drop_from_top",
            self.spawn_drop_from_top,
            0.0,
            self.board_height - self.wall_thickness,
        )?;
        validate_non_negative("bubble_friction", self.bubble_friction)?;
        validate_positive("bubble_mass", self.bubble_mass)?;
        validate_positive("gravity", self.gravity)?;
        validate_open_range(
            "drop_cooldown_secs",
            self.drop_cooldown_secs,
            0.0,
            MAX_DROP_COOLDOWN_SECS,
        )?;
        Ok(())
    }

    /// Horizontal centre of the board.
    pub fn centre_x(&self) -> f32 {
        self.board_width / 2.0
    }

    /// Height at which pending bubbles are held.
    pub fn spawn_height(&self) -> f32 {
        self.board_height - self.spawn_drop_from_top
    }

    /// Clamp `x` so a bubble of `radius` stays clear of both side walls.
    pub fn clamp_x(&self, x: f32, radius: f32) -> f32 {
        let min = radius + self.wall_thickness;
        let max = self.board_width - self.wall_thickness - radius;
        x.min(max).max(min)
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Parse and validation errors are logged but do not abort the game.  A
/// missing file is not an error (defaults are already in place from
/// `insert_resource`).
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match GameConfig::from_toml_str(CONFIG_PATH, &contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded game config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("{e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
    }
}
