//! Centralised board, physics and gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::GameConfig::default`] mirrors these values; a
//! `assets/game.toml` file can override any of them at startup.
//!
//! ## Coordinate convention
//!
//! Board coordinates put the origin at the bottom-left outer corner of the
//! box, x to the right and y **upward**.  The Rapier adapter maps them onto
//! Bevy world space with the board centred on the origin.

// ── Board ─────────────────────────────────────────────────────────────────────

/// Outer width of the box (world units), walls included.
pub const BOARD_WIDTH: f32 = 640.0;

/// Outer height of the box (world units), ground included.
pub const BOARD_HEIGHT: f32 = 680.0;

/// Thickness of the ground and both side walls.
pub const WALL_THICKNESS: f32 = 10.0;

/// Height above the board floor beyond which an upward-moving bubble ends the game.
///
/// Sits 45 u below the top edge.  Pending bubbles spawn above this line but
/// are frozen, so they never trip the detector.
pub const DEADLINE_HEIGHT: f32 = 635.0;

/// Distance below the top edge at which a pending bubble is held.
pub const SPAWN_DROP_FROM_TOP: f32 = 30.0;

// ── Bubbles ───────────────────────────────────────────────────────────────────

/// Highest tier a bubble can reach.  Two tier-`MAX_TIER` bubbles annihilate.
pub const MAX_TIER: u8 = 11;

/// Radius of a tier-0 bubble.
pub const BUBBLE_BASE_RADIUS: f32 = 20.0;

/// Radius added per tier: `radius = BASE + tier × STEP`.
pub const BUBBLE_RADIUS_STEP: f32 = 10.0;

/// Tiers a freshly spawned pending bubble is drawn from (uniformly).
///
/// Capped well below `MAX_TIER` so the early game stays tractable.
pub const SPAWN_TIERS: [u8; 4] = [0, 1, 2, 3];

/// Friction coefficient applied to every bubble collider.
pub const BUBBLE_FRICTION: f32 = 0.3;

/// Collider mass of every bubble, independent of radius.
pub const BUBBLE_MASS: f32 = 1.0;

// ── Physics ───────────────────────────────────────────────────────────────────

/// Downward gravity (u/s²) applied by Rapier.
///
/// Roughly one board height per second squared; lower values make drops
/// floaty, higher values make merges bounce harder into the deadline.
pub const GRAVITY: f32 = 980.0;

// ── Timing ────────────────────────────────────────────────────────────────────

/// Cooldown between a drop and the next pending bubble (seconds).
pub const DROP_COOLDOWN_SECS: f32 = 0.5;

/// Upper bound accepted for a configured drop cooldown (seconds).
pub const MAX_DROP_COOLDOWN_SECS: f32 = 60.0;

// ── Presentation ──────────────────────────────────────────────────────────────

/// Font size of the permanent score HUD.
pub const HUD_FONT_SIZE: f32 = 20.0;

/// Background music volume (linear, 0–1).
pub const BGM_VOLUME: f32 = 0.6;
