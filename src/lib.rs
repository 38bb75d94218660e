//! Bubble Merge game library
//!
//! Drop bubbles into a box; two bubbles of the same tier merge into one of
//! the next tier.  Rigid-body physics is Rapier's job; this crate supplies the
//! rules (bubble factory, merge rule, game-over check, session state machine)
//! written against the [`world::BubbleWorld`] trait, plus the Bevy glue that
//! wires them to Rapier, UI and audio.

pub mod audio;
pub mod bubble;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod game_over;
pub mod graphics;
pub mod hud;
pub mod menu;
pub mod merge;
pub mod physics;
pub mod session;
pub mod testing;
pub mod world;
