//! Game-specific error types.
//!
//! Gameplay itself never fails: collisions on vanished bodies, drops without a
//! pending bubble and similar precondition misses are silent no-ops.  Errors
//! only surface while loading and validating [`crate::config::GameConfig`].
//!
//! ## Usage
//!
//! ```rust
//! use bubble_merge::config::GameConfig;
//! use bubble_merge::error::GameResult;
//!
//! fn check() -> GameResult<()> {
//!     GameConfig::default().validate()?;
//!     Ok(())
//! }
//! # check().unwrap();
//! ```

use std::fmt;

/// Top-level error enum for the bubble game.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// `assets/game.toml` exists but could not be parsed.
    ConfigParse {
        /// Path of the rejected file.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A configuration value is outside its safe operating range.
    UnsafeConstant {
        /// Name of the setting (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: String,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ConfigParse { path, message } => {
                write!(f, "failed to parse '{}': {}", path, message)
            }
            GameError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "setting '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)".to_string(),
        })
    }
}

/// Returns an error unless `value` is finite and `>= 0`.
pub fn validate_non_negative(name: &'static str, value: f32) -> GameResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)".to_string(),
        })
    }
}

/// Returns an error unless `min < value < max`.
pub fn validate_open_range(name: &'static str, value: f32, min: f32, max: f32) -> GameResult<()> {
    if value > min && value < max {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: format!("({min}, {max})"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(validate_positive("x", 1.0).is_ok());
        assert!(validate_positive("x", 0.0).is_err());
        assert!(validate_positive("x", f32::NAN).is_err());
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert!(validate_non_negative("f", 0.0).is_ok());
        assert!(validate_non_negative("f", -0.5).is_err());
        assert!(validate_non_negative("f", f32::INFINITY).is_err());
    }

    #[test]
    fn open_range_excludes_bounds() {
        assert!(validate_open_range("d", 5.0, 0.0, 10.0).is_ok());
        assert!(validate_open_range("d", 0.0, 0.0, 10.0).is_err());
        assert!(validate_open_range("d", 10.0, 0.0, 10.0).is_err());
    }

    #[test]
    fn display_names_the_setting() {
        let err = validate_positive("drop_cooldown_secs", -1.0).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("drop_cooldown_secs"), "got: {text}");
        assert!(text.contains("-1"), "got: {text}");
    }
}
