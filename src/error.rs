//! Backdrop error types.
//!
//! The simulation itself never fails: stale references are treated as absent
//! and a zero-sized surface simply skips the frame.  The only fallible surface
//! is configuration, which is read from disk and validated at startup.
//!
//! ## Usage
//!
//! ```rust
//! use orbfield::config::FieldConfig;
//! use orbfield::error::FieldResult;
//!
//! fn load(text: &str) -> FieldResult<FieldConfig> {
//!     let config = FieldConfig::from_toml_str(text)?;
//!     config.validate()?;
//!     Ok(config)
//! }
//! # assert!(load("max_bodies = 10").is_ok());
//! ```

use std::fmt;

use crate::constants::MAX_TIMER_SECS;

/// Top-level error enum for the backdrop crate.
#[derive(Debug)]
pub enum FieldError {
    /// The config file exists but could not be read.
    ConfigRead {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The config file is not valid TOML or a value has the wrong type.
    ConfigParse {
        /// Parser message, including the offending line when available.
        message: String,
    },

    /// A tunable is outside its safe operating range.
    UnsafeConstant {
        /// Name of the field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// `ORBFIELD_BACKDROP` named a backdrop that does not exist.
    UnknownBackdrop {
        /// The name as given.
        name: String,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::ConfigRead { path, source } => {
                write!(f, "failed to read config '{}': {}", path, source)
            }
            FieldError::ConfigParse { message } => {
                write!(f, "failed to parse config: {}", message)
            }
            FieldError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            FieldError::UnknownBackdrop { name } => {
                write!(f, "unknown backdrop '{}' (expected 'circles' or 'drift')", name)
            }
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FieldError::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for FieldError {
    fn from(err: toml::de::Error) -> Self {
        FieldError::ConfigParse {
            message: err.to_string(),
        }
    }
}

/// Convenience alias: a `Result` using `FieldError` as the error type.
pub type FieldResult<T> = Result<T, FieldError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive.
pub fn require_positive(name: &'static str, value: f32) -> FieldResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(FieldError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` lies in `(0.0, 1.0]`.
///
/// Used for per-tick retention factors: 0 would freeze every body and
/// anything above 1 feeds energy back in each frame.
pub fn require_unit_fraction(name: &'static str, value: f32) -> FieldResult<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(FieldError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, 1.0]",
        })
    }
}

/// Returns an error unless `value` is a span in seconds inside
/// `[0.0, MAX_TIMER_SECS]`.  NaN and infinities are rejected.
pub fn require_seconds(name: &'static str, value: f32) -> FieldResult<()> {
    if (0.0..=MAX_TIMER_SECS).contains(&value) {
        Ok(())
    } else {
        Err(FieldError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, 3600.0]",
        })
    }
}
