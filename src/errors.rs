//! Error Types
//!
//! This module defines the error types used by the stage.
//!
//! # Overview
//!
//! Per-frame animation never fails: every input is an internally generated
//! floating point value. Errors only appear at the setup boundary:
//! - Settings that cannot produce a sane animation
//! - Unknown scene preset names coming from a host
//! - JSON decoding and file I/O while loading settings
//!
//! # Usage
//!
//! Fallible setup APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, StageError>`.
//!
//! ```rust,ignore
//! use myth_stage::errors::Result;
//! use myth_stage::settings::StageSettings;
//!
//! fn load() -> Result<StageSettings> {
//!     StageSettings::load("stage.json")
//! }
//! ```

use thiserror::Error;

/// The main error type for the stage.
#[derive(Error, Debug)]
pub enum StageError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A setting holds a value no animation can be built from.
    #[error("Invalid setting `{name}`: {reason}")]
    InvalidSetting {
        /// Dotted path of the offending setting
        name: &'static str,
        /// Human readable explanation
        reason: String,
    },

    /// The host asked for a scene preset that does not exist.
    #[error("Unknown scene preset: {0}")]
    UnknownPreset(String),

    // ========================================================================
    // Format & I/O Errors
    // ========================================================================
    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StageError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        StageError::InvalidSetting {
            name,
            reason: reason.into(),
        }
    }
}

/// Alias for `Result<T, StageError>`.
pub type Result<T> = std::result::Result<T, StageError>;
