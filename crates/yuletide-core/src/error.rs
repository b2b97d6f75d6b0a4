//! Core error types for yuletide-core.
//!
//! This module defines the error hierarchy using thiserror. Date retrieval
//! failures are recovered by the check cycle; everything else surfaces as a
//! [`CoreError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for yuletide-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Date retrieval errors
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A recognition pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Background watch could not be spawned or panicked
    #[error("Watch error: {0}")]
    Watch(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of the host date collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The host date command could not be run
    #[error("Failed to run date command '{command}': {message}")]
    Command { command: String, message: String },

    /// No "Mon DD" prefix in the host output
    #[error("Unrecognized date output: '{raw}'")]
    Unrecognized { raw: String },

    /// Three letters that are not a month abbreviation
    #[error("Unknown month abbreviation: '{0}'")]
    InvalidMonth(String),

    /// Day outside 1..=31
    #[error("Day out of range: {0}")]
    InvalidDay(u32),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
