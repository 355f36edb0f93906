//! Error types for the fittrack_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fittrack_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// No session template with this id
    #[error("Unknown workout session: {0}")]
    UnknownSession(String),

    /// Template cannot be started (e.g. an exercise without sets)
    #[error("Invalid workout template '{id}': {reason}")]
    InvalidTemplate { id: String, reason: String },

    /// A workout is already running
    #[error("Workout '{0}' is already in progress")]
    WorkoutInProgress(String),

    /// Operation needs an active workout
    #[error("No active workout")]
    NoActiveWorkout,

    /// Generic error
    #[error("{0}")]
    Other(String),
}
