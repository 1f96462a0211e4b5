//! Error types. Expected domain refusals are values, never panics.

use thiserror::Error;

/// Why an interaction was declined. A refused call changes nothing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    #[error("not hungry")]
    NotHungry,

    #[error("too tired to play")]
    TooTired,

    #[error("doesn't want to sleep")]
    NotSleepy,

    #[error("already clean")]
    AlreadyClean,

    #[error("not in the mood to socialize")]
    NotInTheMood,

    #[error("amount must be a number between 0 and 100")]
    InvalidAmount,
}

/// Rejected stat point assignment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatError {
    #[error("unknown stat: {0}")]
    UnknownStat(String),

    #[error("invalid point count: {0}")]
    InvalidPoints(String),

    #[error("not enough stat points: requested {requested}, available {available}")]
    InsufficientPoints { requested: u32, available: u32 },
}

/// Errors that can occur during save/load
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Invalid save data: {0}")]
    Invalid(String),
}

/// Errors loading a simulation config
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {}", .0.join("; "))]
    Invalid(Vec<String>),
}
