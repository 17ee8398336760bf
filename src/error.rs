//! Error types for the pet simulation.
//!
//! One enum per concern. None of these is fatal: the service logs them and
//! carries on, and the driver decides what to surface to the user.
//! Rejected actions on a sleeping or dead pet are not errors; see
//! [`ActionOutcome`](crate::pet::ActionOutcome).

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Pet construction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PetError {
    /// The name is empty or cannot be used as a save-slot file stem.
    #[error("invalid pet name {0:?}")]
    InvalidName(String),
}

// ---------------------------------------------------------------------------
// Save slots
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StoreError {
    /// The slot file exists but is marked read-only.
    #[error("save slot {} is read-only", .0.display())]
    ReadOnly(PathBuf),

    /// The pet name cannot be mapped to a slot path.
    #[error(transparent)]
    Name(#[from] PetError),

    /// Creating the directory, writing, or renaming failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The record could not be encoded.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field is outside its accepted range.
    #[error("validation failed: {0}")]
    ValidationFailed(&'static str),

    /// The stored config could not be decoded.
    #[error("config corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
}
