//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PetService (domain)
//! ```
//!
//! Driven adapters (clock, save slots, config file, event sinks) implement
//! these traits.  The [`PetService`](super::service::PetService) consumes
//! them via generics at call sites, so the domain core never reads the
//! wall clock or touches the filesystem directly.

use crate::config::PetConfig;
use crate::error::{ConfigError, StoreError};
use crate::pet::Pet;

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: time source → domain)
// ───────────────────────────────────────────────────────────────

/// Source of the current time for `advance_time`.
pub trait Clock {
    /// Seconds since the Unix epoch.
    fn now_secs(&self) -> f64;
}

// ───────────────────────────────────────────────────────────────
// Save slot port (driven adapter: domain ↔ durable storage)
// ───────────────────────────────────────────────────────────────

/// One save slot per pet name, matched case-insensitively.
///
/// Writes MUST be atomic: a failed save leaves the previous record intact.
pub trait SaveSlotPort {
    /// Persist a snapshot of `pet` into its slot.
    fn save(&self, pet: &Pet) -> Result<(), StoreError>;

    /// Load the pet stored under `name`.
    ///
    /// Missing, unreadable, and malformed slots all yield `None`.
    fn load(&self, name: &str) -> Option<Pet>;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists simulation configuration.
///
/// Implementations MUST validate values with
/// [`validate_config`](crate::config::validate_config) on both paths;
/// invalid ranges are rejected, not clamped.
pub trait ConfigPort {
    /// Load configuration. Returns [`PetConfig::default()`] if none is stored.
    fn load(&self) -> Result<PetConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &PetConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → UI / logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`PetEvent`](super::events::PetEvent)s
/// through this port.  Adapters decide where they go (log, terminal, a
/// GUI's status bar).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::PetEvent);
}
