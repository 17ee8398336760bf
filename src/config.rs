//! Simulation configuration parameters
//!
//! All tunable rates for the pet simulation, plus the driver timing.
//! Values can be overridden from a JSON file through [`ConfigPort`](crate::app::ports::ConfigPort);
//! any field missing from the file keeps its default.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetConfig {
    // --- Decay (per second) ---
    /// Hunger lost per second, awake or asleep
    pub hunger_rate: f64,
    /// Happiness lost per second, always active
    pub happiness_rate: f64,
    /// Energy lost per second while awake
    pub energy_rate: f64,

    // --- Recovery ---
    /// Energy gained per second while asleep, and the one-time bonus on falling asleep
    pub sleep_energy_recovery: f64,
    /// Hunger restored by one feed
    pub feed_hunger_recovery: f64,
    /// Happiness restored by one play session
    pub play_happiness_recovery: f64,
    /// Energy spent by one play session
    pub play_energy_cost: f64,

    // --- Timing ---
    /// Driver tick interval (milliseconds)
    pub tick_interval_ms: u32,
    /// Minimum age of an unsaved tick change before it is flushed (seconds, 0 = every tick)
    pub autosave_interval_secs: u32,
    /// Ticks between status reports (0 disables them)
    pub status_interval_ticks: u32,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            // Decay
            hunger_rate: 0.5,
            happiness_rate: 0.3,
            energy_rate: 0.4,

            // Recovery
            sleep_energy_recovery: 20.0,
            feed_hunger_recovery: 30.0,
            play_happiness_recovery: 25.0,
            play_energy_cost: 15.0,

            // Timing
            tick_interval_ms: 1000, // 1 Hz
            autosave_interval_secs: 5,
            status_interval_ticks: 10,
        }
    }
}

impl PetConfig {
    /// Duration of one driver tick in seconds.
    pub fn tick_secs(&self) -> f64 {
        f64::from(self.tick_interval_ms) / 1000.0
    }
}

/// Range-check every field. Rejects rather than clamps.
pub fn validate_config(cfg: &PetConfig) -> Result<(), ConfigError> {
    let rates = [
        (cfg.hunger_rate, "hunger_rate must be finite and >= 0"),
        (cfg.happiness_rate, "happiness_rate must be finite and >= 0"),
        (cfg.energy_rate, "energy_rate must be finite and >= 0"),
        (
            cfg.sleep_energy_recovery,
            "sleep_energy_recovery must be finite and >= 0",
        ),
    ];
    for (value, msg) in rates {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::ValidationFailed(msg));
        }
    }

    let amounts = [
        (cfg.feed_hunger_recovery, "feed_hunger_recovery must be 0–100"),
        (
            cfg.play_happiness_recovery,
            "play_happiness_recovery must be 0–100",
        ),
        (cfg.play_energy_cost, "play_energy_cost must be 0–100"),
    ];
    for (value, msg) in amounts {
        if !(0.0..=100.0).contains(&value) {
            return Err(ConfigError::ValidationFailed(msg));
        }
    }

    if !(50..=60_000).contains(&cfg.tick_interval_ms) {
        return Err(ConfigError::ValidationFailed(
            "tick_interval_ms must be 50–60000",
        ));
    }
    if cfg.autosave_interval_secs > 3600 {
        return Err(ConfigError::ValidationFailed(
            "autosave_interval_secs must be 0–3600",
        ));
    }
    Ok(())
}
