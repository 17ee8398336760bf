//! Pet state model.
//!
//! A [`Pet`] carries three needs (hunger, happiness, energy) that decay with
//! elapsed wall-clock time and recover through player actions.  Every
//! operation is a pure function of the pet, the current time, and a
//! [`PetConfig`]; nothing here reads a clock or touches the filesystem.
//!
//! Stats are kept in `[MIN_STAT, MAX_STAT]` at the boundary of every
//! operation.  Once a pet dies it stays dead; the object remains so its
//! final state can be shown and saved.

pub mod state;

use log::{debug, info};

use crate::config::PetConfig;
use crate::error::PetError;
use state::{PetState, Transition};

/// Lower bound of every stat.
pub const MIN_STAT: f64 = 0.0;
/// Upper bound of every stat.
pub const MAX_STAT: f64 = 100.0;

/// Clamp into `[MIN_STAT, MAX_STAT]`. NaN collapses to the floor.
pub fn clamp_stat(value: f64) -> f64 {
    if value.is_nan() {
        MIN_STAT
    } else {
        value.clamp(MIN_STAT, MAX_STAT)
    }
}

/// The three needs, as one copyable value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetStats {
    pub hunger: f64,
    pub happiness: f64,
    pub energy: f64,
}

impl PetStats {
    pub const FULL: Self = Self {
        hunger: MAX_STAT,
        happiness: MAX_STAT,
        energy: MAX_STAT,
    };

    pub fn clamped(self) -> Self {
        Self {
            hunger: clamp_stat(self.hunger),
            happiness: clamp_stat(self.happiness),
            energy: clamp_stat(self.energy),
        }
    }

    /// True if every stat is finite and inside the bounds.
    pub fn in_bounds(&self) -> bool {
        [self.hunger, self.happiness, self.energy]
            .iter()
            .all(|v| (MIN_STAT..=MAX_STAT).contains(v))
    }
}

/// Result of a player action.
///
/// A rejected outcome guarantees the pet was not modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    /// Feed and play are refused while the pet sleeps.
    RejectedSleeping,
    /// Nothing is accepted once the pet has died.
    RejectedDead,
}

impl ActionOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }

    /// Player-facing reason for a rejection, `None` when applied.
    pub fn reason(self) -> Option<&'static str> {
        match self {
            Self::Applied => None,
            Self::RejectedSleeping => Some("pet is sleeping"),
            Self::RejectedDead => Some("pet has passed away"),
        }
    }
}

/// The virtual pet.
#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
    name: String,
    hunger: f64,
    happiness: f64,
    energy: f64,
    /// Seconds since the Unix epoch of the last `advance_time`.
    last_update: f64,
    /// Kept and persisted, never incremented.
    age: u32,
    is_sleeping: bool,
    is_alive: bool,
}

/// Reject names that cannot serve as a save-slot file stem.
pub fn validate_name(name: &str) -> Result<&str, PetError> {
    let trimmed = name.trim();
    let bad = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control());
    if bad {
        Err(PetError::InvalidName(name.to_owned()))
    } else {
        Ok(trimmed)
    }
}

impl Pet {
    /// A fresh pet: full stats, awake, alive, timestamped at `now_secs`.
    pub fn new(name: &str, now_secs: f64) -> Result<Self, PetError> {
        let name = validate_name(name)?;
        info!("New pet '{}' hatched", name);
        Ok(Self {
            name: name.to_owned(),
            hunger: MAX_STAT,
            happiness: MAX_STAT,
            energy: MAX_STAT,
            last_update: now_secs,
            age: 0,
            is_sleeping: false,
            is_alive: true,
        })
    }

    /// Rebuild a pet from persisted fields. The caller validates them.
    pub(crate) fn from_parts(
        name: String,
        stats: PetStats,
        last_update: f64,
        age: u32,
        is_sleeping: bool,
        is_alive: bool,
    ) -> Self {
        Self {
            name,
            hunger: stats.hunger,
            happiness: stats.happiness,
            energy: stats.energy,
            last_update,
            age,
            is_sleeping,
            is_alive,
        }
    }

    /// Seed all three stats, clamping each into bounds.
    ///
    /// Meant for setting up a pet before play starts (tests, tools). A dead
    /// pet is returned unchanged.
    #[must_use]
    pub fn with_stats(mut self, stats: PetStats) -> Self {
        if !self.is_alive {
            debug!("'{}' is dead; stats left as they are", self.name);
            return self;
        }
        let stats = stats.clamped();
        self.hunger = stats.hunger;
        self.happiness = stats.happiness;
        self.energy = stats.energy;
        self
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hunger(&self) -> f64 {
        self.hunger
    }

    pub fn happiness(&self) -> f64 {
        self.happiness
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn last_update(&self) -> f64 {
        self.last_update
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn is_sleeping(&self) -> bool {
        self.is_sleeping
    }

    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    pub fn stats(&self) -> PetStats {
        PetStats {
            hunger: self.hunger,
            happiness: self.happiness,
            energy: self.energy,
        }
    }

    pub fn state(&self) -> PetState {
        PetState::from_flags(self.is_sleeping, self.is_alive)
    }

    // ── Operations ────────────────────────────────────────────

    /// Apply decay and recovery for the time elapsed since `last_update`.
    ///
    /// 1. Hunger and happiness decay.
    /// 2. Energy recovers while asleep (waking at 100) or decays while awake.
    /// 3. The pet dies if hunger or happiness reached zero.
    /// 4. `last_update` moves forward to `now_secs`.
    ///
    /// A dead pet only gets its timestamp refreshed.  A clock that runs
    /// backwards yields zero elapsed time.  Returns the state change, if any.
    pub fn advance_time(&mut self, now_secs: f64, config: &PetConfig) -> Option<Transition> {
        let before = self.state();
        let dt = self.elapsed_until(now_secs);

        if !self.is_alive {
            self.touch(now_secs);
            return None;
        }

        self.hunger = clamp_stat(self.hunger - dt * config.hunger_rate);
        self.happiness = clamp_stat(self.happiness - dt * config.happiness_rate);

        if self.is_sleeping {
            self.energy = clamp_stat(self.energy + dt * config.sleep_energy_recovery);
            if self.energy >= MAX_STAT {
                self.is_sleeping = false;
                debug!("'{}' woke up rested", self.name);
            }
        } else {
            self.energy = clamp_stat(self.energy - dt * config.energy_rate);
        }

        if self.hunger <= MIN_STAT || self.happiness <= MIN_STAT {
            self.is_alive = false;
            info!(
                "'{}' has died (hunger={:.1}, happiness={:.1})",
                self.name, self.hunger, self.happiness
            );
        }

        self.touch(now_secs);
        Transition::between(before, self.state())
    }

    /// Raise hunger. Refused while asleep or dead.
    pub fn feed(&mut self, config: &PetConfig) -> ActionOutcome {
        let outcome = self.care_guard();
        if outcome.is_applied() {
            self.hunger = clamp_stat(self.hunger + config.feed_hunger_recovery);
        }
        outcome
    }

    /// Raise happiness at an energy cost. Refused while asleep or dead.
    ///
    /// The cost is applied (and clamped) even if energy is already low;
    /// gating on available energy belongs to the caller.
    pub fn play(&mut self, config: &PetConfig) -> ActionOutcome {
        let outcome = self.care_guard();
        if outcome.is_applied() {
            self.happiness = clamp_stat(self.happiness + config.play_happiness_recovery);
            self.energy = clamp_stat(self.energy - config.play_energy_cost);
        }
        outcome
    }

    /// Toggle sleep. Falling asleep grants an immediate energy bonus;
    /// waking changes nothing else. Refused once dead.
    pub fn sleep(&mut self, config: &PetConfig) -> ActionOutcome {
        if !self.is_alive {
            return ActionOutcome::RejectedDead;
        }
        self.is_sleeping = !self.is_sleeping;
        if self.is_sleeping {
            self.energy = clamp_stat(self.energy + config.sleep_energy_recovery);
        }
        ActionOutcome::Applied
    }

    // ── Internal ──────────────────────────────────────────────

    fn care_guard(&self) -> ActionOutcome {
        if !self.is_alive {
            ActionOutcome::RejectedDead
        } else if self.is_sleeping {
            ActionOutcome::RejectedSleeping
        } else {
            ActionOutcome::Applied
        }
    }

    fn elapsed_until(&self, now_secs: f64) -> f64 {
        let dt = now_secs - self.last_update;
        if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
    }

    /// `last_update` never moves backwards.
    fn touch(&mut self, now_secs: f64) {
        if now_secs > self.last_update {
            self.last_update = now_secs;
        }
    }
}
