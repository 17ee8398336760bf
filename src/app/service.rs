//! Application service: the hexagonal core.
//!
//! [`PetService`] owns the active [`Pet`] and its [`PetConfig`].  It
//! exposes a front-end-agnostic API: the driver calls [`tick`] about once
//! per second, forwards player actions to [`handle_command`], and asks the
//! service to persist through [`auto_save_if_needed`] /
//! [`force_save_if_dirty`].  All I/O flows through port traits injected at
//! call sites.
//!
//! ```text
//!        Clock ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                  │       PetService        │
//!  SaveSlotPort ◀─▶│   Pet · dirty tracking  │
//!                  └────────────────────────┘
//! ```
//!
//! [`tick`]: PetService::tick
//! [`handle_command`]: PetService::handle_command
//! [`auto_save_if_needed`]: PetService::auto_save_if_needed
//! [`force_save_if_dirty`]: PetService::force_save_if_dirty

use log::{debug, info, warn};

use crate::config::{PetConfig, validate_config};
use crate::error::{ConfigError, PetError};
use crate::pet::state::{PetState, Transition};
use crate::pet::{ActionOutcome, Pet, validate_name};

use super::commands::PetCommand;
use super::events::{PetEvent, StatusReport};
use super::ports::{Clock, EventSink, SaveSlotPort};

// ───────────────────────────────────────────────────────────────
// PetService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates the single active pet.
pub struct PetService {
    pet: Pet,
    config: PetConfig,
    tick_count: u64,
    dirty: bool,
    dirty_since_tick: u64,
}

impl PetService {
    /// Wrap an existing pet. Nothing is emitted or saved.
    pub fn new(pet: Pet, config: PetConfig) -> Self {
        Self {
            pet,
            config,
            tick_count: 0,
            dirty: false,
            dirty_since_tick: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Restore `name` from its save slot, or hatch a fresh pet if the slot
    /// is missing or unusable.
    pub fn load_or_create(
        name: &str,
        config: PetConfig,
        store: &impl SaveSlotPort,
        clock: &impl Clock,
        sink: &mut impl EventSink,
    ) -> Result<Self, PetError> {
        let (pet, restored) = open_pet(name, store, clock)?;
        let mut service = Self::new(pet, config);
        // A fresh pet has never been written.
        service.dirty = !restored;
        service.announce(restored, sink);
        Ok(service)
    }

    /// Save the current pet if needed, then make `name` the active pet.
    pub fn switch_pet(
        &mut self,
        name: &str,
        store: &impl SaveSlotPort,
        clock: &impl Clock,
        sink: &mut impl EventSink,
    ) -> Result<(), PetError> {
        validate_name(name)?;
        self.force_save_if_dirty(store);

        let (pet, restored) = open_pet(name, store, clock)?;
        info!("Switching from '{}' to '{}'", self.pet.name(), pet.name());
        self.pet = pet;
        self.dirty = !restored;
        self.dirty_since_tick = self.tick_count;
        self.announce(restored, sink);
        Ok(())
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Advance the pet to the clock's current time.
    ///
    /// Emits `StateChanged` (and `Died`) when the state moves, and a
    /// `Status` report every `status_interval_ticks` ticks.
    pub fn tick(&mut self, clock: &impl Clock, sink: &mut impl EventSink) {
        self.tick_count += 1;

        let transition = self.pet.advance_time(clock.now_secs(), &self.config);
        // last_update moved, so the slot is stale even without a transition.
        self.mark_dirty();

        if let Some(t) = transition {
            sink.emit(&PetEvent::StateChanged {
                from: t.from,
                to: t.to,
            });
            if t.to == PetState::Dead {
                warn!("'{}' has passed away", self.pet.name());
                sink.emit(&PetEvent::Died {
                    name: self.pet.name().to_owned(),
                });
            }
        }

        let every = u64::from(self.config.status_interval_ticks);
        if every > 0 && self.tick_count % every == 0 {
            sink.emit(&PetEvent::Status(self.status()));
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a player command.
    ///
    /// Refused actions are reported through `sink` and leave the pet as it
    /// was.  `NewPet` saves the current pet first if it has unsaved
    /// changes; an invalid name for it is the only error.
    pub fn handle_command(
        &mut self,
        cmd: PetCommand,
        store: &impl SaveSlotPort,
        clock: &impl Clock,
        sink: &mut impl EventSink,
    ) -> Result<ActionOutcome, PetError> {
        let before = self.pet.state();
        let outcome = match &cmd {
            PetCommand::Feed => self.pet.feed(&self.config),
            PetCommand::Play => self.pet.play(&self.config),
            PetCommand::ToggleSleep => self.pet.sleep(&self.config),
            PetCommand::NewPet(name) => {
                self.hatch(name, store, clock, sink)?;
                return Ok(ActionOutcome::Applied);
            }
        };

        if let Some(event) = PetEvent::rejection(cmd.verb(), outcome) {
            debug!("'{}' refused {}", self.pet.name(), cmd);
            sink.emit(&event);
            return Ok(outcome);
        }

        self.mark_dirty();
        if let Some(t) = Transition::between(before, self.pet.state()) {
            sink.emit(&PetEvent::StateChanged {
                from: t.from,
                to: t.to,
            });
        }
        Ok(outcome)
    }

    /// Replace the active pet with a fresh one named `name`.
    fn hatch(
        &mut self,
        name: &str,
        store: &impl SaveSlotPort,
        clock: &impl Clock,
        sink: &mut impl EventSink,
    ) -> Result<(), PetError> {
        let pet = Pet::new(name, clock.now_secs()).inspect_err(|e| {
            warn!("New pet refused: {}", e);
            sink.emit(&PetEvent::ActionRejected {
                action: "new",
                reason: "invalid pet name",
            });
        })?;

        self.force_save_if_dirty(store);
        if store.load(pet.name()).is_some() {
            warn!(
                "New pet '{}' will overwrite the existing save of that name",
                pet.name()
            );
        }

        self.pet = pet;
        self.dirty = true;
        self.dirty_since_tick = self.tick_count;
        self.announce(false, sink);
        Ok(())
    }

    /// Hot-swap the configuration. Invalid values are rejected.
    pub fn update_config(&mut self, config: PetConfig) -> Result<(), ConfigError> {
        validate_config(&config)?;
        self.config = config;
        info!("Configuration updated at runtime");
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    pub fn config(&self) -> &PetConfig {
        &self.config
    }

    /// Display values for the current pet.
    pub fn status(&self) -> StatusReport {
        StatusReport::of(&self.pet)
    }

    /// Total ticks executed since the service was created.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Whether the pet has changes that are not in its save slot.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ── Dirty-flag management ─────────────────────────────────

    fn mark_dirty(&mut self) {
        if !self.dirty {
            self.dirty = true;
            self.dirty_since_tick = self.tick_count;
        }
    }

    /// Save once the oldest unsaved change is `autosave_interval_secs` old.
    /// Returns `true` if the pet was saved.
    pub fn auto_save_if_needed(&mut self, store: &impl SaveSlotPort) -> bool {
        if !self.dirty {
            return false;
        }
        let ticks_since_dirty = self.tick_count.saturating_sub(self.dirty_since_tick);
        let secs_since_dirty = ticks_since_dirty as f64 * self.config.tick_secs();
        if secs_since_dirty < f64::from(self.config.autosave_interval_secs) {
            return false;
        }
        self.save(store, "auto-saved")
    }

    /// Save now if anything changed (after a command, before exit).
    /// Returns `true` if the pet was saved.
    pub fn force_save_if_dirty(&mut self, store: &impl SaveSlotPort) -> bool {
        if !self.dirty {
            return false;
        }
        self.save(store, "saved")
    }

    // ── Internal ──────────────────────────────────────────────

    fn save(&mut self, store: &impl SaveSlotPort, what: &str) -> bool {
        match store.save(&self.pet) {
            Ok(()) => {
                self.dirty = false;
                debug!("'{}' {}", self.pet.name(), what);
                true
            }
            Err(e) => {
                warn!("Saving '{}' failed: {}", self.pet.name(), e);
                false
            }
        }
    }

    fn announce(&self, restored: bool, sink: &mut impl EventSink) {
        info!(
            "Active pet '{}' ({}, {})",
            self.pet.name(),
            self.pet.state(),
            if restored { "restored" } else { "new" }
        );
        sink.emit(&PetEvent::Started {
            name: self.pet.name().to_owned(),
            state: self.pet.state(),
            restored,
        });
    }
}

fn open_pet(
    name: &str,
    store: &impl SaveSlotPort,
    clock: &impl Clock,
) -> Result<(Pet, bool), PetError> {
    match store.load(name) {
        Some(pet) => Ok((pet, true)),
        None => Ok((Pet::new(name, clock.now_secs())?, false)),
    }
}
