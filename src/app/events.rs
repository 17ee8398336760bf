//! Outbound application events.
//!
//! The [`PetService`](super::service::PetService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log them, print them, or refresh a
//! window.

use crate::pet::state::PetState;
use crate::pet::{ActionOutcome, Pet};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum PetEvent {
    /// Periodic status snapshot.
    Status(StatusReport),

    /// The pet moved between lifecycle states.
    StateChanged { from: PetState, to: PetState },

    /// The pet died this tick.
    Died { name: String },

    /// A player action was refused.
    ActionRejected {
        action: &'static str,
        reason: &'static str,
    },

    /// A pet became the active one (loaded from its slot or hatched).
    Started {
        name: String,
        state: PetState,
        restored: bool,
    },
}

impl PetEvent {
    /// Build the rejection event for `outcome`, if it is one.
    pub fn rejection(action: &'static str, outcome: ActionOutcome) -> Option<Self> {
        outcome
            .reason()
            .map(|reason| Self::ActionRejected { action, reason })
    }
}

/// What a front end needs to redraw after each call.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub name: String,
    pub state: PetState,
    /// Stats truncated toward zero, as shown to the player.
    pub hunger: u8,
    pub happiness: u8,
    pub energy: u8,
    /// Feed and play buttons are enabled only while awake.
    pub care_enabled: bool,
    pub label: &'static str,
}

impl StatusReport {
    pub fn of(pet: &Pet) -> Self {
        let state = pet.state();
        Self {
            name: pet.name().to_owned(),
            state,
            hunger: pet.hunger() as u8,
            happiness: pet.happiness() as u8,
            energy: pet.energy() as u8,
            care_enabled: state.accepts_care(),
            label: state.label(),
        }
    }
}
