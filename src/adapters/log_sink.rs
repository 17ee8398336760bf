//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (the driver routes it to stderr).  A graphical front
//! end would implement the same trait to refresh its widgets.

use log::{info, warn};

use crate::app::events::PetEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`PetEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &PetEvent) {
        match event {
            PetEvent::Status(s) => {
                info!(
                    "STATUS | {} | {} | hunger={} happiness={} energy={}",
                    s.name, s.label, s.hunger, s.happiness, s.energy,
                );
            }
            PetEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from, to);
            }
            PetEvent::Died { name } => {
                warn!("DEATH | {} has passed away...", name);
            }
            PetEvent::ActionRejected { action, reason } => {
                info!("REFUSED | cannot {}: {}", action, reason);
            }
            PetEvent::Started {
                name,
                state,
                restored,
            } => {
                info!(
                    "START | {} ({}) {}",
                    name,
                    state,
                    if *restored { "restored from save" } else { "hatched" }
                );
            }
        }
    }
}
