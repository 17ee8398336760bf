//! Fuzz target: `PetCommand` parsing and dispatch
//!
//! Splits the input into lines, parses each as a player command and
//! drives a live pet with whatever parses, advancing a manual clock
//! between commands.
//!
//! Invariants checked:
//! - No panics under arbitrary text
//! - Stats stay in 0..=100 after every command
//! - A dead pet never comes back except through `new`
//!
//! cargo fuzz run fuzz_command_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use tamagotchi::adapters::time::ManualClock;
use tamagotchi::app::commands::PetCommand;
use tamagotchi::app::events::PetEvent;
use tamagotchi::app::ports::{EventSink, SaveSlotPort};
use tamagotchi::app::service::PetService;
use tamagotchi::config::PetConfig;
use tamagotchi::error::StoreError;
use tamagotchi::pet::Pet;

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &PetEvent) {}
}

impl SaveSlotPort for Discard {
    fn save(&self, _pet: &Pet) -> Result<(), StoreError> {
        Ok(())
    }

    fn load(&self, _name: &str) -> Option<Pet> {
        None
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let clock = ManualClock::new(1_700_000_000.0);
    let Ok(pet) = Pet::new("Fuzz", 1_700_000_000.0) else {
        return;
    };
    let mut app = PetService::new(pet, PetConfig::default());
    let mut sink = Discard;

    for line in text.lines() {
        clock.advance(line.len() as f64);
        app.tick(&clock, &mut sink);
        let was_alive = app.pet().is_alive();

        let Ok(cmd) = line.parse::<PetCommand>() else {
            continue;
        };
        let replacing = matches!(cmd, PetCommand::NewPet(_));
        let _ = app.handle_command(cmd, &Discard, &clock, &mut sink);

        assert!(app.pet().stats().in_bounds());
        if !was_alive && !replacing {
            assert!(!app.pet().is_alive(), "dead pet revived without `new`");
        }
    }
});
