//! Integration tests for the PetService → Pet → save slot pipeline.
//!
//! Time comes from a `ManualClock`, so decay is simulated without sleeping.

use crate::mock::{MemorySlots, RecordingSink};

use tamagotchi::adapters::time::ManualClock;
use tamagotchi::app::commands::PetCommand;
use tamagotchi::app::events::PetEvent;
use tamagotchi::app::service::PetService;
use tamagotchi::config::PetConfig;
use tamagotchi::pet::state::PetState;
use tamagotchi::pet::{ActionOutcome, Pet, PetStats};

const T0: f64 = 1_700_000_000.0;

fn quiet_config() -> PetConfig {
    PetConfig {
        status_interval_ticks: 0,
        ..PetConfig::default()
    }
}

fn start(slots: &MemorySlots, clock: &ManualClock) -> (PetService, RecordingSink) {
    let mut sink = RecordingSink::new();
    let app = PetService::load_or_create("Tama", quiet_config(), slots, clock, &mut sink).unwrap();
    (app, sink)
}

fn stats(hunger: f64, happiness: f64, energy: f64) -> PetStats {
    PetStats {
        hunger,
        happiness,
        energy,
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn empty_slot_hatches_fresh_pet() {
    let slots = MemorySlots::new();
    let clock = ManualClock::new(T0);
    let (app, sink) = start(&slots, &clock);

    let status = app.status();
    assert_eq!((status.hunger, status.happiness, status.energy), (100, 100, 100));
    assert_eq!(status.state, PetState::Awake);
    assert!(status.care_enabled);
    assert_eq!(app.pet().last_update(), T0);
    assert!(app.is_dirty(), "a hatched pet has not been saved yet");
    assert_eq!(
        sink.events,
        vec![PetEvent::Started {
            name: "Tama".into(),
            state: PetState::Awake,
            restored: false
        }]
    );
}

#[test]
fn saved_pet_is_restored_and_decays_for_time_away() {
    let saved = Pet::new("Tama", T0).unwrap().with_stats(stats(80.0, 80.0, 80.0));
    let slots = MemorySlots::with(saved.clone());
    let clock = ManualClock::new(T0 + 20.0);
    let (mut app, mut sink) = start(&slots, &clock);

    assert_eq!(app.pet(), &saved);
    assert!(!app.is_dirty());

    app.tick(&clock, &mut sink);
    assert!((app.pet().hunger() - 70.0).abs() < 1e-9);
    assert!((app.pet().happiness() - 74.0).abs() < 1e-9);
    assert!((app.pet().energy() - 72.0).abs() < 1e-9);
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn feed_then_save_writes_the_change() {
    let slots = MemorySlots::with(Pet::new("Tama", T0).unwrap().with_stats(stats(50.0, 90.0, 90.0)));
    let clock = ManualClock::new(T0);
    let (mut app, mut sink) = start(&slots, &clock);

    let outcome = app.handle_command(PetCommand::Feed, &slots, &clock, &mut sink).unwrap();
    assert_eq!(outcome, ActionOutcome::Applied);
    assert!(app.is_dirty());

    assert!(app.force_save_if_dirty(&slots));
    assert_eq!(slots.stored("tama").unwrap().hunger(), 80.0);
    assert!(!app.is_dirty());
    assert!(!app.force_save_if_dirty(&slots), "nothing left to save");
}

#[test]
fn care_refused_while_sleeping() {
    let slots = MemorySlots::new();
    let clock = ManualClock::new(T0);
    let (mut app, mut sink) = start(&slots, &clock);

    app.handle_command(PetCommand::ToggleSleep, &slots, &clock, &mut sink).unwrap();
    assert!(sink.events.contains(&PetEvent::StateChanged {
        from: PetState::Awake,
        to: PetState::Asleep
    }));
    assert!(!app.status().care_enabled);
    assert_eq!(app.status().label, "Sleeping...");

    let before = app.pet().clone();
    let outcome = app.handle_command(PetCommand::Feed, &slots, &clock, &mut sink).unwrap();
    assert_eq!(outcome, ActionOutcome::RejectedSleeping);
    assert_eq!(app.pet(), &before);
    assert_eq!(
        sink.events.last(),
        Some(&PetEvent::ActionRejected {
            action: "feed",
            reason: "pet is sleeping"
        })
    );
}

#[test]
fn sleeping_pet_wakes_itself_when_rested() {
    let slots = MemorySlots::with(Pet::new("Tama", T0).unwrap().with_stats(stats(90.0, 90.0, 40.0)));
    let clock = ManualClock::new(T0);
    let (mut app, mut sink) = start(&slots, &clock);

    app.handle_command(PetCommand::ToggleSleep, &slots, &clock, &mut sink).unwrap();
    assert_eq!(app.pet().energy(), 60.0);

    clock.advance(1.0);
    app.tick(&clock, &mut sink);
    assert_eq!(app.pet().state(), PetState::Asleep);

    clock.advance(1.0);
    app.tick(&clock, &mut sink);
    assert_eq!(app.pet().state(), PetState::Awake);
    assert_eq!(app.pet().energy(), 100.0);
    assert_eq!(
        sink.events.last(),
        Some(&PetEvent::StateChanged {
            from: PetState::Asleep,
            to: PetState::Awake
        })
    );
}

// ── Death ─────────────────────────────────────────────────────

#[test]
fn starving_pet_dies_and_stays_dead() {
    let slots = MemorySlots::with(Pet::new("Tama", T0).unwrap().with_stats(stats(1.0, 90.0, 90.0)));
    let clock = ManualClock::new(T0);
    let (mut app, mut sink) = start(&slots, &clock);

    clock.advance(3.0);
    app.tick(&clock, &mut sink);
    assert!(!app.pet().is_alive());
    assert_eq!(sink.count(|e| matches!(e, PetEvent::Died { .. })), 1);
    assert_eq!(app.status().label, "Your pet has passed away...");

    for cmd in [PetCommand::Feed, PetCommand::Play, PetCommand::ToggleSleep] {
        let outcome = app.handle_command(cmd, &slots, &clock, &mut sink).unwrap();
        assert_eq!(outcome, ActionOutcome::RejectedDead);
    }

    clock.advance(60.0);
    app.tick(&clock, &mut sink);
    assert!(!app.pet().is_alive());
    assert_eq!(app.pet().hunger(), 0.0);
    assert_eq!(app.pet().last_update(), T0 + 63.0);
    assert_eq!(sink.count(|e| matches!(e, PetEvent::Died { .. })), 1);
}

#[test]
fn new_pet_replaces_a_dead_one() {
    let slots = MemorySlots::with(Pet::new("Tama", T0).unwrap().with_stats(stats(0.0, 90.0, 90.0)));
    let clock = ManualClock::new(T0);
    let (mut app, mut sink) = start(&slots, &clock);
    app.tick(&clock, &mut sink);
    assert!(!app.pet().is_alive());

    clock.advance(5.0);
    let outcome = app
        .handle_command(PetCommand::NewPet("Neo".into()), &slots, &clock, &mut sink)
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Applied);
    assert_eq!(app.pet().name(), "Neo");
    assert!(app.pet().is_alive());
    assert_eq!(app.pet().last_update(), T0 + 5.0);
}

#[test]
fn new_pet_with_blank_name_is_refused() {
    let slots = MemorySlots::new();
    let clock = ManualClock::new(T0);
    let (mut app, mut sink) = start(&slots, &clock);

    assert!(app
        .handle_command(PetCommand::NewPet("   ".into()), &slots, &clock, &mut sink)
        .is_err());
    assert_eq!(app.pet().name(), "Tama");
    assert!(matches!(
        sink.events.last(),
        Some(PetEvent::ActionRejected { action: "new", .. })
    ));
}

#[test]
fn new_pet_saves_unsaved_changes_first() {
    let slots = MemorySlots::with(Pet::new("Tama", T0).unwrap().with_stats(stats(50.0, 90.0, 90.0)));
    let clock = ManualClock::new(T0);
    let (mut app, mut sink) = start(&slots, &clock);

    app.handle_command(PetCommand::Feed, &slots, &clock, &mut sink).unwrap();
    app.handle_command(PetCommand::NewPet("Neo".into()), &slots, &clock, &mut sink)
        .unwrap();
    assert_eq!(slots.stored("Tama").unwrap().hunger(), 80.0);
    assert_eq!(slots.save_count(), 1);

    assert!(app.is_dirty(), "the new pet has not been saved yet");
    assert!(app.force_save_if_dirty(&slots));
    assert_eq!(slots.stored("Neo").unwrap().stats(), PetStats::FULL);
    assert_eq!(slots.stored("Tama").unwrap().hunger(), 80.0);
}

#[test]
fn new_pet_with_taken_name_replaces_that_save_on_flush() {
    let mochi = Pet::new("Mochi", T0).unwrap().with_stats(stats(33.0, 44.0, 55.0));
    let slots = MemorySlots::with(mochi);
    let clock = ManualClock::new(T0);
    let (mut app, mut sink) = start(&slots, &clock);

    app.handle_command(PetCommand::NewPet("mochi".into()), &slots, &clock, &mut sink)
        .unwrap();
    assert_eq!(slots.stored("Mochi").unwrap().hunger(), 33.0, "not written yet");
    assert!(slots.stored("Tama").is_some(), "the hatched Tama was saved first");

    assert!(app.force_save_if_dirty(&slots));
    assert_eq!(slots.stored("Mochi").unwrap().stats(), PetStats::FULL);
}

// ── Persistence policy ────────────────────────────────────────

#[test]
fn auto_save_waits_for_interval() {
    let slots = MemorySlots::with(Pet::new("Tama", T0).unwrap());
    let clock = ManualClock::new(T0);
    let (mut app, mut sink) = start(&slots, &clock);
    assert_eq!(app.config().autosave_interval_secs, 5);

    for i in 1..=6 {
        clock.advance(1.0);
        app.tick(&clock, &mut sink);
        assert_eq!(app.auto_save_if_needed(&slots), i == 6, "tick {i}");
    }
    assert_eq!(slots.save_count(), 1);
    assert_eq!(slots.stored("Tama").unwrap().last_update(), T0 + 6.0);
}

#[test]
fn failed_save_keeps_changes_pending() {
    let slots = MemorySlots::new();
    let clock = ManualClock::new(T0);
    let (mut app, mut sink) = start(&slots, &clock);
    app.handle_command(PetCommand::Play, &slots, &clock, &mut sink).unwrap();

    slots.fail.set(true);
    assert!(!app.force_save_if_dirty(&slots));
    assert!(app.is_dirty());

    slots.fail.set(false);
    assert!(app.force_save_if_dirty(&slots));
    assert_eq!(slots.stored("tama").unwrap().energy(), 85.0);
}

#[test]
fn switch_pet_saves_current_then_loads_other() {
    let other = Pet::new("Mochi", T0 - 10.0).unwrap().with_stats(stats(33.0, 44.0, 55.0));
    let slots = MemorySlots::with(other.clone());
    let clock = ManualClock::new(T0);
    let (mut app, mut sink) = start(&slots, &clock);
    app.handle_command(PetCommand::Play, &slots, &clock, &mut sink).unwrap();

    app.switch_pet("mochi", &slots, &clock, &mut sink).unwrap();
    assert_eq!(app.pet(), &other);
    assert!(!app.is_dirty());
    assert_eq!(slots.stored("Tama").unwrap().happiness(), 100.0);
    assert_eq!(slots.stored("Tama").unwrap().energy(), 85.0);

    assert!(app.switch_pet("", &slots, &clock, &mut sink).is_err());
    assert_eq!(app.pet().name(), "Mochi");
}

#[test]
fn backwards_clock_causes_no_decay() {
    let slots = MemorySlots::with(Pet::new("Tama", T0).unwrap());
    let clock = ManualClock::new(T0);
    let (mut app, mut sink) = start(&slots, &clock);

    clock.set(T0 - 3600.0);
    app.tick(&clock, &mut sink);
    assert_eq!(app.pet().stats(), PetStats::FULL);
    assert_eq!(app.pet().last_update(), T0);
}

#[test]
fn status_reports_follow_interval() {
    let slots = MemorySlots::new();
    let clock = ManualClock::new(T0);
    let mut sink = RecordingSink::new();
    let config = PetConfig {
        status_interval_ticks: 3,
        ..PetConfig::default()
    };
    let mut app = PetService::load_or_create("Tama", config, &slots, &clock, &mut sink).unwrap();

    for _ in 0..9 {
        clock.advance(1.0);
        app.tick(&clock, &mut sink);
    }
    assert_eq!(sink.count(|e| matches!(e, PetEvent::Status(_))), 3);
}
