//! Fuzz target: `SaveRecord` decoding
//!
//! Feeds arbitrary bytes through the same path `json_store::load` takes
//! and checks that anything accepted is a well-formed pet.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - An accepted record has every stat in 0..=100 and a finite timestamp
//! - An accepted record's name matches the slot it was read for
//!
//! cargo fuzz run fuzz_save_record

#![no_main]

use libfuzzer_sys::fuzz_target;
use tamagotchi::adapters::json_store::SaveRecord;

fuzz_target!(|data: &[u8]| {
    let Ok(record) = serde_json::from_slice::<SaveRecord>(data) else {
        return;
    };
    let slot = record.name.clone();
    let Ok(pet) = record.into_pet(&slot) else {
        return;
    };

    assert!(pet.stats().in_bounds(), "accepted out-of-range stats");
    assert!(pet.last_update().is_finite());
    assert_eq!(pet.name().to_lowercase(), slot.trim().to_lowercase());
});
