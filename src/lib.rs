//! Tamagotchi simulation library.
//!
//! A single virtual pet whose needs decay with real elapsed time, a small
//! set of player actions, and one JSON save slot per pet name.  The core
//! ([`pet`], [`app`]) is pure logic; time, storage, and output are reached
//! through the port traits in [`app::ports`] and implemented in
//! [`adapters`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod pet;
