//! Application core: orchestration around the pet model, zero direct I/O.
//!
//! The [`service`] owns the single active pet and its configuration, runs
//! ticks, dispatches player commands, and decides when to save.  Time,
//! storage, and output all come in through the **port traits** defined in
//! [`ports`], so this layer is fully testable with in-memory adapters.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
