//! JSON save-slot adapter.
//!
//! One human-readable JSON file per pet at `<dir>/<name-lowercased>.json`.
//! Implements [`SaveSlotPort`] through [`JsonSaveStore`]; the free
//! functions [`save`] and [`load`] are the same operations for callers that
//! hold only a directory.
//!
//! # Guarantees
//!
//! - Atomic writes: the record goes to a temp file in the same directory,
//!   is synced, then renamed over the slot.  A failed save never leaves a
//!   half-written slot behind.
//! - `load` never fails past this boundary.  Missing, unreadable, and
//!   malformed slots all come back as `None`; anything other than "not
//!   found" is logged.
//! - Floats round-trip exactly (serde_json `float_roundtrip`).
//! - Records carry `"version": 1`.  Records without a version (the legacy
//!   shape) are read as version 1; newer versions are refused.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::app::ports::SaveSlotPort;
use crate::error::{PetError, StoreError};
use crate::pet::{Pet, PetStats, validate_name};

/// File extension of every save slot.
pub const SLOT_EXTENSION: &str = "json";

/// Newest record layout this build reads and the one it writes.
pub const RECORD_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// On-disk shape of a save slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    pub name: String,
    pub hunger: f64,
    pub happiness: f64,
    pub energy: f64,
    /// Seconds since the Unix epoch.
    pub last_update: f64,
    pub age: u32,
    pub is_sleeping: bool,
    pub is_alive: bool,
}

impl From<&Pet> for SaveRecord {
    fn from(pet: &Pet) -> Self {
        Self {
            version: Some(RECORD_VERSION),
            name: pet.name().to_owned(),
            hunger: pet.hunger(),
            happiness: pet.happiness(),
            energy: pet.energy(),
            last_update: pet.last_update(),
            age: pet.age(),
            is_sleeping: pet.is_sleeping(),
            is_alive: pet.is_alive(),
        }
    }
}

impl SaveRecord {
    /// Check the record and rebuild the pet it describes.
    ///
    /// `slot_name` is the name the slot was looked up by; the stored name
    /// must match it case-insensitively.
    pub fn into_pet(self, slot_name: &str) -> Result<Pet, &'static str> {
        if self.version.unwrap_or(1) > RECORD_VERSION {
            return Err("unsupported record version");
        }
        let stored = validate_name(&self.name).map_err(|_| "invalid name")?;
        if stored.to_lowercase() != slot_name.trim().to_lowercase() {
            return Err("name does not match save slot");
        }
        let stats = PetStats {
            hunger: self.hunger,
            happiness: self.happiness,
            energy: self.energy,
        };
        if !stats.in_bounds() {
            return Err("stat outside 0-100");
        }
        if !self.last_update.is_finite() {
            return Err("last_update is not a finite timestamp");
        }
        Ok(Pet::from_parts(
            stored.to_owned(),
            stats,
            self.last_update,
            self.age,
            self.is_sleeping,
            self.is_alive,
        ))
    }
}

// ---------------------------------------------------------------------------
// Free-function API
// ---------------------------------------------------------------------------

/// Path of the save slot for `name` under `dir`.
pub fn slot_path(name: &str, dir: &Path) -> Result<PathBuf, PetError> {
    let stem = validate_name(name)?.to_lowercase();
    Ok(dir.join(format!("{stem}.{SLOT_EXTENSION}")))
}

/// Write `pet` to its slot under `dir`, creating `dir` if needed.
///
/// Fails if the slot exists but is read-only, or if any write step fails.
/// Returns the slot path.
pub fn save(pet: &Pet, dir: &Path) -> Result<PathBuf, StoreError> {
    let path = slot_path(pet.name(), dir)?;
    fs::create_dir_all(dir).map_err(io_at(dir))?;

    if let Ok(meta) = fs::metadata(&path) {
        if meta.permissions().readonly() {
            return Err(StoreError::ReadOnly(path));
        }
    }

    let mut json = serde_json::to_string_pretty(&SaveRecord::from(pet))?;
    json.push('\n');

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_at(dir))?;
    tmp.write_all(json.as_bytes()).map_err(io_at(tmp.path()))?;
    tmp.as_file().sync_all().map_err(io_at(tmp.path()))?;
    tmp.persist(&path).map_err(|e| StoreError::Io {
        path: path.clone(),
        source: e.error,
    })?;

    debug!("Saved '{}' to {}", pet.name(), path.display());
    Ok(path)
}

/// Read the pet stored under `name` in `dir`.
///
/// `None` if the slot is missing, unreadable, or does not hold a valid
/// record.
pub fn load(name: &str, dir: &Path) -> Option<Pet> {
    let path = match slot_path(name, dir) {
        Ok(path) => path,
        Err(e) => {
            warn!("Cannot look up save slot: {}", e);
            return None;
        }
    };

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No save slot at {}", path.display());
            return None;
        }
        Err(e) => {
            warn!("Cannot read {}: {}", path.display(), e);
            return None;
        }
    };

    let record: SaveRecord = match serde_json::from_str(&text) {
        Ok(record) => record,
        Err(e) => {
            warn!("Ignoring malformed save {}: {}", path.display(), e);
            return None;
        }
    };

    match record.into_pet(name) {
        Ok(pet) => {
            info!("Loaded '{}' from {}", pet.name(), path.display());
            Some(pet)
        }
        Err(reason) => {
            warn!("Ignoring invalid save {}: {}", path.display(), reason);
            None
        }
    }
}

fn io_at(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Port adapter
// ---------------------------------------------------------------------------

/// Save slots in one directory.
#[derive(Debug, Clone)]
pub struct JsonSaveStore {
    dir: PathBuf,
}

impl JsonSaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names (slot stems) of every save in the directory, sorted.
    /// A missing directory has no saves.
    pub fn list(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!("Cannot list {}: {}", self.dir.display(), e);
                }
                return Vec::new();
            }
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == SLOT_EXTENSION))
            .filter_map(|p| p.file_stem()?.to_str().map(str::to_owned))
            .collect();
        names.sort();
        names
    }

    /// Remove the slot for `name`. Returns whether a file was removed.
    pub fn delete(&self, name: &str) -> Result<bool, StoreError> {
        let path = slot_path(name, &self.dir)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Deleted save {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

impl SaveSlotPort for JsonSaveStore {
    fn save(&self, pet: &Pet) -> Result<(), StoreError> {
        save(pet, &self.dir).map(|_| ())
    }

    fn load(&self, name: &str) -> Option<Pet> {
        load(name, &self.dir)
    }
}
