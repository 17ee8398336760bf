//! JSON configuration file adapter.
//!
//! Implements [`ConfigPort`] over a single JSON file.  A missing file means
//! defaults; fields absent from the file keep their defaults.  Values are
//! validated on load and on save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::app::ports::ConfigPort;
use crate::config::{PetConfig, validate_config};
use crate::error::ConfigError;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the file, writing the defaults to it first if it is missing,
    /// so there is something to edit.
    pub fn load_or_init(&self) -> Result<PetConfig, ConfigError> {
        if self.path.exists() {
            return self.load();
        }
        let defaults = PetConfig::default();
        self.save(&defaults)?;
        Ok(defaults)
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<PetConfig, ConfigError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(
                    "No config at {}, using defaults",
                    self.path.display()
                );
                return Ok(PetConfig::default());
            }
            Err(e) => return Err(e.into()),
        };
        let cfg: PetConfig = serde_json::from_str(&text)?;
        validate_config(&cfg)?;
        info!("Loaded config from {}", self.path.display());
        Ok(cfg)
    }

    fn save(&self, config: &PetConfig) -> Result<(), ConfigError> {
        validate_config(config)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, json + "\n")?;
        info!("Saved config to {}", self.path.display());
        Ok(())
    }
}
