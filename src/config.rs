// File: src/config.rs
use crate::core::types::MorseError;
use crate::player::Timing;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Engine settings, read from a JSON file. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub locale: String,
    /// Morse unit in milliseconds.
    pub unit_duration_ms: u64,
    /// Extra locale tables: a bincode snapshot or a JSON locale file.
    pub tables_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            unit_duration_ms: 300,
            tables_path: None,
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, MorseError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_file_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(MorseError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!("ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn timing(&self) -> Timing {
        Timing::new(Duration::from_millis(self.unit_duration_ms.max(1)))
    }
}
