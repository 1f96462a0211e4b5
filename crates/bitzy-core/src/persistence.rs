//! Save/Load functionality for persisting the creature
//!
//! A snapshot holds the durable part of the creature: needs, attributes,
//! progression and behavior state. Position, heading and the current path
//! are transient and are not saved.
//!
//! Two encodings are supported: JSON via serde_json (what the browser build
//! keeps in local storage) and compact binary via bincode. Both carry the
//! format version first, so a mismatch is detected before the rest of the
//! record is decoded.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::components::{Attributes, BehaviorState, Creature, Needs, Progression};
use crate::error::SaveError;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version, always the first field
    pub version: u32,
    /// Milliseconds since the Unix epoch when the snapshot was taken
    pub timestamp: u64,
    pub name: String,
    pub needs: Needs,
    pub attributes: Attributes,
    pub progression: Progression,
    pub behavior_state: BehaviorState,
}

impl SaveData {
    /// Snapshot the durable state of a creature
    pub fn capture(creature: &Creature) -> Self {
        Self {
            version: SAVE_VERSION,
            timestamp: now_millis(),
            name: creature.name().to_string(),
            needs: *creature.needs(),
            attributes: *creature.attributes(),
            progression: *creature.progression(),
            behavior_state: creature.state(),
        }
    }

    /// Check version and value ranges. Restoring only proceeds when this
    /// passes, so a bad snapshot never half-applies.
    pub fn validate(&self) -> Result<(), SaveError> {
        if self.version != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        if self.name.trim().is_empty() {
            return Err(SaveError::Invalid("empty creature name".into()));
        }
        if !self.needs.is_valid() {
            return Err(SaveError::Invalid(format!(
                "need out of range: {:?}",
                self.needs
            )));
        }
        if !self.progression.is_valid() {
            return Err(SaveError::Invalid(format!(
                "bad progression: level {}, exp {}, threshold {}",
                self.progression.level,
                self.progression.experience,
                self.progression.required_exp_for_next_level
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode and validate a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        let value: serde_json::Value = serde_json::from_str(json)?;

        // Read the version before the body so an old layout reports a
        // mismatch rather than a confusing field error
        let found = value
            .get("version")
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| SaveError::Invalid("missing version".into()))?;
        if found != SAVE_VERSION as u64 {
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found: u32::try_from(found).unwrap_or(u32::MAX),
            });
        }

        let data: SaveData = serde_json::from_value(value)?;
        data.validate()?;
        Ok(data)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SaveError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode and validate a binary snapshot
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SaveError> {
        let found: u32 = bincode::deserialize(bytes)?;
        if found != SAVE_VERSION {
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found,
            });
        }

        let data: SaveData = bincode::deserialize(bytes)?;
        data.validate()?;
        Ok(data)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Write a binary snapshot to a writer
pub fn save_creature<W: Write>(mut writer: W, data: &SaveData) -> Result<(), SaveError> {
    writer.write_all(&data.to_bytes()?)?;
    writer.flush()?;
    Ok(())
}

/// Read a binary snapshot from a reader
pub fn load_creature<R: Read>(mut reader: R) -> Result<SaveData, SaveError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    SaveData::from_bytes(&bytes)
}

/// Where snapshots live. The engine only talks to this trait, so the host
/// decides between memory, a file, or browser storage.
pub trait SaveStore {
    fn save(&mut self, data: &SaveData) -> Result<(), SaveError>;

    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<SaveData>, SaveError>;

    /// Returns true if there was a save to delete
    fn delete(&mut self) -> Result<bool, SaveError>;

    fn exists(&self) -> bool;
}

/// In-memory store holding one JSON snapshot
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-encoded JSON as is, e.g. an old or corrupted save
    pub fn with_raw(json: impl Into<String>) -> Self {
        Self {
            slot: Some(json.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, data: &SaveData) -> Result<(), SaveError> {
        self.slot = Some(data.to_json()?);
        Ok(())
    }

    fn load(&self) -> Result<Option<SaveData>, SaveError> {
        self.slot.as_deref().map(SaveData::from_json).transpose()
    }

    fn delete(&mut self) -> Result<bool, SaveError> {
        Ok(self.slot.take().is_some())
    }

    fn exists(&self) -> bool {
        self.slot.is_some()
    }
}

/// Store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SaveStore for FileStore {
    fn save(&mut self, data: &SaveData) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, data.to_json()?)?;
        log::debug!("Saved {} to {}", data.name, self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<SaveData>, SaveError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        SaveData::from_json(&json).map(Some)
    }

    fn delete(&mut self) -> Result<bool, SaveError> {
        if !self.path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&self.path)?;
        Ok(true)
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }
}
