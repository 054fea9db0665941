//! Level serialization and deserialization
//!
//! Supports saving and loading parsed levels in RON (Rusty Object Notation) and
//! JSON, alongside the line-oriented text format.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::placement::{LEVEL_FORMAT_VERSION, Level};

/// Errors that can occur during level export or import
#[derive(Debug, Error)]
pub enum SceneError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    /// The file was written by a different format version
    #[error(
        "unsupported level version {found} (expected {expected})",
        expected = LEVEL_FORMAT_VERSION
    )]
    UnsupportedVersion { found: u32 },
}

impl Level {
    /// Save the level to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SceneError::Serialize(e.to_string()))?;
        fs::write(path, ron_string)?;
        Ok(())
    }

    /// Load a level from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, deserialization fails, or
    /// the version does not match
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let content = fs::read_to_string(path)?;
        let level: Level =
            ron::from_str(&content).map_err(|e| SceneError::Deserialize(e.to_string()))?;
        level.check_version()
    }

    /// Save the level to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let json_string =
            serde_json::to_string_pretty(self).map_err(|e| SceneError::Serialize(e.to_string()))?;
        fs::write(path, json_string)?;
        Ok(())
    }

    /// Load a level from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, deserialization fails, or
    /// the version does not match
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let content = fs::read_to_string(path)?;
        let level: Level = serde_json::from_str(&content)
            .map_err(|e| SceneError::Deserialize(e.to_string()))?;
        level.check_version()
    }

    fn check_version(self) -> Result<Self, SceneError> {
        if self.version == LEVEL_FORMAT_VERSION {
            Ok(self)
        } else {
            Err(SceneError::UnsupportedVersion {
                found: self.version,
            })
        }
    }
}
