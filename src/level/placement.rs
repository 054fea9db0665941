//! Parsed level contents

use std::fmt;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::ecs::Transform;

use super::token::{Keyword, Line};

/// Directory model base names resolve into
pub const MODEL_DIR: &str = "Assets/Models";
/// Extension appended to model base names
pub const MODEL_EXTENSION: &str = "obj";
/// Version written by the RON/JSON exporters
pub const LEVEL_FORMAT_VERSION: u32 = 1;

/// Resolve a model base name to its asset path: `Assets/Models/<name>.obj`.
#[must_use]
pub fn model_path(name: &str) -> PathBuf {
    Path::new(MODEL_DIR).join(format!("{name}.{MODEL_EXTENSION}"))
}

/// One `model` directive and the transform lines that followed it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Base name as written in the level
    pub model: String,
    /// Asset path relative to the asset root
    pub asset_path: PathBuf,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Placement {
    /// Placement at the origin with default rotation and scale
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            asset_path: model_path(&model),
            model,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Whether `model` survives being written as a `model` line and read back.
    ///
    /// Names produced by the parser always do. Names built in code or loaded
    /// from RON/JSON may carry an outranking keyword, surrounding whitespace
    /// or a line break. A later `model` word is harmless since the name is read
    /// from the first one.
    #[must_use]
    pub fn has_writable_name(&self) -> bool {
        let name = self.model.as_str();
        let line = Line::new(0, name);
        !name.is_empty()
            && name == name.trim()
            && !name.contains('\n')
            && Keyword::ALL
                .iter()
                .filter(|&&keyword| keyword != Keyword::Model)
                .all(|&keyword| line.after(keyword).is_none())
    }

    /// Initial transform for the spawned entity
    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform::from_parts(self.position, self.rotation, self.scale)
    }
}

/// A parsed level: placements in file order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Level name, usually the file stem
    pub name: String,
    /// Format version for the RON/JSON exporters
    pub version: u32,
    /// Placements in declaration order
    pub placements: Vec<Placement>,
}

impl Level {
    /// Create a new empty level
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: LEVEL_FORMAT_VERSION,
            placements: Vec::new(),
        }
    }

    /// Get the number of placements
    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Check if the level places nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Writes the level back out in the line-oriented text format.
///
/// Placements without a [writable name](Placement::has_writable_name) are left
/// out with a warning, since their `model` line would read back as a different
/// directive.
impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "arena")?;
        for placement in &self.placements {
            if !placement.has_writable_name() {
                log::warn!(
                    "Level {}: model {:?} cannot be written as text",
                    self.name,
                    placement.model
                );
                continue;
            }
            let Placement {
                model,
                position: p,
                rotation: r,
                scale: s,
                ..
            } = placement;
            writeln!(f, "model {model}")?;
            writeln!(f, "pos {} {} {}", p.x, p.y, p.z)?;
            writeln!(f, "rot {} {} {}", r.x, r.y, r.z)?;
            writeln!(f, "scl {} {} {}", s.x, s.y, s.z)?;
        }
        Ok(())
    }
}
