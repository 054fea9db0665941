//! Level loading errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::assets::MeshError;

/// Errors raised while reading or spawning a level
#[derive(Debug, Error)]
pub enum LevelError {
    /// The level file could not be opened or read
    #[error("failed to read level {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A `pos`/`rot`/`scl` line without three numbers (strict mode only)
    #[error("line {line}: expected three numbers after `{keyword}`, got {text:?}")]
    MalformedNumber {
        line: usize,
        keyword: &'static str,
        text: String,
    },
    /// A `model` line with nothing after the keyword (strict mode only)
    #[error("line {line}: `model` without a name")]
    EmptyModelName { line: usize },
    /// A line over the length limit (strict mode only)
    #[error("line {line}: {len} bytes exceeds the {max}-byte limit")]
    LineTooLong { line: usize, len: usize, max: usize },
    /// A placement's mesh failed to load (strict mode only)
    #[error("failed to load mesh for model `{model}`")]
    Mesh {
        model: String,
        #[source]
        source: MeshError,
    },
}
