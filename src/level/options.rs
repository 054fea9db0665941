//! Level loading configuration

use std::path::PathBuf;

/// Default per-line limit in bytes, one less than the historical 400-byte buffer
pub const DEFAULT_MAX_LINE_LEN: usize = 399;

/// Level loading configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelOptions {
    /// Lines longer than this many bytes are truncated
    pub max_line_len: usize,
    /// Turn recoverable anomalies into errors instead of warnings
    pub strict: bool,
    /// Directory that `Assets/Models/...` paths are resolved against
    pub asset_root: PathBuf,
}

impl Default for LevelOptions {
    fn default() -> Self {
        Self {
            max_line_len: DEFAULT_MAX_LINE_LEN,
            strict: false,
            asset_root: PathBuf::new(),
        }
    }
}

impl LevelOptions {
    /// Set the per-line limit
    pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    /// Enable or disable strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the asset root directory
    pub fn with_asset_root(mut self, asset_root: impl Into<PathBuf>) -> Self {
        self.asset_root = asset_root.into();
        self
    }
}
