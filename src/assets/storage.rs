//! Asset storage and management
//!
//! Provides per-type storage for assets with path-based deduplication.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::handle::{AssetHandle, AssetId};

/// Stored asset with the path it came from
#[derive(Debug)]
struct AssetEntry<T> {
    handle: AssetHandle<T>,
    path: PathBuf,
}

/// Centralized storage for all assets of one type
#[derive(Debug)]
pub struct Assets<T> {
    /// Assets indexed by their handle ID
    assets: FxHashMap<AssetId, AssetEntry<T>>,
    /// Path to handle ID mapping for deduplication
    path_to_id: FxHashMap<PathBuf, AssetId>,
}

impl<T> Assets<T> {
    /// Create a new empty asset storage
    #[must_use]
    pub fn new() -> Self {
        Self {
            assets: FxHashMap::default(),
            path_to_id: FxHashMap::default(),
        }
    }

    /// Return the asset stored for `path`, loading it on first use.
    ///
    /// The loader only runs when the path is not stored yet. Its error is
    /// handed back untouched and nothing is stored.
    pub fn get_or_load<E>(
        &mut self,
        path: impl AsRef<Path>,
        load: impl FnOnce(&Path) -> Result<T, E>,
    ) -> Result<AssetHandle<T>, E> {
        let path = path.as_ref();
        if let Some(handle) = self.get_by_path(path) {
            return Ok(handle);
        }

        let handle = AssetHandle::new(load(path)?);
        self.path_to_id.insert(path.to_path_buf(), handle.id());
        self.assets.insert(
            handle.id(),
            AssetEntry {
                handle: handle.clone(),
                path: path.to_path_buf(),
            },
        );
        Ok(handle)
    }

    /// Get an asset by its handle ID
    #[must_use]
    pub fn get(&self, id: AssetId) -> Option<AssetHandle<T>> {
        self.assets.get(&id).map(|entry| entry.handle.clone())
    }

    /// Get an asset by its path
    #[must_use]
    pub fn get_by_path(&self, path: impl AsRef<Path>) -> Option<AssetHandle<T>> {
        self.path_to_id
            .get(path.as_ref())
            .and_then(|&id| self.get(id))
    }

    /// Remove an asset by ID
    ///
    /// Returns true if the asset was removed. Outstanding handles stay valid.
    pub fn remove(&mut self, id: AssetId) -> bool {
        if let Some(entry) = self.assets.remove(&id) {
            self.path_to_id.remove(&entry.path);
            true
        } else {
            false
        }
    }

    /// Get the number of stored assets
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Check if storage is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl<T> Default for Assets<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_and_get() {
        let mut assets = Assets::<String>::new();
        let handle = assets
            .get_or_load("hello.txt", |_| Ok::<_, ()>("hello".to_string()))
            .unwrap();

        let retrieved = assets.get(handle.id()).unwrap();
        assert_eq!(*retrieved, "hello");
        assert_eq!(assets.get_by_path("hello.txt"), Some(handle));
    }

    #[test]
    fn test_path_deduplication() {
        let mut assets = Assets::<i32>::new();
        let mut calls = 0;

        let first = assets
            .get_or_load("Assets/Models/helix.obj", |_| {
                calls += 1;
                Ok::<_, ()>(42)
            })
            .unwrap();
        let second = assets
            .get_or_load("Assets/Models/helix.obj", |_| {
                calls += 1;
                Ok::<_, ()>(100)
            })
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(*second, 42);
        assert_eq!(calls, 1);
        assert_eq!(assets.len(), 1);
    }

    #[test]
    fn test_failed_load_stores_nothing() {
        let mut assets = Assets::<i32>::new();
        let result = assets.get_or_load("missing.obj", |_| Err("not found"));

        assert_eq!(result, Err("not found"));
        assert!(assets.is_empty());
        assert!(assets.get_by_path("missing.obj").is_none());
    }

    #[test]
    fn test_remove_clears_path() {
        let mut assets = Assets::<i32>::new();
        let handle = assets
            .get_or_load("a.obj", |_| Ok::<_, ()>(1))
            .unwrap();

        assert!(assets.remove(handle.id()));
        assert!(!assets.remove(handle.id()));
        assert!(assets.get_by_path("a.obj").is_none());
        assert_eq!(*handle, 1);
    }
}
