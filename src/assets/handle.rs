//! Asset handle implementation
//!
//! Provides shared, id-keyed handles for referencing loaded assets.

use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for generating unique asset IDs
static NEXT_ASSET_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a stored asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(u64);

impl AssetId {
    fn next() -> Self {
        Self(NEXT_ASSET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A shared handle to an asset of type `T`.
///
/// Cloning is cheap and every clone compares equal. Components such as
/// `MeshRenderer` hold these instead of owning mesh data, so many entities can
/// draw the same mesh.
#[derive(Debug)]
pub struct AssetHandle<T> {
    id: AssetId,
    inner: Arc<T>,
}

impl<T> AssetHandle<T> {
    /// Wrap a value in a new handle with a fresh id
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            id: AssetId::next(),
            inner: Arc::new(value),
        }
    }

    /// Get the unique ID of this asset
    #[must_use]
    pub const fn id(&self) -> AssetId {
        self.id
    }

    /// Get a reference to the underlying asset
    #[must_use]
    pub fn get(&self) -> &T {
        &self.inner
    }

    /// Number of live handles to this asset
    #[must_use]
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for AssetHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for AssetHandle<T> {}

impl<T> Hash for AssetHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> std::ops::Deref for AssetHandle<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
