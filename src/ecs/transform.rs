//! Transform component with a lazily recomputed world matrix
//!
//! A [`Transform`] stores local position, Euler rotation and scale together with
//! a non-owning link to a parent entity. The world matrix is cached and only
//! rebuilt when the transform itself was mutated (the dirty flag) or when the
//! parent's world matrix was rebuilt since the last read (the parent stamp).
//!
//! Resolution walks the parent chain and lives on [`World`](super::World):
//!
//! ```ignore
//! let mut world = World::new();
//! let parent = world.spawn((Transform::from_position(Vec3::X),));
//! let child = world.spawn((Transform::from_position(Vec3::Y),));
//! world.set_parent(child, Some(parent))?;
//!
//! let matrix = world.world_matrix(child)?; // computes and caches
//! let again = world.world_matrix(child)?;  // served from the cache
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use glam::{EulerRot, Mat4, Quat, Vec3};
use hecs::Entity;
use serde::{Deserialize, Serialize};

// ============================================================================
// Transform
// ============================================================================

/// Local position/rotation/scale with a cached world matrix.
///
/// Rotation is a vector of Euler angles in radians: `x` is pitch, `y` is yaw
/// and `z` is roll. Roll is applied first, then pitch, then yaw.
///
/// The parent link is a plain [`Entity`] handle. The child never owns or
/// despawns its parent, and a despawned parent is reported as an error when
/// the world matrix is resolved.
#[derive(Debug, Serialize, Deserialize)]
pub struct Transform {
    /// Local position
    position: Vec3,
    /// Local rotation as Euler angles (radians)
    rotation: Vec3,
    /// Local scale
    scale: Vec3,

    /// Non-owning parent link
    #[serde(skip)]
    parent: Option<Entity>,

    /// Cached world matrix
    #[serde(skip)]
    world: Mat4,

    /// Set by every mutation, cleared by recomputation
    #[serde(skip, default = "start_dirty")]
    dirty: bool,

    /// Number of times the world matrix has been recomputed
    #[serde(skip)]
    revision: u64,

    /// Unique id of the last recomputation, `0` before the first one
    #[serde(skip)]
    stamp: u64,

    /// Parent stamp the cached matrix was composed against
    #[serde(skip)]
    parent_stamp: u64,
}

fn start_dirty() -> bool {
    true
}

/// Stamps are unique across all transforms, so a replaced parent component
/// can never be mistaken for the one a child cached against.
static NEXT_STAMP: AtomicU64 = AtomicU64::new(1);

impl Transform {
    /// Create a transform at the origin with unit scale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from position.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create from position, rotation, and scale.
    #[must_use]
    pub fn from_parts(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            ..Default::default()
        }
    }

    // -------------------------------------------------------------------------
    // Getters (never recompute)
    // -------------------------------------------------------------------------

    /// Get the local position.
    #[must_use]
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Get the local rotation in Euler angles.
    #[must_use]
    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Get the local scale.
    #[must_use]
    #[inline]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Get the parent entity, if any.
    #[must_use]
    #[inline]
    pub fn parent(&self) -> Option<Entity> {
        self.parent
    }

    // -------------------------------------------------------------------------
    // Setters (invalidate cache)
    // -------------------------------------------------------------------------

    /// Set the position.
    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    /// Set the rotation (Euler angles in radians).
    #[inline]
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.dirty = true;
    }

    /// Set the scale.
    #[inline]
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.dirty = true;
    }

    /// Replace the parent link. `None` detaches.
    ///
    /// No cycle check happens here; [`World::set_parent`](super::World::set_parent)
    /// is the checked entry point.
    #[inline]
    pub fn set_parent(&mut self, parent: Option<Entity>) {
        self.parent = parent;
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Matrices
    // -------------------------------------------------------------------------

    /// Local matrix: scale, then rotate, then translate.
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y,
            self.rotation.x,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }

    /// World matrix composed under the given parent world matrix.
    ///
    /// `parent_stamp` is the parent's [`stamp`](Self::stamp) (use `0` for
    /// roots). The cached matrix is returned unless this transform is dirty or
    /// the parent was recomputed since the cached value was built.
    pub fn world_matrix_under(&mut self, parent_world: Mat4, parent_stamp: u64) -> Mat4 {
        if self.dirty || self.parent_stamp != parent_stamp {
            self.world = parent_world * self.local_matrix();
            self.parent_stamp = parent_stamp;
            self.dirty = false;
            self.revision += 1;
            self.stamp = NEXT_STAMP.fetch_add(1, Ordering::Relaxed);
        }
        self.world
    }

    // -------------------------------------------------------------------------
    // Cache State
    // -------------------------------------------------------------------------

    /// Check if the transform was mutated since the last recomputation.
    #[must_use]
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of world-matrix recomputations so far.
    #[must_use]
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Identifies the current cached matrix. Changes on every recomputation.
    #[must_use]
    #[inline]
    pub fn stamp(&self) -> u64 {
        self.stamp
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            parent: None,
            world: Mat4::IDENTITY,
            dirty: true,
            revision: 0,
            stamp: 0,
            parent_stamp: 0,
        }
    }
}

/// Copies share the parent link but never the cached matrix state.
impl Clone for Transform {
    fn clone(&self) -> Self {
        Self {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
            parent: self.parent,
            ..Default::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
