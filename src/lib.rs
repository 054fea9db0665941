//! Scene core for a small real-time 3D demo
//!
//! This crate provides:
//! - Hierarchical transforms with cached, lazily rebuilt world matrices
//! - A line-oriented level format and the loader that spawns it
//! - Entity Component System (ECS) storage built on hecs
//! - Mesh assets loaded from OBJ files
//! - Lights, materials, and the per-frame draw list for a graphics backend

pub mod assets;
pub mod ecs;
pub mod level;
pub mod renderer;

// Re-exports for convenience
pub use glam;
pub use hecs;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::assets::{AssetHandle, Assets, CubeLoader, Mesh, MeshLoader, ObjLoader};
    pub use crate::ecs::{HierarchyError, MeshRenderer, Name, Transform, World};
    pub use crate::level::{Level, LevelError, LevelLoader, LevelOptions, Placement};
    pub use crate::renderer::{DirectionalLight, DrawList, LightSet, Material};
    pub use glam::{Mat4, Vec3, Vec4};
}
