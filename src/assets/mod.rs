//! Asset and resource management
//!
//! Provides handle-based resource management with:
//! - Shared, id-keyed asset handles
//! - Per-type storage with path deduplication
//! - CPU-side meshes and the loaders that produce them

mod handle;
mod mesh;
mod storage;

pub use handle::{AssetHandle, AssetId};
pub use mesh::{CubeLoader, Mesh, MeshError, MeshLoader, ObjLoader, Vertex};
pub use storage::Assets;
