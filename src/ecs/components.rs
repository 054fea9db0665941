//! Common ECS components

use crate::assets::{AssetHandle, Mesh};
use crate::renderer::Material;

/// Name component for debugging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Marks an entity as drawable with a mesh and material
#[derive(Debug, Clone)]
pub struct MeshRenderer {
    pub mesh: AssetHandle<Mesh>,
    pub material: AssetHandle<Material>,
}

impl MeshRenderer {
    pub fn new(mesh: AssetHandle<Mesh>, material: AssetHandle<Material>) -> Self {
        Self { mesh, material }
    }
}
