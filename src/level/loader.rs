//! Turns parsed levels into entities

use std::path::Path;

use hecs::Entity;

use crate::assets::{AssetHandle, Assets, Mesh, MeshLoader};
use crate::ecs::{MeshRenderer, Name, World};
use crate::renderer::Material;

use super::error::LevelError;
use super::options::LevelOptions;
use super::parser;
use super::placement::Level;

/// Spawns level placements into a [`World`].
///
/// Owns the mesh storage so every distinct model path is loaded once, no matter
/// how many placements reference it. All spawned entities share one material.
pub struct LevelLoader<L> {
    options: LevelOptions,
    loader: L,
    meshes: Assets<Mesh>,
    material: AssetHandle<Material>,
}

impl<L: MeshLoader> LevelLoader<L> {
    /// Create a loader using the default material
    pub fn new(loader: L, options: LevelOptions) -> Self {
        Self {
            options,
            loader,
            meshes: Assets::new(),
            material: AssetHandle::new(Material::default()),
        }
    }

    /// Use a different material for spawned entities
    #[must_use]
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = AssetHandle::new(material);
        self
    }

    /// Loaded meshes, keyed by path
    pub fn meshes(&self) -> &Assets<Mesh> {
        &self.meshes
    }

    /// Active options
    pub fn options(&self) -> &LevelOptions {
        &self.options
    }

    /// Parse a level file and spawn it.
    ///
    /// Returns the spawned entities in file order.
    pub fn load(
        &mut self,
        path: impl AsRef<Path>,
        world: &mut World,
    ) -> Result<Vec<Entity>, LevelError> {
        let level = parser::parse_file(path, &self.options)?;
        self.spawn(&level, world)
    }

    /// Spawn every placement of `level`, in order.
    ///
    /// Each entity gets a [`Name`], its initial [`Transform`](crate::ecs::Transform)
    /// and a [`MeshRenderer`]. A placement whose mesh fails to load is skipped
    /// with an error log, or aborts the spawn in strict mode. Entities spawned
    /// before a strict failure stay in the world.
    pub fn spawn(&mut self, level: &Level, world: &mut World) -> Result<Vec<Entity>, LevelError> {
        let mut spawned = Vec::with_capacity(level.len());

        for placement in &level.placements {
            let path = self.options.asset_root.join(&placement.asset_path);
            let loader = &mut self.loader;
            let mesh = match self.meshes.get_or_load(&path, |path| loader.load_mesh(path)) {
                Ok(mesh) => mesh,
                Err(source) if self.options.strict => {
                    return Err(LevelError::Mesh {
                        model: placement.model.clone(),
                        source,
                    });
                }
                Err(e) => {
                    log::error!("Skipping model `{}`: {e}", placement.model);
                    continue;
                }
            };

            let entity = world.spawn((
                Name::new(placement.model.as_str()),
                placement.transform(),
                MeshRenderer::new(mesh, self.material.clone()),
            ));
            spawned.push(entity);
        }

        log::info!(
            "Spawned {} of {} placements from level `{}` ({} meshes)",
            spawned.len(),
            level.len(),
            level.name,
            self.meshes.len()
        );
        Ok(spawned)
    }
}
