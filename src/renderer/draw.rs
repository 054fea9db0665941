//! Per-frame draw list
//!
//! The graphics backend never walks the ECS itself. Once per frame it asks for
//! a [`DrawList`] and issues one draw per item, uploading `world_matrix` as the
//! model constant.

use glam::Mat4;
use hecs::Entity;

use crate::assets::{AssetHandle, Mesh};
use crate::ecs::{MeshRenderer, World};

use super::Material;

/// One mesh to draw this frame
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub entity: Entity,
    pub world_matrix: Mat4,
    pub mesh: AssetHandle<Mesh>,
    pub material: AssetHandle<Material>,
}

/// Everything drawable this frame, in entity id order.
///
/// hecs reuses the ids of despawned entities, so this matches spawn order only
/// in a world that has not despawned anything.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
}

impl DrawList {
    /// Resolve world matrices for every entity with a [`MeshRenderer`].
    ///
    /// Entities whose hierarchy cannot be resolved are left out and logged.
    pub fn collect(world: &mut World) -> Self {
        let mut renderables: Vec<(Entity, MeshRenderer)> = world
            .query::<&MeshRenderer>()
            .iter()
            .map(|(entity, renderer)| (entity, renderer.clone()))
            .collect();
        renderables.sort_by_key(|(entity, _)| entity.id());

        let mut items = Vec::with_capacity(renderables.len());
        for (entity, renderer) in renderables {
            match world.world_matrix(entity) {
                Ok(world_matrix) => items.push(DrawItem {
                    entity,
                    world_matrix,
                    mesh: renderer.mesh,
                    material: renderer.material,
                }),
                Err(e) => log::warn!("Skipping {entity:?} this frame: {e}"),
            }
        }

        Self { items }
    }

    /// Iterate over the draw items
    pub fn iter(&self) -> impl Iterator<Item = &DrawItem> {
        self.items.iter()
    }

    /// Number of draws
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there is nothing to draw
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
