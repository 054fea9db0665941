//! World wrapper around hecs

use glam::Mat4;
use hecs::Entity;

use super::hierarchy::{self, Chain, HierarchyError};
use super::transform::Transform;

/// Scene world containing all entities and components
pub struct World {
    /// The underlying hecs world
    pub inner: hecs::World,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            inner: hecs::World::new(),
        }
    }

    /// Spawn an entity with the given components
    pub fn spawn(&mut self, components: impl hecs::DynamicBundle) -> Entity {
        self.inner.spawn(components)
    }

    /// Despawn an entity
    ///
    /// Children keep their now-dangling parent link and report
    /// [`HierarchyError::NoSuchEntity`] until they are reparented.
    pub fn despawn(&mut self, entity: Entity) -> Result<(), hecs::NoSuchEntity> {
        self.inner.despawn(entity)
    }

    /// Get a reference to a component
    pub fn get<T: hecs::Component>(
        &self,
        entity: Entity,
    ) -> Result<hecs::Ref<'_, T>, hecs::ComponentError> {
        self.inner.get::<&T>(entity)
    }

    /// Get a mutable reference to a component
    pub fn get_mut<T: hecs::Component>(
        &mut self,
        entity: Entity,
    ) -> Result<hecs::RefMut<'_, T>, hecs::ComponentError> {
        self.inner.get::<&mut T>(entity)
    }

    /// Check if an entity exists
    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.contains(entity)
    }

    /// Get the number of entities
    pub fn len(&self) -> u32 {
        self.inner.len()
    }

    /// Check if the world is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Query for entities with specific components
    pub fn query<Q: hecs::Query>(&self) -> hecs::QueryBorrow<'_, Q> {
        self.inner.query::<Q>()
    }

    // -------------------------------------------------------------------------
    // Hierarchy
    // -------------------------------------------------------------------------

    /// Link `child` under `parent`, or detach it with `None`.
    ///
    /// # Errors
    ///
    /// Rejects links that would make an entity its own ancestor, and entities
    /// that are missing or carry no [`Transform`].
    pub fn set_parent(
        &mut self,
        child: Entity,
        parent: Option<Entity>,
    ) -> Result<(), HierarchyError> {
        if let Some(parent) = parent {
            hierarchy::check_reparent(&self.inner, child, parent)?;
        }
        self.inner
            .get::<&mut Transform>(child)
            .map_err(|err| HierarchyError::from_component(child, err))?
            .set_parent(parent);
        Ok(())
    }

    /// Root-first parent chain ending with `entity`.
    pub fn parent_chain(&self, entity: Entity) -> Result<Chain, HierarchyError> {
        hierarchy::parent_chain(&self.inner, entity)
    }

    /// Resolve the world matrix of `entity`.
    ///
    /// Walks from the root down and recomputes only the links whose cache is
    /// stale. A clean chain performs no matrix math at all.
    ///
    /// # Errors
    ///
    /// Fails on dangling parents, missing transforms, or parent cycles.
    pub fn world_matrix(&mut self, entity: Entity) -> Result<Mat4, HierarchyError> {
        let chain = hierarchy::parent_chain(&self.inner, entity)?;

        let mut world = Mat4::IDENTITY;
        let mut stamp = 0;
        for link in chain {
            let mut transform = self
                .inner
                .get::<&mut Transform>(link)
                .map_err(|err| HierarchyError::from_component(link, err))?;
            world = transform.world_matrix_under(world, stamp);
            stamp = transform.stamp();
        }

        Ok(world)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn fresh(world: &World, entity: Entity) -> Mat4 {
        let chain = world.parent_chain(entity).unwrap();
        chain.iter().fold(Mat4::IDENTITY, |acc, &link| {
            acc * world.get::<Transform>(link).unwrap().local_matrix()
        })
    }

    fn revision(world: &World, entity: Entity) -> u64 {
        world.get::<Transform>(entity).unwrap().revision()
    }

    #[test]
    fn test_world_matrix_composes_parent() {
        let mut world = World::new();
        let parent = world.spawn((Transform::from_position(Vec3::new(10.0, 0.0, 0.0)),));
        let child = world.spawn((Transform::from_position(Vec3::new(0.0, 5.0, 0.0)),));
        world.set_parent(child, Some(parent)).unwrap();

        let m = world.world_matrix(child).unwrap();
        assert_eq!(m.w_axis.truncate(), Vec3::new(10.0, 5.0, 0.0));
    }

    #[test]
    fn test_cache_matches_fresh_after_mutations() {
        let mut world = World::new();
        let a = world.spawn((Transform::from_position(Vec3::X),));
        let b = world.spawn((Transform::new(),));
        let c = world.spawn((Transform::new(),));

        world.set_parent(b, Some(a)).unwrap();
        world.set_parent(c, Some(b)).unwrap();
        let _ = world.world_matrix(c).unwrap();

        world
            .get_mut::<Transform>(b)
            .unwrap()
            .set_rotation(Vec3::new(0.0, 1.2, 0.0));
        world
            .get_mut::<Transform>(c)
            .unwrap()
            .set_scale(Vec3::splat(2.0));
        world
            .get_mut::<Transform>(a)
            .unwrap()
            .set_position(Vec3::new(-3.0, 4.0, 1.0));
        world.set_parent(c, Some(a)).unwrap();
        world.set_parent(c, Some(b)).unwrap();

        let cached = world.world_matrix(c).unwrap();
        assert_eq!(cached, fresh(&world, c));
    }

    #[test]
    fn test_clean_chain_is_not_recomputed() {
        let mut world = World::new();
        let parent = world.spawn((Transform::from_position(Vec3::Y),));
        let child = world.spawn((Transform::from_position(Vec3::X),));
        world.set_parent(child, Some(parent)).unwrap();

        let first = world.world_matrix(child).unwrap();
        let before = (revision(&world, parent), revision(&world, child));
        let second = world.world_matrix(child).unwrap();
        let after = (revision(&world, parent), revision(&world, child));

        assert_eq!(first.to_cols_array(), second.to_cols_array());
        assert_eq!(before, after);
    }

    #[test]
    fn test_parent_mutation_invalidates_child() {
        let mut world = World::new();
        let parent = world.spawn((Transform::new(),));
        let child = world.spawn((Transform::from_position(Vec3::X),));
        world.set_parent(child, Some(parent)).unwrap();
        let _ = world.world_matrix(child).unwrap();

        world
            .get_mut::<Transform>(parent)
            .unwrap()
            .set_position(Vec3::new(0.0, 0.0, 7.0));

        let m = world.world_matrix(child).unwrap();
        assert_eq!(m.w_axis.truncate(), Vec3::new(1.0, 0.0, 7.0));
    }

    #[test]
    fn test_parent_resolved_elsewhere_still_invalidates_child() {
        let mut world = World::new();
        let parent = world.spawn((Transform::new(),));
        let child = world.spawn((Transform::from_position(Vec3::X),));
        world.set_parent(child, Some(parent)).unwrap();
        let _ = world.world_matrix(child).unwrap();

        world
            .get_mut::<Transform>(parent)
            .unwrap()
            .set_position(Vec3::Y);
        // Refresh the parent on its own first
        let _ = world.world_matrix(parent).unwrap();

        let m = world.world_matrix(child).unwrap();
        assert_eq!(m.w_axis.truncate(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_replaced_parent_component_invalidates_child() {
        let mut world = World::new();
        let parent = world.spawn((Transform::new(),));
        let child = world.spawn((Transform::from_position(Vec3::X),));
        world.set_parent(child, Some(parent)).unwrap();
        let _ = world.world_matrix(child).unwrap();

        // The fresh component starts its own recompute count from zero
        world
            .inner
            .insert_one(parent, Transform::from_position(Vec3::Z))
            .unwrap();

        let m = world.world_matrix(child).unwrap();
        assert_eq!(m, fresh(&world, child));
        assert_eq!(m.w_axis.truncate(), Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_reparent_uses_current_parent_state() {
        let mut world = World::new();
        let first = world.spawn((Transform::from_position(Vec3::X),));
        let second = world.spawn((Transform::from_position(Vec3::Y),));
        let child = world.spawn((Transform::new(),));

        world.set_parent(child, Some(first)).unwrap();
        let _ = world.world_matrix(child).unwrap();

        world.set_parent(child, Some(second)).unwrap();
        world
            .get_mut::<Transform>(second)
            .unwrap()
            .set_position(Vec3::Z);

        let m = world.world_matrix(child).unwrap();
        assert_eq!(m.w_axis.truncate(), Vec3::Z);
    }

    #[test]
    fn test_detach_returns_to_local() {
        let mut world = World::new();
        let parent = world.spawn((Transform::from_position(Vec3::X),));
        let child = world.spawn((Transform::from_position(Vec3::Y),));
        world.set_parent(child, Some(parent)).unwrap();
        let _ = world.world_matrix(child).unwrap();

        world.set_parent(child, None).unwrap();
        let m = world.world_matrix(child).unwrap();
        let local = world.get::<Transform>(child).unwrap().local_matrix();
        assert_eq!(m, Mat4::IDENTITY * local);
    }

    #[test]
    fn test_set_parent_rejects_cycle() {
        let mut world = World::new();
        let a = world.spawn((Transform::new(),));
        let b = world.spawn((Transform::new(),));
        world.set_parent(b, Some(a)).unwrap();

        assert_eq!(
            world.set_parent(a, Some(b)),
            Err(HierarchyError::Cycle {
                child: a,
                parent: b
            })
        );
        assert_eq!(
            world.set_parent(a, Some(a)),
            Err(HierarchyError::Cycle {
                child: a,
                parent: a
            })
        );
        // Rejected links leave the old parent untouched
        assert_eq!(world.get::<Transform>(a).unwrap().parent(), None);
    }

    #[test]
    fn test_hand_made_cycle_errors_instead_of_looping() {
        let mut world = World::new();
        let a = world.spawn((Transform::new(),));
        let b = world.spawn((Transform::new(),));
        world.get_mut::<Transform>(a).unwrap().set_parent(Some(b));
        world.get_mut::<Transform>(b).unwrap().set_parent(Some(a));

        assert!(matches!(
            world.world_matrix(a),
            Err(HierarchyError::Cycle { .. })
        ));
    }

    #[test]
    fn test_despawned_parent_reports_error() {
        let mut world = World::new();
        let parent = world.spawn((Transform::new(),));
        let child = world.spawn((Transform::new(),));
        world.set_parent(child, Some(parent)).unwrap();
        world.despawn(parent).unwrap();

        assert_eq!(
            world.world_matrix(child),
            Err(HierarchyError::NoSuchEntity(parent))
        );
    }
}
