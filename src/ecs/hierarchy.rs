//! Parent chain walking for transform propagation.
//!
//! Parents are stored child-side only ([`Transform::parent`]); nothing on the
//! parent tracks its children. Chains are collected bottom-up and checked for
//! repeats so a malformed graph surfaces as [`HierarchyError::Cycle`] instead of
//! looping forever.

use hecs::Entity;
use smallvec::SmallVec;
use thiserror::Error;

use super::transform::Transform;

/// Entities along a parent chain
pub type Chain = SmallVec<[Entity; 8]>;

/// Errors from hierarchy lookups and reparenting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// The entity was despawned or never existed
    #[error("entity {0:?} does not exist")]
    NoSuchEntity(Entity),
    /// The entity exists but carries no transform
    #[error("entity {0:?} has no transform")]
    MissingTransform(Entity),
    /// Linking `child` under `parent` closes a loop
    #[error("parenting {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Entity being parented
        child: Entity,
        /// Proposed or encountered parent
        parent: Entity,
    },
}

impl HierarchyError {
    pub(crate) fn from_component(entity: Entity, err: hecs::ComponentError) -> Self {
        match err {
            hecs::ComponentError::NoSuchEntity => Self::NoSuchEntity(entity),
            hecs::ComponentError::MissingComponent(_) => Self::MissingTransform(entity),
        }
    }
}

/// Read the parent link of `entity`.
pub fn parent_of(world: &hecs::World, entity: Entity) -> Result<Option<Entity>, HierarchyError> {
    world
        .get::<&Transform>(entity)
        .map(|transform| transform.parent())
        .map_err(|err| HierarchyError::from_component(entity, err))
}

/// Collect the ancestors of `entity`, nearest parent first.
///
/// # Errors
///
/// Fails if any link is dangling, lacks a transform, or loops back.
pub fn ancestors(world: &hecs::World, entity: Entity) -> Result<Chain, HierarchyError> {
    let mut chain = Chain::new();
    let mut current = entity;

    while let Some(parent) = parent_of(world, current)? {
        if parent == entity || chain.contains(&parent) {
            return Err(HierarchyError::Cycle {
                child: current,
                parent,
            });
        }
        chain.push(parent);
        current = parent;
    }

    Ok(chain)
}

/// Root-first chain ending with `entity` itself.
pub fn parent_chain(world: &hecs::World, entity: Entity) -> Result<Chain, HierarchyError> {
    let mut chain = ancestors(world, entity)?;
    chain.reverse();
    chain.push(entity);
    Ok(chain)
}

/// Check that `parent` may become the parent of `child`.
pub fn check_reparent(
    world: &hecs::World,
    child: Entity,
    parent: Entity,
) -> Result<(), HierarchyError> {
    if !world.contains(child) {
        return Err(HierarchyError::NoSuchEntity(child));
    }
    if parent == child || ancestors(world, parent)?.contains(&child) {
        return Err(HierarchyError::Cycle { child, parent });
    }
    Ok(())
}
