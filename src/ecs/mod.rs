//! Entity Component System module
//!
//! Built on top of the hecs ECS library

mod components;
mod hierarchy;
mod transform;
mod world;

pub use components::{MeshRenderer, Name};
pub use hierarchy::{Chain, HierarchyError, ancestors, parent_chain};
pub use transform::Transform;
pub use world::World;
