//! Renderer-facing scene data
//!
//! Materials, lights, and the per-frame draw list handed to the graphics
//! backend. Device setup and draw submission live in the backend.

mod draw;
mod lights;
mod material;

pub use draw::{DrawItem, DrawList};
pub use lights::{DirectionalLight, GpuDirectionalLight, LightSet, MAX_LIGHTS};
pub use material::Material;
