//! Directional lights for the scene shader
//!
//! The scene shader takes a fixed number of directional lights. Each light
//! owns a [`Transform`] whose rotation vector doubles as the light direction.

use glam::{Vec3, Vec4};

use crate::ecs::Transform;

/// Number of light slots the scene shader exposes
pub const MAX_LIGHTS: usize = 2;

/// Directional light (like the sun)
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    /// Ambient color
    pub ambient: Vec4,
    /// Diffuse color
    pub diffuse: Vec4,
    /// Orientation; `rotation()` is read as the light direction
    pub transform: Transform,
}

impl DirectionalLight {
    /// Create a light pointing down -Y
    #[must_use]
    pub fn new(ambient: Vec4, diffuse: Vec4) -> Self {
        let mut transform = Transform::new();
        transform.set_rotation(Vec3::NEG_Y);
        Self {
            ambient,
            diffuse,
            transform,
        }
    }

    /// Point the light along `direction`
    #[must_use]
    pub fn with_direction(mut self, direction: Vec3) -> Self {
        self.transform.set_rotation(direction);
        self
    }

    /// Normalized light direction, or zero for a zero vector
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.transform.rotation().normalize_or_zero()
    }

    /// Convert to shader constants
    #[must_use]
    pub fn to_gpu(&self) -> GpuDirectionalLight {
        GpuDirectionalLight {
            ambient: self.ambient.into(),
            diffuse: self.diffuse.into(),
            direction: self.direction().into(),
            _padding: 0.0,
        }
    }
}

/// Shader-side light layout (16-byte aligned rows)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GpuDirectionalLight {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub direction: [f32; 3],
    _padding: f32,
}

/// Fixed set of light slots
#[derive(Debug, Clone, Default)]
pub struct LightSet {
    slots: [Option<DirectionalLight>; MAX_LIGHTS],
}

impl LightSet {
    /// Create an empty light set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The two lights the demo scene starts with
    #[must_use]
    pub fn demo() -> Self {
        let mut lights = Self::new();
        let direction = Vec3::new(1.0, -1.0, 0.0);
        lights.set(
            0,
            DirectionalLight::new(Vec4::new(0.1, 0.1, 0.1, 1.0), Vec4::new(0.0, 0.0, 1.0, 1.0))
                .with_direction(direction),
        );
        lights.set(
            1,
            DirectionalLight::new(Vec4::new(0.0, 0.0, 0.0, 1.0), Vec4::new(0.0, 1.0, 0.0, 1.0))
                .with_direction(direction),
        );
        lights
    }

    /// Place a light in `slot`. Out-of-range slots are ignored with a warning.
    pub fn set(&mut self, slot: usize, light: DirectionalLight) {
        match self.slots.get_mut(slot) {
            Some(entry) => *entry = Some(light),
            None => log::warn!("Light slot {slot} out of range (max {MAX_LIGHTS})"),
        }
    }

    /// Light in `slot`, if any
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&DirectionalLight> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Shader constants for every slot; empty slots are zeroed
    #[must_use]
    pub fn to_gpu(&self) -> [GpuDirectionalLight; MAX_LIGHTS] {
        std::array::from_fn(|i| {
            self.slots[i]
                .as_ref()
                .map(DirectionalLight::to_gpu)
                .unwrap_or_default()
        })
    }
}
