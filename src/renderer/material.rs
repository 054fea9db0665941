//! Material system for meshes

use glam::Vec3;

/// Material definition
///
/// Names a compiled vertex/pixel shader pair plus the surface constants fed to
/// it. Shader compilation and binding happen in the graphics backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Compiled vertex shader object
    pub vertex_shader: String,
    /// Compiled pixel shader object
    pub pixel_shader: String,
    /// Base color
    pub color: Vec3,
    /// Specular reflectivity (0.0 - 1.0)
    pub specular: f32,
    /// Shininess exponent
    pub shininess: f32,
}

impl Material {
    /// Create a material with the default shader pair and a color
    pub fn new(color: Vec3) -> Self {
        Self {
            vertex_shader: String::from("VertexShader.cso"),
            pixel_shader: String::from("PixelShader.cso"),
            color,
            specular: 0.5,
            shininess: 32.0,
        }
    }

    /// Use a different shader pair
    #[must_use]
    pub fn with_shaders(
        mut self,
        vertex_shader: impl Into<String>,
        pixel_shader: impl Into<String>,
    ) -> Self {
        self.vertex_shader = vertex_shader.into();
        self.pixel_shader = pixel_shader.into();
        self
    }

    /// Create a diffuse material (no specular)
    pub fn diffuse(color: Vec3) -> Self {
        Self {
            specular: 0.0,
            shininess: 1.0,
            ..Self::new(color)
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Vec3::new(0.8, 0.8, 0.8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shader_pair() {
        let material = Material::default();
        assert_eq!(material.vertex_shader, "VertexShader.cso");
        assert_eq!(material.pixel_shader, "PixelShader.cso");
    }

    #[test]
    fn test_with_shaders() {
        let material = Material::diffuse(Vec3::ONE).with_shaders("Unlit.vs", "Unlit.ps");
        assert_eq!(material.vertex_shader, "Unlit.vs");
        assert_eq!(material.specular, 0.0);
    }
}
