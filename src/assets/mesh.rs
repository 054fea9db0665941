//! CPU-side mesh data and mesh loaders

use std::path::{Path, PathBuf};

use glam::Vec3;
use thiserror::Error;

/// Vertex with position, normal, and UV coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// A triangle mesh with vertices and indices
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh from vertices and indices
    pub fn from_data(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Create a unit cube centered at origin
    pub fn cube() -> Self {
        const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            // normal, u axis, v axis
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ];
        const CORNERS: [(f32, f32); 4] = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, u_axis, v_axis) in FACES {
            let (n, u, v) = (Vec3::from(normal), Vec3::from(u_axis), Vec3::from(v_axis));
            let base = vertices.len() as u32;
            for (du, dv) in CORNERS {
                let position = n * 0.5 + u * du + v * dv;
                vertices.push(Vertex::new(position.into(), normal, [du + 0.5, dv + 0.5]));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        Self::from_data(vertices, indices)
    }

    /// Get the number of indices
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Errors from loading mesh files
#[derive(Debug, Error)]
pub enum MeshError {
    /// The file could not be read or parsed
    #[error("failed to load mesh {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
    /// The file parsed but held no geometry
    #[error("mesh {0} contains no models")]
    Empty(PathBuf),
}

/// Turns an asset path into mesh data.
///
/// The level loader calls this once per distinct model path.
pub trait MeshLoader {
    /// Load the mesh stored at `path`
    fn load_mesh(&mut self, path: &Path) -> Result<Mesh, MeshError>;
}

/// Loads Wavefront OBJ files with `tobj`.
///
/// Every model in the file is merged into one mesh. Faces are triangulated and
/// re-indexed so positions, normals and UVs share one index buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjLoader;

impl MeshLoader for ObjLoader {
    fn load_mesh(&mut self, path: &Path) -> Result<Mesh, MeshError> {
        let (models, _materials) = tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS).map_err(
            |source| MeshError::Load {
                path: path.to_path_buf(),
                source,
            },
        )?;

        if models.is_empty() {
            return Err(MeshError::Empty(path.to_path_buf()));
        }

        let mut mesh = Mesh::default();
        for model in &models {
            let data = &model.mesh;
            let base = mesh.vertices.len() as u32;

            for (i, p) in data.positions.chunks_exact(3).enumerate() {
                let normal = data
                    .normals
                    .get(i * 3..i * 3 + 3)
                    .map_or([0.0, 0.0, 0.0], |n| [n[0], n[1], n[2]]);
                let uv = data
                    .texcoords
                    .get(i * 2..i * 2 + 2)
                    .map_or([0.0, 0.0], |t| [t[0], t[1]]);
                mesh.vertices.push(Vertex::new([p[0], p[1], p[2]], normal, uv));
            }
            mesh.indices
                .extend(data.indices.iter().map(|&index| base + index));
        }

        log::debug!(
            "Loaded {} ({} vertices, {} triangles)",
            path.display(),
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }
}

/// Hands out a unit cube for every path.
///
/// Lets a level be inspected without its model files on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct CubeLoader;

impl MeshLoader for CubeLoader {
    fn load_mesh(&mut self, _path: &Path) -> Result<Mesh, MeshError> {
        Ok(Mesh::cube())
    }
}
