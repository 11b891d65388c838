use bytemuck::{Pod, Zeroable};

/// A cube corner: object-space position and RGBA color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

/// Corners of the cube spanning [-1, 1] on every axis.
#[rustfmt::skip]
pub const CUBE_VERTICES: [Vertex; 8] = [
    Vertex::new([ 1.0,  1.0,  1.0], [0.0, 1.0, 1.0, 1.0]),
    Vertex::new([-1.0,  1.0,  1.0], [0.0, 0.0, 1.0, 1.0]),
    Vertex::new([-1.0, -1.0,  1.0], [0.0, 0.0, 0.0, 1.0]),
    Vertex::new([ 1.0, -1.0,  1.0], [0.0, 1.0, 0.0, 1.0]),
    Vertex::new([ 1.0, -1.0, -1.0], [1.0, 1.0, 0.0, 1.0]),
    Vertex::new([ 1.0,  1.0, -1.0], [1.0, 1.0, 1.0, 1.0]),
    Vertex::new([-1.0,  1.0, -1.0], [1.0, 0.0, 1.0, 1.0]),
    Vertex::new([-1.0, -1.0, -1.0], [1.0, 0.0, 0.0, 1.0]),
];

/// Two triangles per face, six faces.
#[rustfmt::skip]
pub const CUBE_INDICES: [u32; 36] = [
    0, 1, 2,  0, 2, 3,
    0, 3, 4,  0, 4, 5,
    0, 5, 6,  0, 6, 1,
    1, 6, 7,  1, 7, 2,
    7, 4, 3,  7, 3, 2,
    4, 7, 6,  4, 6, 5,
];

/// Errors from mesh validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("index count {len} is not a multiple of 3")]
    NotTriangles { len: usize },
}

/// Indexed triangle list with immutable vertex attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeMesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl CubeMesh {
    /// The color cube used by the demo.
    pub fn color_cube() -> Self {
        Self {
            vertices: CUBE_VERTICES.to_vec(),
            indices: CUBE_INDICES.to_vec(),
        }
    }

    /// Build a mesh from arbitrary tables, rejecting dangling indices.
    pub fn from_parts(vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self, MeshError> {
        let mesh = Self { vertices, indices };
        mesh.validate()?;
        Ok(mesh)
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::NotTriangles {
                len: self.indices.len(),
            });
        }
        let vertex_count = self.vertices.len();
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            });
        }
        Ok(())
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
