//! Shared types used throughout the library.

use uuid::Uuid;

/// Specular shininess level of a material surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shininess {
    /// No specular highlight.
    #[default]
    None,
    Low,
    Medium,
    High,
}

/// A renderable surface description: color, shininess, optional texture.
///
/// Materials are compared by value when faces are combined, so two faces
/// carrying equal materials end up sharing one material slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// RGBA color, each component in [0, 1].
    pub color: [f32; 4],
    /// Specular shininess level.
    pub shininess: Shininess,
    /// Texture asset id. `None` means untextured.
    pub texture: Option<Uuid>,
}

impl Material {
    pub fn untextured(color: [f32; 4], shininess: Shininess) -> Self {
        Self {
            color,
            shininess,
            texture: None,
        }
    }

    pub fn textured(color: [f32; 4], shininess: Shininess, texture: Uuid) -> Self {
        Self {
            color,
            shininess,
            texture: Some(texture),
        }
    }
}

/// One tessellated surface unit of a prim's mesh.
///
/// Positions, normals and UVs are index-aligned: the face's vertex `i` is
/// described by `positions[i]`, `normals[i]` and `uvs[i]`. Each face carries
/// exactly one material.
#[derive(Debug, Clone)]
pub struct Face {
    /// Vertex positions, pre-triangulated by the upstream tessellator.
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals.
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates.
    pub uvs: Vec<[f32; 2]>,
    /// The material this face renders with.
    pub material: Material,
}

impl Face {
    /// Create an empty face with the given material.
    pub fn new(material: Material) -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            material,
        }
    }

    /// Append one vertex, keeping the attribute arrays index-aligned.
    pub fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) {
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
    }

    /// Number of vertices in this face.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Check if the face has no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// One primitive 3D object instance being exported.
#[derive(Debug, Clone, Default)]
pub struct Prim {
    /// Pre-triangulated mesh faces.
    pub faces: Vec<Face>,
}

impl Prim {
    pub fn new(faces: Vec<Face>) -> Self {
        Self { faces }
    }
}

/// A linked set of prims exported together as one object.
#[derive(Debug, Clone, Default)]
pub struct PrimGroup {
    /// The prims making up the object, in export order.
    pub prims: Vec<Prim>,
    /// Name of the object.
    pub object_name: String,
    /// Name of the object's creator.
    pub creator_name: String,
}
