//! Face combination and material deduplication.
//!
//! [`FaceCombiner`] merges independently indexed mesh faces into one
//! consolidated vertex buffer with a shared material list. Materials are
//! deduplicated by value, so a material referenced by many faces occupies
//! one slot; geometry passes through verbatim as 32-bit floats.

use crate::types::{Face, Material, Shininess};
use std::collections::HashMap;
use uuid::Uuid;

/// Range of combined vertices contributed by one input face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRange {
    /// Index of the face's first vertex in the combined buffers.
    pub start: usize,
    /// Number of vertices the face contributed.
    pub vertex_count: usize,
    /// Index into [`CombinedMesh::materials`].
    pub material: usize,
}

/// The flattened accumulation of all combined faces of one prim.
#[derive(Debug, Clone, Default)]
pub struct CombinedMesh {
    /// Vertex positions, in face submission order.
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals, index-aligned with positions.
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates, index-aligned with positions.
    pub uvs: Vec<[f32; 2]>,
    /// Distinct materials; each appears exactly once however many faces
    /// reference it.
    pub materials: Vec<Material>,
    /// Per-face vertex ranges and the material index each range renders with.
    pub face_ranges: Vec<FaceRange>,
}

impl CombinedMesh {
    /// Number of combined vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of faces that contributed geometry.
    pub fn face_count(&self) -> usize {
        self.face_ranges.len()
    }

    /// Check if the mesh is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Get positions as a flat array (three floats per vertex).
    pub fn positions_flat(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| p.iter().copied()).collect()
    }

    /// Get normals as a flat array (three floats per vertex).
    pub fn normals_flat(&self) -> Vec<f32> {
        self.normals.iter().flat_map(|n| n.iter().copied()).collect()
    }

    /// Get UVs as a flat array (two floats per vertex).
    pub fn uvs_flat(&self) -> Vec<f32> {
        self.uvs.iter().flat_map(|uv| uv.iter().copied()).collect()
    }
}

/// Material dedup key.
///
/// Color components are compared by bit pattern so the key is `Eq + Hash`;
/// materials that differ in any component, shininess level or texture id
/// land in separate slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MaterialKey {
    color: [u32; 4],
    shininess: Shininess,
    texture: Option<Uuid>,
}

impl MaterialKey {
    fn of(material: &Material) -> Self {
        Self {
            color: material.color.map(f32::to_bits),
            shininess: material.shininess,
            texture: material.texture,
        }
    }
}

/// Accumulates faces one at a time into a [`CombinedMesh`].
///
/// One combiner instance serves one exported prim.
#[derive(Debug, Default)]
pub struct FaceCombiner {
    mesh: CombinedMesh,
    material_indices: HashMap<MaterialKey, usize>,
}

impl FaceCombiner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one face's geometry to the combined buffers.
    ///
    /// The face's material reuses an existing slot when an equal material
    /// was seen before. A face with no vertices contributes nothing.
    pub fn combine_face(&mut self, face: &Face) {
        if face.is_empty() {
            return;
        }

        let material = self.material_index(&face.material);
        let start = self.mesh.positions.len();

        self.mesh.positions.extend_from_slice(&face.positions);
        self.mesh.normals.extend_from_slice(&face.normals);
        self.mesh.uvs.extend_from_slice(&face.uvs);

        self.mesh.face_ranges.push(FaceRange {
            start,
            vertex_count: face.positions.len(),
            material,
        });
    }

    /// Look up the slot for a material, appending it on first sight.
    fn material_index(&mut self, material: &Material) -> usize {
        let key = MaterialKey::of(material);
        if let Some(&index) = self.material_indices.get(&key) {
            return index;
        }

        let index = self.mesh.materials.len();
        self.mesh.materials.push(material.clone());
        self.material_indices.insert(key, index);
        index
    }

    /// The mesh accumulated so far.
    pub fn mesh(&self) -> &CombinedMesh {
        &self.mesh
    }

    /// Number of vertices combined so far.
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Finish combining and take the accumulated mesh.
    pub fn finish(self) -> CombinedMesh {
        self.mesh
    }
}
