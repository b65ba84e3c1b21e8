//! Scene document assembly and JSON encoding.

use crate::combiner::CombinedMesh;
use crate::error::Result;
use crate::export::material::SceneMaterial;
use serde::Serialize;

/// Format tag embedded in every emitted document.
pub const FORMAT_VERSION: f32 = 3.1;

/// Metadata block of a scene document.
#[derive(Debug, Clone, Serialize)]
pub struct SceneMetadata {
    #[serde(rename = "formatVersion")]
    pub format_version: f32,
    #[serde(rename = "generatedBy")]
    pub generated_by: String,
    /// Number of vertices.
    pub vertices: usize,
    /// Number of normal triplets.
    pub normals: usize,
    /// Vertex colors are not supported; always zero.
    pub colors: usize,
    /// Number of UV pairs.
    pub uvs: usize,
    /// Number of materials.
    pub materials: usize,
    /// Morph targets are not supported; always zero.
    #[serde(rename = "morphTargets")]
    pub morph_targets: usize,
    /// Bones are not supported; always zero.
    pub bones: usize,
}

/// A complete scene document for one exported prim.
///
/// The geometry is emitted as flat buffers in combination order with no
/// triangle index data; consumers must not assume a connectivity scheme
/// beyond that ordering.
#[derive(Debug, Clone, Serialize)]
pub struct SceneDocument {
    pub metadata: SceneMetadata,
    pub scale: f32,
    pub materials: Vec<SceneMaterial>,
    /// Flat vertex positions, three floats per vertex.
    pub vertices: Vec<f32>,
    #[serde(rename = "morphTargets")]
    pub morph_targets: Vec<f32>,
    /// Flat vertex normals, three floats per vertex.
    pub normals: Vec<f32>,
    pub colors: Vec<f32>,
    /// UV channels; the schema supports several, only the first is populated.
    pub uvs: Vec<Vec<f32>>,
}

impl SceneDocument {
    /// Assemble a document from a combined mesh and its serialized materials.
    pub fn build(mesh: &CombinedMesh, materials: Vec<SceneMaterial>, generated_by: &str) -> Self {
        Self {
            metadata: SceneMetadata {
                format_version: FORMAT_VERSION,
                generated_by: generated_by.to_string(),
                vertices: mesh.vertex_count(),
                normals: mesh.normals.len(),
                colors: 0,
                uvs: mesh.uvs.len(),
                materials: materials.len(),
                morph_targets: 0,
                bones: 0,
            },
            scale: 1.0,
            materials,
            vertices: mesh.positions_flat(),
            morph_targets: Vec::new(),
            normals: mesh.normals_flat(),
            colors: Vec::new(),
            uvs: vec![mesh.uvs_flat()],
        }
    }

    /// Encode the document as a UTF-8 JSON byte buffer.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Encode the document as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
