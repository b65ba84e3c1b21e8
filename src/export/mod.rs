//! Scene export.
//!
//! The orchestrator drives one [`FaceCombiner`] and a shared
//! [`TextureExportCache`] per prim, serializes each prim into its own JSON
//! document and stitches the per-prim pieces into a single [`ExportResult`].

pub mod document;
pub mod material;

pub use document::{SceneDocument, SceneMetadata, FORMAT_VERSION};
pub use material::{serialize_material, SceneMaterial};

use crate::cache::TextureExportCache;
use crate::combiner::FaceCombiner;
use crate::error::Result;
use crate::texture::TextureSource;
use crate::types::{Prim, PrimGroup};
use std::path::PathBuf;
use uuid::Uuid;

/// Exporter configuration.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory texture files are written to.
    pub output_dir: PathBuf,
    /// Maximum texture edge length in pixels.
    pub max_texture_size: u32,
    /// Value of the documents' `generatedBy` metadata tag.
    pub generated_by: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: std::env::temp_dir(),
            max_texture_size: 512,
            generated_by: "prim-exporter".to_string(),
        }
    }
}

impl ExportConfig {
    /// Create a config writing texture files into `output_dir`.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }
}

/// Result of exporting a prim or a group of prims.
///
/// `documents[i]` is the scene document for `source_prims[i]`; the two
/// sequences stay aligned through [`combine`](ExportResult::combine).
#[derive(Debug, Clone, Default)]
pub struct ExportResult {
    /// UTF-8 encoded JSON documents, one per exported prim, in input order.
    pub documents: Vec<Vec<u8>>,
    /// The prims the documents were generated from, in the same order.
    pub source_prims: Vec<Prim>,
    /// Paths of all texture files written during the export.
    pub texture_files: Vec<PathBuf>,
    /// Name of the exported object. Absent for single-prim export.
    pub object_name: Option<String>,
    /// Name of the object's creator. Absent for single-prim export.
    pub creator_name: Option<String>,
}

impl ExportResult {
    /// Append another result, preserving document/prim alignment.
    pub fn combine(&mut self, other: ExportResult) {
        self.documents.extend(other.documents);
        self.source_prims.extend(other.source_prims);
        self.texture_files.extend(other.texture_files);
    }
}

/// Export every prim of a group into one result.
///
/// Textures are deduplicated across the whole group: a texture id shared by
/// several prims is fetched and written to disk once. Object naming
/// metadata is carried over from the group.
pub fn export_group(
    source: &dyn TextureSource,
    group: &PrimGroup,
    config: &ExportConfig,
) -> Result<ExportResult> {
    std::fs::create_dir_all(&config.output_dir)?;
    let mut cache = TextureExportCache::new(&config.output_dir, config.max_texture_size);

    let mut result = ExportResult::default();
    for prim in &group.prims {
        result.combine(export_single(source, prim, &mut cache, config)?);
    }

    result.texture_files = cache.into_written_files();
    result.object_name = Some(group.object_name.clone());
    result.creator_name = Some(group.creator_name.clone());

    Ok(result)
}

/// Export one prim with its own texture cache.
pub fn export_prim(
    source: &dyn TextureSource,
    prim: &Prim,
    config: &ExportConfig,
) -> Result<ExportResult> {
    std::fs::create_dir_all(&config.output_dir)?;
    let mut cache = TextureExportCache::new(&config.output_dir, config.max_texture_size);

    let mut result = export_single(source, prim, &mut cache, config)?;
    result.texture_files = cache.into_written_files();

    Ok(result)
}

/// Export one prim against a shared texture cache.
fn export_single(
    source: &dyn TextureSource,
    prim: &Prim,
    cache: &mut TextureExportCache,
    config: &ExportConfig,
) -> Result<ExportResult> {
    let mut combiner = FaceCombiner::new();
    for face in &prim.faces {
        combiner.combine_face(face);
    }
    let mesh = combiner.finish();

    // Fresh id namespacing this prim's texture file names, so prims exported
    // into the same directory cannot collide.
    let prim_id = Uuid::new_v4();

    let mut materials = Vec::with_capacity(mesh.materials.len());
    for (i, mat) in mesh.materials.iter().enumerate() {
        let tracked = mat.texture.map(|id| {
            let file_name = format!("tex_mat_{prim_id}_{i}.png");
            cache.resolve(source, id, &file_name)
        });
        materials.push(serialize_material(mat, tracked.as_ref()));
    }

    let document = SceneDocument::build(&mesh, materials, &config.generated_by);

    Ok(ExportResult {
        documents: vec![document.to_json_bytes()?],
        source_prims: vec![prim.clone()],
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TextureData;
    use crate::types::{Face, Material, Shininess};
    use std::cell::Cell;

    struct CountingSource {
        calls: Cell<usize>,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
            }
        }
    }

    impl TextureSource for CountingSource {
        fn load_texture(&self, _id: Uuid) -> Option<TextureData> {
            self.calls.set(self.calls.get() + 1);
            Some(TextureData::new(2, 2, vec![255; 16]))
        }
    }

    /// Store with no textures at all.
    struct EmptySource;

    impl TextureSource for EmptySource {
        fn load_texture(&self, _id: Uuid) -> Option<TextureData> {
            None
        }
    }

    fn triangle(material: Material) -> Face {
        let mut face = Face::new(material);
        face.push_vertex([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]);
        face.push_vertex([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0]);
        face.push_vertex([0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 1.0]);
        face
    }

    fn textured_prim(id: Uuid) -> Prim {
        Prim::new(vec![triangle(Material::textured(
            [1.0, 1.0, 1.0, 1.0],
            Shininess::None,
            id,
        ))])
    }

    fn config_in(dir: &std::path::Path) -> ExportConfig {
        ExportConfig::with_output_dir(dir)
    }

    #[test]
    fn test_export_prim_produces_one_document() {
        let dir = tempfile::tempdir().unwrap();
        let prim = Prim::new(vec![triangle(Material::untextured(
            [1.0, 0.0, 0.0, 1.0],
            Shininess::Low,
        ))]);

        let result = export_prim(&EmptySource, &prim, &config_in(dir.path())).unwrap();

        assert_eq!(result.documents.len(), 1);
        assert_eq!(result.source_prims.len(), 1);
        assert!(result.texture_files.is_empty());
        assert_eq!(result.object_name, None);
        assert_eq!(result.creator_name, None);

        let json: serde_json::Value = serde_json::from_slice(&result.documents[0]).unwrap();
        let mat = &json.get("materials").unwrap().as_array().unwrap()[0];
        assert_eq!(
            mat.get("colorSpecular").unwrap().as_array().unwrap()[0]
                .as_f64()
                .unwrap(),
            0.25
        );
        assert!(mat.get("mapDiffuse").unwrap().is_null());
    }

    #[test]
    fn test_shared_texture_written_once_across_prims() {
        let dir = tempfile::tempdir().unwrap();
        let texture_id = Uuid::new_v4();
        let group = PrimGroup {
            prims: vec![textured_prim(texture_id), textured_prim(texture_id)],
            object_name: "Chair".to_string(),
            creator_name: "Resident".to_string(),
        };

        let source = CountingSource::new();
        let result = export_group(&source, &group, &config_in(dir.path())).unwrap();

        assert_eq!(result.documents.len(), 2);
        assert_eq!(result.source_prims.len(), 2);
        assert_eq!(source.calls.get(), 1);
        assert_eq!(result.texture_files.len(), 1);
        assert!(result.texture_files[0].exists());
        assert_eq!(result.object_name.as_deref(), Some("Chair"));
        assert_eq!(result.creator_name.as_deref(), Some("Resident"));
    }

    #[test]
    fn test_distinct_textures_each_written() {
        let dir = tempfile::tempdir().unwrap();
        let group = PrimGroup {
            prims: vec![textured_prim(Uuid::new_v4()), textured_prim(Uuid::new_v4())],
            object_name: String::new(),
            creator_name: String::new(),
        };

        let source = CountingSource::new();
        let result = export_group(&source, &group, &config_in(dir.path())).unwrap();

        assert_eq!(source.calls.get(), 2);
        assert_eq!(result.texture_files.len(), 2);
    }

    #[test]
    fn test_texture_file_names_are_namespaced() {
        let dir = tempfile::tempdir().unwrap();
        let source = CountingSource::new();
        let prim = textured_prim(Uuid::new_v4());

        let result = export_prim(&source, &prim, &config_in(dir.path())).unwrap();

        let name = result.texture_files[0]
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        assert!(name.starts_with("tex_mat_"));
        assert!(name.ends_with("_0.png"));
    }

    #[test]
    fn test_missing_texture_degrades_material() {
        let dir = tempfile::tempdir().unwrap();
        let prim = textured_prim(Uuid::new_v4());

        let result = export_prim(&EmptySource, &prim, &config_in(dir.path())).unwrap();

        assert!(result.texture_files.is_empty());
        let json: serde_json::Value = serde_json::from_slice(&result.documents[0]).unwrap();
        let mat = &json.get("materials").unwrap().as_array().unwrap()[0];
        assert!(mat.get("mapDiffuse").unwrap().is_null());
        assert!(mat.get("mapDiffuseWrap").unwrap().is_null());
        assert!(!mat.get("transparent").unwrap().as_bool().unwrap());
        assert_eq!(mat.get("shading").unwrap().as_str().unwrap(), "Phong");
    }

    #[test]
    fn test_group_export_is_multi_prim_combination() {
        let dir = tempfile::tempdir().unwrap();
        let group = PrimGroup {
            prims: vec![
                Prim::new(vec![triangle(Material::untextured(
                    [1.0, 0.0, 0.0, 1.0],
                    Shininess::None,
                ))]),
                Prim::new(Vec::new()),
            ],
            object_name: "Pair".to_string(),
            creator_name: "Maker".to_string(),
        };

        let result = export_group(&EmptySource, &group, &config_in(dir.path())).unwrap();

        // One document per prim, even for an empty prim.
        assert_eq!(result.documents.len(), 2);
        let empty_doc: serde_json::Value = serde_json::from_slice(&result.documents[1]).unwrap();
        assert_eq!(
            empty_doc
                .pointer("/metadata/vertices")
                .unwrap()
                .as_u64()
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_combine_preserves_order() {
        let mut a = ExportResult {
            documents: vec![b"{}".to_vec()],
            source_prims: vec![Prim::default()],
            ..Default::default()
        };
        let b = ExportResult {
            documents: vec![b"[]".to_vec(), b"1".to_vec()],
            source_prims: vec![Prim::default(), Prim::default()],
            texture_files: vec![PathBuf::from("tex.png")],
            ..Default::default()
        };

        a.combine(b);

        assert_eq!(a.documents.len(), 3);
        assert_eq!(a.source_prims.len(), 3);
        assert_eq!(a.documents[1], b"[]");
        assert_eq!(a.texture_files.len(), 1);
    }
}
