//! # Prim Exporter
//!
//! A Rust library for exporting prim meshes to Three.js JSON scene documents.
//!
//! ## Overview
//!
//! This library takes an in-memory description of a 3D object (a set of
//! prims, each made of pre-triangulated faces with per-face materials) and
//! produces one self-contained JSON scene document per prim, plus the PNG
//! texture files those documents reference.
//!
//! Faces are merged into flat vertex/normal/UV buffers with a deduplicated
//! material list, and textures shared across faces or across prims are
//! written to disk exactly once per export run.
//!
//! ## Quick Start
//!
//! ```ignore
//! use prim_exporter::{export_group, ExportConfig};
//!
//! // Any asset backend implementing TextureSource
//! let store = MyAssetStore::connect()?;
//!
//! let config = ExportConfig::default();
//! let result = export_group(&store, &group, &config)?;
//!
//! for document in &result.documents {
//!     // hand the JSON bytes to the renderer
//! }
//! println!("wrote {} texture files", result.texture_files.len());
//! ```
//!
//! ## Integration
//!
//! Texture retrieval is injected through the [`TextureSource`] trait, so the
//! combination and serialization pipeline can run against any content store
//! (or a fake one in tests):
//!
//! ```ignore
//! use prim_exporter::{TextureData, TextureSource};
//! use uuid::Uuid;
//!
//! struct MyAssetStore { /* ... */ }
//!
//! impl TextureSource for MyAssetStore {
//!     fn load_texture(&self, id: Uuid) -> Option<TextureData> {
//!         let bytes = self.fetch(id)?;
//!         prim_exporter::load_texture_from_bytes(&bytes).ok()
//!     }
//! }
//! ```

pub mod error;
pub mod types;
pub mod texture;
pub mod cache;
pub mod combiner;
pub mod export;

// Re-export main types for convenience
pub use cache::{TextureExportCache, TrackedTexture};
pub use combiner::{CombinedMesh, FaceCombiner, FaceRange};
pub use error::{ExportError, Result};
pub use export::{
    export_group, export_prim, ExportConfig, ExportResult, SceneDocument, SceneMaterial,
    SceneMetadata,
};
pub use texture::{load_texture_from_bytes, TextureData, TextureSource};
pub use types::{Face, Material, Prim, PrimGroup, Shininess};
