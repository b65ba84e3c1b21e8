//! Per-run texture export tracking.

use crate::texture::TextureSource;
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

/// Cached record of one texture's export outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedTexture {
    /// File name the texture was written under.
    ///
    /// `None` when the source lookup or the file write failed; the
    /// referencing materials are then exported as untextured.
    pub file_name: Option<String>,
    /// Whether any pixel has an alpha value below full opacity.
    pub has_alpha: bool,
}

impl TrackedTexture {
    /// Check if no texture file was produced for this id.
    pub fn is_missing(&self) -> bool {
        self.file_name.is_none()
    }
}

/// Tracks which texture ids have been exported during one run.
///
/// One cache instance serves exactly one export invocation. Lookups are
/// memoized, so a texture referenced by many faces or many prims is fetched,
/// resized and written to disk once. Failed lookups are memoized too and
/// not retried within the run.
#[derive(Debug)]
pub struct TextureExportCache {
    output_dir: PathBuf,
    max_texture_size: u32,
    entries: HashMap<Uuid, TrackedTexture>,
    written_files: Vec<PathBuf>,
}

impl TextureExportCache {
    /// Create a cache writing texture files into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>, max_texture_size: u32) -> Self {
        Self {
            output_dir: output_dir.into(),
            max_texture_size,
            entries: HashMap::new(),
            written_files: Vec::new(),
        }
    }

    /// Resolve a texture id, exporting it on first encounter.
    ///
    /// On first sight the raw image is fetched from `source`, constrained to
    /// the configured maximum size, scanned for alpha, PNG-encoded and
    /// written under `file_name`. Later calls with the same id return the
    /// recorded entry without touching the source, whatever `file_name` they
    /// pass.
    pub fn resolve(
        &mut self,
        source: &dyn TextureSource,
        id: Uuid,
        file_name: &str,
    ) -> TrackedTexture {
        if let Some(entry) = self.entries.get(&id) {
            return entry.clone();
        }

        let entry = self.export_texture(source, id, file_name);
        self.entries.insert(id, entry.clone());
        entry
    }

    fn export_texture(
        &mut self,
        source: &dyn TextureSource,
        id: Uuid,
        file_name: &str,
    ) -> TrackedTexture {
        let Some(texture) = source.load_texture(id) else {
            log::warn!("texture {id} could not be loaded, exporting as untextured");
            return TrackedTexture {
                file_name: None,
                has_alpha: false,
            };
        };

        let texture = texture.resize_to_fit(self.max_texture_size);
        let has_alpha = texture.has_transparency();
        let path = self.output_dir.join(file_name);

        let written = texture
            .to_png()
            .and_then(|png| std::fs::write(&path, png).map_err(Into::into));

        match written {
            Ok(()) => {
                self.written_files.push(path);
                TrackedTexture {
                    file_name: Some(file_name.to_string()),
                    has_alpha,
                }
            }
            Err(e) => {
                // A texture that fails to encode or write degrades like a
                // missing one; the export itself carries on.
                log::warn!("failed to write texture {id} to {}: {e}", path.display());
                TrackedTexture {
                    file_name: None,
                    has_alpha,
                }
            }
        }
    }

    /// Paths of all texture files written so far, in write order.
    pub fn written_files(&self) -> &[PathBuf] {
        &self.written_files
    }

    /// Consume the cache and return the written file paths.
    pub fn into_written_files(self) -> Vec<PathBuf> {
        self.written_files
    }
}
