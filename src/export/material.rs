//! Material serialization into the scene document schema.

use crate::cache::TrackedTexture;
use crate::types::{Material, Shininess};
use serde::Serialize;

/// Wrap mode emitted for textured materials.
const DIFFUSE_WRAP: [&str; 2] = ["repeat", "repeat"];

/// One entry of the scene document's material array.
///
/// Field names are fixed by the Three.js JSON 3.1 schema. The texture
/// fields serialize as `null` when untextured, so every material carries the
/// same set of keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneMaterial {
    #[serde(rename = "colorAmbient")]
    pub color_ambient: [f32; 3],
    #[serde(rename = "colorDiffuse")]
    pub color_diffuse: [f32; 3],
    #[serde(rename = "colorSpecular")]
    pub color_specular: [f32; 3],
    #[serde(rename = "mapDiffuse")]
    pub map_diffuse: Option<String>,
    #[serde(rename = "mapDiffuseWrap")]
    pub map_diffuse_wrap: Option<[&'static str; 2]>,
    pub shading: &'static str,
    #[serde(rename = "specularCoef")]
    pub specular_coef: u32,
    pub transparency: f32,
    pub transparent: bool,
}

/// Map a material and its resolved texture into the document schema.
///
/// `texture` is the cache entry for the material's texture id, `None` for
/// untextured materials. A texture that could not be exported leaves the
/// material untextured in the document, but its alpha scan still counts
/// toward the `transparent` flag.
pub fn serialize_material(material: &Material, texture: Option<&TrackedTexture>) -> SceneMaterial {
    let [r, g, b, a] = material.color;
    let shiny = specular_intensity(material.shininess);

    let map_diffuse = texture.and_then(|t| t.file_name.clone());
    let texture_alpha = texture.is_some_and(|t| t.has_alpha);

    SceneMaterial {
        color_ambient: [r, g, b],
        color_diffuse: [r, g, b],
        color_specular: [r * shiny, g * shiny, b * shiny],
        map_diffuse_wrap: map_diffuse.is_some().then_some(DIFFUSE_WRAP),
        map_diffuse,
        shading: "Phong",
        specular_coef: 50,
        transparency: a,
        transparent: a < 1.0 || texture_alpha,
    }
}

/// Specular intensity for a shininess level.
fn specular_intensity(shininess: Shininess) -> f32 {
    match shininess {
        Shininess::High => 1.0,
        Shininess::Medium => 0.5,
        Shininess::Low => 0.25,
        Shininess::None => 0.0,
    }
}
