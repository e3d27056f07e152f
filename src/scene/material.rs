use crate::core::color::ColorRgb;
use crate::scene::texture::Texture;
use std::sync::Arc;

/// Base specular exponent, scaled per pixel by the gloss map's red channel.
pub const BASE_SHININESS: f32 = 25.0;

/// The texture maps and reflectance coefficients consumed by the shading stage.
///
/// Maps are reference counted so several meshes may share one decoded image.
#[derive(Debug, Clone)]
pub struct Material {
    pub diffuse: Arc<Texture>,
    /// Tangent-space normals encoded as `0.5 * n + 0.5`.
    pub normal: Arc<Texture>,
    pub gloss: Arc<Texture>,
    pub specular: Arc<Texture>,

    pub shininess: f32,
    /// Diffuse reflectance coefficient.
    pub kd: f32,
    /// Specular reflectance coefficient.
    pub ks: f32,
}

impl Material {
    pub fn new(
        diffuse: Arc<Texture>,
        normal: Arc<Texture>,
        gloss: Arc<Texture>,
        specular: Arc<Texture>,
    ) -> Self {
        Self {
            diffuse,
            normal,
            gloss,
            specular,
            shininess: BASE_SHININESS,
            kd: 1.0,
            ks: 1.0,
        }
    }

    /// Neutral map for slot `kind`, used when no image is configured.
    pub fn fallback_texture(kind: MapKind) -> Texture {
        match kind {
            MapKind::Diffuse => Texture::solid(ColorRgb::WHITE),
            // Straight up along the surface normal.
            MapKind::Normal => Texture::solid(ColorRgb::new(0.5, 0.5, 1.0)),
            MapKind::Gloss => Texture::solid(ColorRgb::WHITE),
            MapKind::Specular => Texture::solid(ColorRgb::BLACK),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(
            Arc::new(Self::fallback_texture(MapKind::Diffuse)),
            Arc::new(Self::fallback_texture(MapKind::Normal)),
            Arc::new(Self::fallback_texture(MapKind::Gloss)),
            Arc::new(Self::fallback_texture(MapKind::Specular)),
        )
    }
}

/// Texture slots of a [`Material`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapKind {
    Diffuse,
    Normal,
    Gloss,
    Specular,
}
