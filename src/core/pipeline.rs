use crate::core::color::ColorRgb;
use nalgebra::{Vector2, Vector3};

/// Perspective-correct interpolated attributes of one pixel that passed the
/// depth test.
///
/// `normal`, `tangent` and `view_direction` are normalized after interpolation.
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    pub x: usize,
    pub y: usize,
    /// Value written to the depth buffer.
    pub depth: f32,
    /// Interpolated homogeneous w (view-space depth).
    pub w: f32,
    pub color: ColorRgb,
    pub uv: Vector2<f32>,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
    pub view_direction: Vector3<f32>,
}

/// The programmable pixel stage of the pipeline.
///
/// Implementations must be thread-safe (Send + Sync) because fragments of
/// different triangles are shaded concurrently.
pub trait PixelShader: Send + Sync {
    /// Computes the final color of a fragment. The rasterizer applies
    /// max-to-one normalization before packing, so values above 1 are allowed.
    fn shade(&self, fragment: &Fragment) -> ColorRgb;
}

impl<F> PixelShader for F
where
    F: Fn(&Fragment) -> ColorRgb + Send + Sync,
{
    fn shade(&self, fragment: &Fragment) -> ColorRgb {
        self(fragment)
    }
}
