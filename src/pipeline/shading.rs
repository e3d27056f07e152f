use crate::core::color::ColorRgb;
use crate::core::pipeline::{Fragment, PixelShader};
use crate::pipeline::brdf::{lambert, phong};
use crate::scene::light::DirectionalLight;
use crate::scene::material::Material;
use nalgebra::{Matrix3, Vector3};
use std::fmt;

/// Constant ambient term added by [`ShadingMode::Combined`].
pub const AMBIENT: ColorRgb = ColorRgb::gray(0.025);

/// Which terms of the lighting model end up in the final color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Diffuse and specular scaled by the light, plus ambient.
    #[default]
    Combined,
    /// Only the cosine factor, as white.
    ObservedArea,
    Diffuse,
    Specular,
}

impl ShadingMode {
    /// Next mode in the `Combined -> ObservedArea -> Diffuse -> Specular` cycle.
    pub fn next(self) -> Self {
        match self {
            ShadingMode::Combined => ShadingMode::ObservedArea,
            ShadingMode::ObservedArea => ShadingMode::Diffuse,
            ShadingMode::Diffuse => ShadingMode::Specular,
            ShadingMode::Specular => ShadingMode::Combined,
        }
    }
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShadingMode::Combined => "combined",
            ShadingMode::ObservedArea => "observed_area",
            ShadingMode::Diffuse => "diffuse",
            ShadingMode::Specular => "specular",
        };
        f.write_str(name)
    }
}

/// Per-pixel Lambert + Phong shading with optional tangent-space normal mapping.
pub struct SurfaceShader<'a> {
    pub material: &'a Material,
    pub light: &'a DirectionalLight,
    pub mode: ShadingMode,
    pub use_normal_map: bool,
}

impl<'a> SurfaceShader<'a> {
    pub fn new(
        material: &'a Material,
        light: &'a DirectionalLight,
        mode: ShadingMode,
        use_normal_map: bool,
    ) -> Self {
        Self {
            material,
            light,
            mode,
            use_normal_map,
        }
    }

    /// Shading normal for `fragment`, perturbed by the normal map when enabled.
    ///
    /// Falls back to the interpolated normal where the tangent frame is
    /// unusable (missing or parallel tangent).
    pub fn shading_normal(&self, fragment: &Fragment) -> Vector3<f32> {
        let n = fragment.normal;
        if !self.use_normal_map {
            return n;
        }

        let t = fragment.tangent;
        if !t.iter().all(|c| c.is_finite()) {
            return n;
        }
        let Some(b) = n.cross(&t).try_normalize(1e-6) else {
            return n;
        };

        // Texel color c encodes the direction 2c - 1.
        let sample = self.material.normal.sample(fragment.uv) * 2.0 - ColorRgb::WHITE;
        let local = Vector3::new(sample.r, sample.g, sample.b);

        let tbn = Matrix3::from_columns(&[t, b, n]);
        (tbn * local).try_normalize(1e-6).unwrap_or(n)
    }
}

impl PixelShader for SurfaceShader<'_> {
    fn shade(&self, fragment: &Fragment) -> ColorRgb {
        let normal = self.shading_normal(fragment);
        let light_dir = self.light.direction();

        let cos_theta = normal.dot(&-light_dir).max(0.0);
        if cos_theta <= 0.0 {
            return ColorRgb::BLACK;
        }

        let material = self.material;
        let uv = fragment.uv;

        let diffuse = lambert(material.kd, material.diffuse.sample(uv));
        let exponent = material.shininess * material.gloss.sample(uv).r;
        let specular = phong(
            material.ks,
            material.specular.sample(uv),
            exponent,
            &light_dir,
            &fragment.view_direction,
            &normal,
        );

        let intensity = self.light.intensity();
        match self.mode {
            ShadingMode::Combined => (diffuse * intensity + specular) * cos_theta + AMBIENT,
            ShadingMode::ObservedArea => ColorRgb::WHITE * cos_theta,
            ShadingMode::Diffuse => diffuse * cos_theta * intensity,
            ShadingMode::Specular => specular,
        }
    }
}
