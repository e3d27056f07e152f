//! Stateless reflectance functions.

use crate::core::color::ColorRgb;
use nalgebra::Vector3;
use std::f32::consts::PI;

/// Lambertian diffuse reflectance: `kd * albedo / pi`.
#[inline]
pub fn lambert(kd: f32, albedo: ColorRgb) -> ColorRgb {
    albedo * kd / PI
}

/// Mirrors the incident direction `l` about the normal `n`.
#[inline]
pub fn reflect(l: &Vector3<f32>, n: &Vector3<f32>) -> Vector3<f32> {
    l - n * (2.0 * n.dot(l))
}

/// Phong specular reflectance.
///
/// `light_dir` points from the light towards the surface, `view_dir` from the
/// surface towards the eye. Both and `normal` are expected normalized.
#[inline]
pub fn phong(
    ks: f32,
    specular: ColorRgb,
    exponent: f32,
    light_dir: &Vector3<f32>,
    view_dir: &Vector3<f32>,
    normal: &Vector3<f32>,
) -> ColorRgb {
    let r = reflect(light_dir, normal);
    let cos_alpha = r.dot(view_dir).max(0.0);
    specular * (ks * cos_alpha.powf(exponent))
}
