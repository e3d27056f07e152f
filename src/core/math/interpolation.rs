use nalgebra::{Point2, Vector2, Vector3, Vector4};
use std::ops::{Add, Mul};

/// 2D cross product of `a` and `b`.
#[inline(always)]
pub fn cross_2d(a: Vector2<f32>, b: Vector2<f32>) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Signed areas of the three edges of triangle (v0, v1, v2) against point `p`.
///
/// Component `i` is the cross product of edge `v[i] -> v[i+1]` with the
/// vector `v[i] -> p`. Inside a triangle all three share the sign of the
/// triangle's own signed area.
#[inline]
pub fn edge_functions(
    p: Point2<f32>,
    v0: Point2<f32>,
    v1: Point2<f32>,
    v2: Point2<f32>,
) -> Vector3<f32> {
    Vector3::new(
        cross_2d(v1 - v0, p - v0),
        cross_2d(v2 - v1, p - v1),
        cross_2d(v0 - v2, p - v2),
    )
}

/// Signed parallelogram area of triangle (v0, v1, v2).
#[inline]
pub fn signed_area(v0: Point2<f32>, v1: Point2<f32>, v2: Point2<f32>) -> f32 {
    cross_2d(v1 - v0, v2 - v0)
}

/// Converts edge functions into barycentric weights (W0, W1, W2).
///
/// Each weight is the signed area of the edge opposite its vertex divided by
/// the total signed area. A zero total yields non-finite weights.
#[inline]
pub fn barycentric_weights(edges: Vector3<f32>, total_area: f32) -> Vector3<f32> {
    Vector3::new(edges.y, edges.z, edges.x) / total_area
}

/// Reciprocal-weighted blend `1 / (W0/a0 + W1/a1 + W2/a2)`.
///
/// Used with post-divide z for the depth buffer value and with the original
/// w for the perspective-correction factor.
#[inline]
pub fn reciprocal_blend(weights: Vector3<f32>, a0: f32, a1: f32, a2: f32) -> f32 {
    1.0 / (weights.x / a0 + weights.y / a1 + weights.z / a2)
}

/// Interpolated depth stored in the depth buffer.
#[inline]
pub fn interpolate_depth(weights: Vector3<f32>, p: &[Vector4<f32>; 3]) -> f32 {
    reciprocal_blend(weights, p[0].z, p[1].z, p[2].z)
}

/// Perspective-correction factor from the original homogeneous w values.
#[inline]
pub fn interpolate_w(weights: Vector3<f32>, p: &[Vector4<f32>; 3]) -> f32 {
    reciprocal_blend(weights, p[0].w, p[1].w, p[2].w)
}

/// Perspective-correct attribute interpolation:
/// `(a0/w0*W0 + a1/w1*W1 + a2/w2*W2) * w_interp`.
#[inline]
pub fn perspective_interpolate<T>(
    attributes: [T; 3],
    weights: Vector3<f32>,
    w: [f32; 3],
    w_interp: f32,
) -> T
where
    T: Copy + Add<Output = T> + Mul<f32, Output = T>,
{
    (attributes[0] * (weights.x / w[0])
        + attributes[1] * (weights.y / w[1])
        + attributes[2] * (weights.z / w[2]))
        * w_interp
}

/// Remaps `value` from [old_min, old_max] into [new_min, new_max], clamping first.
#[inline]
pub fn remap(value: f32, old_min: f32, old_max: f32, new_min: f32, new_max: f32) -> f32 {
    let t = (value.clamp(old_min, old_max) - old_min) / (old_max - old_min);
    new_min + t * (new_max - new_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn tri() -> [Point2<f32>; 3] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn weights_sum_to_one_inside() {
        let [v0, v1, v2] = tri();
        let p = Point2::new(2.5, 3.5);
        let edges = edge_functions(p, v0, v1, v2);
        assert!(edges.x > 0.0 && edges.y > 0.0 && edges.z > 0.0);

        let w = barycentric_weights(edges, signed_area(v0, v1, v2));
        assert!((w.sum() - 1.0).abs() < EPS);
        assert!((w.y - 0.25).abs() < EPS);
        assert!((w.z - 0.35).abs() < EPS);
    }

    #[test]
    fn weights_are_one_at_vertices() {
        let [v0, v1, v2] = tri();
        let area = signed_area(v0, v1, v2);
        let w = barycentric_weights(edge_functions(v1, v0, v1, v2), area);
        assert!((w - Vector3::new(0.0, 1.0, 0.0)).norm() < EPS);
    }

    #[test]
    fn reversed_winding_flips_every_edge_sign() {
        let [v0, v1, v2] = tri();
        let edges = edge_functions(Point2::new(2.0, 2.0), v0, v2, v1);
        assert!(edges.x < 0.0 && edges.y < 0.0 && edges.z < 0.0);
    }

    #[test]
    fn degenerate_triangle_yields_non_finite_weights() {
        let v = Point2::new(1.0, 1.0);
        let edges = edge_functions(Point2::new(0.5, 0.5), v, v, v);
        let w = barycentric_weights(edges, signed_area(v, v, v));
        assert!(!w.x.is_finite());
    }

    #[test]
    fn reciprocal_blend_of_equal_values_is_that_value() {
        let w = Vector3::new(0.2, 0.3, 0.5);
        assert!((reciprocal_blend(w, 0.75, 0.75, 0.75) - 0.75).abs() < EPS);
    }

    #[test]
    fn perspective_interpolation_favours_nearer_vertex() {
        let weights = Vector3::new(0.5, 0.5, 0.0);
        let w = [1.0, 3.0, 2.0];
        let w_interp = reciprocal_blend(weights, w[0], w[1], w[2]);
        let uv = perspective_interpolate(
            [Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)],
            weights,
            w,
            w_interp,
        );
        // Screen-space midpoint of an edge from depth 1 to depth 3 sits at a quarter.
        assert!((uv.x - 0.25).abs() < EPS);
        assert!(uv.y.abs() < EPS);
    }

    #[test]
    fn remap_clamps_to_range() {
        assert_eq!(remap(0.5, 0.985, 1.0, 0.0, 1.0), 0.0);
        assert_eq!(remap(2.0, 0.985, 1.0, 0.0, 1.0), 1.0);
        assert!((remap(0.9925, 0.985, 1.0, 0.0, 1.0) - 0.5).abs() < 1e-3);
    }
}
