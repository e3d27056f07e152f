use crate::core::color::ColorRgb;
use nalgebra::{Point3, Vector2, Vector3, Vector4};

/// Represents a single vertex in object space, as stored by a mesh.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Base vertex color.
    pub color: ColorRgb,
    /// Texture coordinates (UV).
    pub uv: Vector2<f32>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f32>,
    /// Tangent vector (xyz) for normal mapping.
    pub tangent: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, uv: Vector2<f32>) -> Self {
        Self {
            position,
            color: ColorRgb::WHITE,
            uv,
            normal,
            tangent: Vector3::zeros(),
        }
    }

    pub fn with_tangent(mut self, tangent: Vector3<f32>) -> Self {
        self.tangent = tangent;
        self
    }
}

/// A vertex after the vertex stage.
///
/// `position.xyz` has been divided by w; `position.w` keeps the original
/// homogeneous w for perspective-correct interpolation.
#[derive(Debug, Clone, Copy)]
pub struct VertexOut {
    pub position: Vector4<f32>,
    pub color: ColorRgb,
    pub uv: Vector2<f32>,
    /// World-space normal (normalized).
    pub normal: Vector3<f32>,
    /// World-space tangent (normalized).
    pub tangent: Vector3<f32>,
    /// Camera origin minus world-space position, not normalized.
    pub view_direction: Vector3<f32>,
}

/// How the index buffer of a mesh is assembled into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    #[default]
    TriangleList,
    TriangleStrip,
}

impl PrimitiveTopology {
    /// Number of triangles described by `index_count` indices.
    pub fn triangle_count(self, index_count: usize) -> usize {
        match self {
            PrimitiveTopology::TriangleList => index_count / 3,
            PrimitiveTopology::TriangleStrip => index_count.saturating_sub(2),
        }
    }

    /// Resolves the three vertex indices of triangle `n`.
    ///
    /// Strip triangles whose third index is odd get their second and third
    /// indices swapped so every triangle keeps the same winding.
    pub fn triangle_indices(self, indices: &[u32], n: usize) -> [u32; 3] {
        match self {
            PrimitiveTopology::TriangleList => {
                let i = n * 3;
                [indices[i], indices[i + 1], indices[i + 2]]
            }
            PrimitiveTopology::TriangleStrip => {
                let (i0, i1, i2) = (indices[n], indices[n + 1], indices[n + 2]);
                if i2 % 2 == 1 { [i0, i2, i1] } else { [i0, i1, i2] }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_groups_consecutive_indices() {
        let indices = [0, 1, 2, 2, 1, 3];
        let topo = PrimitiveTopology::TriangleList;
        assert_eq!(topo.triangle_count(indices.len()), 2);
        assert_eq!(topo.triangle_indices(&indices, 1), [2, 1, 3]);
    }

    #[test]
    fn strip_swaps_when_third_index_is_odd() {
        let indices = [0, 1, 2, 3, 4];
        let topo = PrimitiveTopology::TriangleStrip;
        assert_eq!(topo.triangle_count(indices.len()), 3);
        assert_eq!(topo.triangle_indices(&indices, 0), [0, 1, 2]);
        assert_eq!(topo.triangle_indices(&indices, 1), [1, 3, 2]);
        assert_eq!(topo.triangle_indices(&indices, 2), [2, 3, 4]);
    }

    #[test]
    fn short_strip_has_no_triangles() {
        assert_eq!(PrimitiveTopology::TriangleStrip.triangle_count(2), 0);
        assert_eq!(PrimitiveTopology::TriangleStrip.triangle_count(0), 0);
    }
}
