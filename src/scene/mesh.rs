use crate::core::geometry::{PrimitiveTopology, Vertex, VertexOut};
use crate::core::math::transform::TransformFactory;
use crate::io::error::LoadError;
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// A collection of vertices and indices representing a 3D object.
///
/// Index values are validated at construction: every index addresses a
/// vertex, and list meshes hold a multiple of 3 indices.
#[derive(Debug, Clone)]
pub struct Mesh {
    world_matrix: Matrix4<f32>,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    topology: PrimitiveTopology,
    /// Output of the last vertex stage run, replaced wholesale every frame.
    transformed: Vec<VertexOut>,
}

impl Mesh {
    pub fn new(
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        topology: PrimitiveTopology,
    ) -> Result<Self, LoadError> {
        if topology == PrimitiveTopology::TriangleList && indices.len() % 3 != 0 {
            return Err(LoadError::InvalidMesh(format!(
                "triangle list has {} indices, not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(LoadError::InvalidMesh(format!(
                "index {} out of range for {} vertices",
                bad,
                vertices.len()
            )));
        }

        Ok(Self {
            world_matrix: Matrix4::identity(),
            vertices,
            indices,
            topology,
            transformed: Vec::new(),
        })
    }

    /// Unit quad in the XY plane facing -Z, split into two triangles.
    ///
    /// Used when no mesh file is configured.
    pub fn create_quad(half_size: f32) -> Self {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let tangent = Vector3::x();
        let corner = |x: f32, y: f32, u: f32, v: f32| {
            Vertex::new(Point3::new(x * half_size, y * half_size, 0.0), normal, Vector2::new(u, v))
                .with_tangent(tangent)
        };

        Self {
            world_matrix: Matrix4::identity(),
            vertices: vec![
                corner(-1.0, 1.0, 0.0, 0.0),
                corner(1.0, 1.0, 1.0, 0.0),
                corner(-1.0, -1.0, 0.0, 1.0),
                corner(1.0, -1.0, 1.0, 1.0),
            ],
            indices: vec![0, 1, 2, 1, 3, 2],
            topology: PrimitiveTopology::TriangleList,
            transformed: Vec::new(),
        }
    }

    pub fn world_matrix(&self) -> &Matrix4<f32> {
        &self.world_matrix
    }

    pub fn set_world_matrix(&mut self, world: Matrix4<f32>) {
        self.world_matrix = world;
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn topology(&self) -> PrimitiveTopology {
        self.topology
    }

    pub fn triangle_count(&self) -> usize {
        self.topology.triangle_count(self.indices.len())
    }

    pub fn transformed(&self) -> &[VertexOut] {
        &self.transformed
    }

    pub fn set_transformed(&mut self, transformed: Vec<VertexOut>) {
        self.transformed = transformed;
    }

    // --- Mutators: each one is applied in object space before the existing transform ---

    pub fn rotate_x(&mut self, degrees: f32) {
        self.world_matrix *= TransformFactory::rotation_x(degrees.to_radians());
    }

    pub fn rotate_y(&mut self, degrees: f32) {
        self.world_matrix *= TransformFactory::rotation_y(degrees.to_radians());
    }

    pub fn rotate_z(&mut self, degrees: f32) {
        self.world_matrix *= TransformFactory::rotation_z(degrees.to_radians());
    }

    pub fn translate(&mut self, offset: &Vector3<f32>) {
        self.world_matrix *= TransformFactory::translation(offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex() -> Vertex {
        Vertex::new(Point3::origin(), Vector3::z(), Vector2::zeros())
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = Mesh::new(vec![vertex(); 3], vec![0, 1, 3], PrimitiveTopology::TriangleList);
        assert!(matches!(err, Err(LoadError::InvalidMesh(_))));
    }

    #[test]
    fn rejects_partial_triangle_in_list() {
        let err = Mesh::new(vec![vertex(); 3], vec![0, 1, 2, 0], PrimitiveTopology::TriangleList);
        assert!(matches!(err, Err(LoadError::InvalidMesh(_))));
    }

    #[test]
    fn strip_accepts_any_index_count() {
        let mesh = Mesh::new(vec![vertex(); 4], vec![0, 1, 2, 3], PrimitiveTopology::TriangleStrip)
            .unwrap();
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn translate_then_rotate_applies_rotation_first() {
        let mut mesh = Mesh::create_quad(1.0);
        mesh.translate(&Vector3::new(5.0, 0.0, 0.0));
        mesh.rotate_y(90.0);

        let p = mesh.world_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((p - Point3::new(5.0, 0.0, -1.0)).norm() < 1e-5);
    }
}
