use crate::core::geometry::{Vertex, VertexOut};
use crate::core::math::transform::apply_perspective_division;
use crate::scene::camera::Camera;
use crate::scene::mesh::Mesh;
use nalgebra::{Matrix3, Matrix4, Point3};

/// Per-mesh constants of the vertex stage.
struct VertexTransform {
    world: Matrix4<f32>,
    world_dir: Matrix3<f32>,
    clip: Matrix4<f32>,
    eye: Point3<f32>,
}

impl VertexTransform {
    fn new(world: &Matrix4<f32>, camera: &Camera) -> Self {
        Self {
            world: *world,
            world_dir: world.fixed_view::<3, 3>(0, 0).into_owned(),
            clip: camera.projection_matrix() * camera.view_matrix() * world,
            eye: camera.origin,
        }
    }

    #[inline]
    fn apply(&self, vertex: &Vertex) -> VertexOut {
        let homogeneous = vertex.position.to_homogeneous();
        let world_pos = (self.world * homogeneous).xyz();

        VertexOut {
            position: apply_perspective_division(&(self.clip * homogeneous)),
            color: vertex.color,
            uv: vertex.uv,
            // Directions: rotation/scale only, no translation.
            normal: (self.world_dir * vertex.normal).normalize(),
            tangent: (self.world_dir * vertex.tangent).normalize(),
            view_direction: self.eye.coords - world_pos,
        }
    }
}

/// Runs the vertex stage for one mesh, one output per input vertex, in order.
///
/// Zero-length normals or tangents produce NaN directions and are not checked
/// here; the rasterizer and shaders tolerate them.
pub fn transform_vertices(mesh: &Mesh, camera: &Camera) -> Vec<VertexOut> {
    let transform = VertexTransform::new(mesh.world_matrix(), camera);
    mesh.vertices().iter().map(|v| transform.apply(v)).collect()
}

/// Runs the vertex stage and replaces the mesh's transformed-vertex cache.
pub fn process_mesh(mesh: &mut Mesh, camera: &Camera) {
    let transformed = transform_vertices(mesh, camera);
    mesh.set_transformed(transformed);
}
