use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

/// A left-handed perspective camera.
///
/// Orientation comes from yaw (around +Y) and pitch (around +X) applied to
/// the +Z forward axis. View, inverse view and projection matrices are
/// cached and refreshed by [`Camera::update_matrices`].
#[derive(Debug, Clone)]
pub struct Camera {
    pub origin: Point3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_y_rad: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,

    // --- Cached Matrices ---
    view_matrix: Matrix4<f32>,
    inv_view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    pub fn new(origin: Point3<f32>, fov_y_rad: f32, aspect_ratio: f32) -> Self {
        let mut cam = Self {
            origin,
            yaw: 0.0,
            pitch: 0.0,
            fov_y_rad,
            aspect_ratio,
            near: 0.1,
            far: 100.0,
            view_matrix: Matrix4::identity(),
            inv_view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    /// Camera with explicit matrices, e.g. identity transforms in tests.
    ///
    /// [`Camera::update_matrices`] would overwrite them from the parameters.
    pub fn from_matrices(origin: Point3<f32>, view: Matrix4<f32>, projection: Matrix4<f32>) -> Self {
        Self {
            origin,
            yaw: 0.0,
            pitch: 0.0,
            fov_y_rad: std::f32::consts::FRAC_PI_2,
            aspect_ratio: 1.0,
            near: 0.1,
            far: 100.0,
            view_matrix: view,
            inv_view_matrix: view.try_inverse().unwrap_or_else(Matrix4::identity),
            projection_matrix: projection,
        }
    }

    /// Unit forward vector derived from yaw and pitch.
    pub fn forward(&self) -> Vector3<f32> {
        let rotation = TransformFactory::rotation_yaw_pitch(self.yaw, self.pitch);
        (rotation * Vector3::<f32>::z().to_homogeneous()).xyz().normalize()
    }

    /// Recalculates view, inverse view and projection matrices.
    pub fn update_matrices(&mut self) {
        self.inv_view_matrix = TransformFactory::look_to_lh(&self.origin, &self.forward(), &Vector3::y());
        self.view_matrix = self
            .inv_view_matrix
            .try_inverse()
            .unwrap_or_else(Matrix4::identity);
        self.projection_matrix =
            TransformFactory::perspective_fov_lh(self.fov_y_rad, self.aspect_ratio, self.near, self.far);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    /// Camera-to-world transform.
    pub fn inv_view_matrix(&self) -> Matrix4<f32> {
        self.inv_view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix * self.view_matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector4;

    #[test]
    fn default_orientation_looks_down_positive_z() {
        let cam = Camera::new(Point3::new(0.0, 0.0, -50.0), 45f32.to_radians(), 4.0 / 3.0);
        assert!((cam.forward() - Vector3::z()).norm() < 1e-6);

        let clip = cam.view_projection() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.w - 50.0).abs() < 1e-4);
        assert!(clip.x.abs() < 1e-4 && clip.y.abs() < 1e-4);
    }

    #[test]
    fn inverse_view_places_camera_at_origin() {
        let mut cam = Camera::new(Point3::new(3.0, 2.0, 1.0), 1.0, 1.0);
        cam.yaw = 0.7;
        cam.pitch = -0.2;
        cam.update_matrices();

        let eye = cam.inv_view_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((eye.xyz() - cam.origin.coords).norm() < 1e-5);
        let identity = cam.view_matrix() * cam.inv_view_matrix();
        assert!((identity - Matrix4::identity()).norm() < 1e-5);
    }

    #[test]
    fn yaw_turns_forward_towards_positive_x() {
        let mut cam = Camera::new(Point3::origin(), 1.0, 1.0);
        cam.yaw = std::f32::consts::FRAC_PI_2;
        assert!((cam.forward() - Vector3::x()).norm() < 1e-6);
    }
}
