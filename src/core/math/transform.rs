use nalgebra::{Matrix4, Point2, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for creating transformation matrices.
///
/// All matrices act on column vectors (`m * v`) in a left-handed space:
/// +X right, +Y up, +Z into the screen. Projections follow the Direct3D
/// convention and map the visible depth range to NDC z in [0, 1].
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Z-axis.
    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation applying pitch (around X) first, then yaw (around Y).
    pub fn rotation_yaw_pitch(yaw_rad: f32, pitch_rad: f32) -> Matrix4<f32> {
        Self::rotation_y(yaw_rad) * Self::rotation_x(pitch_rad)
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Camera-to-world matrix for a camera at `origin` looking along `forward`.
    ///
    /// The view matrix is its inverse.
    pub fn look_to_lh(origin: &Point3<f32>, forward: &Vector3<f32>, world_up: &Vector3<f32>) -> Matrix4<f32> {
        let z_axis = forward.normalize();
        let x_axis = world_up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        Matrix4::new(
            x_axis.x, y_axis.x, z_axis.x, origin.x,
            x_axis.y, y_axis.y, z_axis.y, origin.y,
            x_axis.z, y_axis.z, z_axis.z, origin.z,
            0.0,      0.0,      0.0,      1.0,
        )
    }

    /// Creates a left-handed perspective projection.
    ///
    /// Clip w equals view-space depth; NDC z runs from 0 at `near` to 1 at `far`.
    pub fn perspective_fov_lh(fov_y_rad: f32, aspect_ratio: f32, near: f32, far: f32) -> Matrix4<f32> {
        let f = 1.0 / (fov_y_rad / 2.0).tan();
        let range = far / (far - near);

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,   0.0,
            0.0,              f,   0.0,   0.0,
            0.0,              0.0, range, -near * range,
            0.0,              0.0, 1.0,   0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Performs perspective division on x, y and z while keeping the original w.
///
/// No guard against w == 0: such vertices produce non-finite coordinates and
/// are rejected further down the pipeline.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Vector4<f32> {
    let w = clip.w;
    Vector4::new(clip.x / w, clip.y / w, clip.z / w, w)
}

/// Converts NDC coordinates to raster coordinates (Viewport Transform).
/// Note: Y-axis is flipped (NDC +Y is up, raster +Y is down).
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - ndc_y) * 0.5 * height,
    )
}

/// True when x and y lie inside the [-1, 1] NDC square.
#[inline]
pub fn is_inside_ndc(position: &Vector4<f32>) -> bool {
    (-1.0..=1.0).contains(&position.x) && (-1.0..=1.0).contains(&position.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth_range() {
        let proj = TransformFactory::perspective_fov_lh(45f32.to_radians(), 1.0, 0.1, 100.0);

        let near = apply_perspective_division(&(proj * Vector4::new(0.0, 0.0, 0.1, 1.0)));
        let far = apply_perspective_division(&(proj * Vector4::new(0.0, 0.0, 100.0, 1.0)));

        assert!(near.z.abs() < EPS);
        assert!((far.z - 1.0).abs() < EPS);
        assert!((far.w - 100.0).abs() < EPS);
    }

    #[test]
    fn look_to_inverse_moves_camera_to_origin() {
        let origin = Point3::new(0.0, 0.0, -50.0);
        let inv_view = TransformFactory::look_to_lh(&origin, &Vector3::z(), &Vector3::y());
        let view = inv_view.try_inverse().unwrap();

        let p = view * Point3::new(0.0, 0.0, 0.0).to_homogeneous();
        assert!((p - Vector4::new(0.0, 0.0, 50.0, 1.0)).norm() < EPS);

        let right = view * Vector4::new(1.0, 0.0, -50.0, 1.0);
        assert!((right.x - 1.0).abs() < EPS);
    }

    #[test]
    fn ndc_corners_map_to_raster_corners() {
        assert_eq!(ndc_to_screen(-1.0, 1.0, 640.0, 480.0), Point2::new(0.0, 0.0));
        assert_eq!(ndc_to_screen(1.0, -1.0, 640.0, 480.0), Point2::new(640.0, 480.0));
    }

    #[test]
    fn perspective_division_keeps_w() {
        let v = apply_perspective_division(&Vector4::new(2.0, -4.0, 1.0, 4.0));
        assert_eq!(v, Vector4::new(0.5, -1.0, 0.25, 4.0));
    }

    #[test]
    fn ndc_bounds_are_inclusive() {
        assert!(is_inside_ndc(&Vector4::new(1.0, -1.0, 0.5, 1.0)));
        assert!(!is_inside_ndc(&Vector4::new(1.01, 0.0, 0.5, 1.0)));
        assert!(!is_inside_ndc(&Vector4::new(f32::NAN, 0.0, 0.5, 1.0)));
    }
}
