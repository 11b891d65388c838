use glam::{Mat4, Vec3};

/// Vertical field of view of the projection, in degrees.
pub const FIELD_OF_VIEW: f32 = 45.0;
pub const NEAR_PLANE: f32 = 2.0;
pub const FAR_PLANE: f32 = 100.0;

/// Camera offset from the cube along Z.
pub const CAMERA_DISTANCE: f32 = 5.0;

/// Rotation of `m` by `angle_degrees` about `axis`, applied after `m`.
///
/// Successive calls compose left to right: the first rotation is applied to
/// the geometry first.
pub fn rotate(m: Mat4, angle_degrees: f32, axis: Vec3) -> Mat4 {
    Mat4::from_axis_angle(axis.normalize(), angle_degrees.to_radians()) * m
}

/// Right-handed perspective projection with wgpu's [0, 1] clip depth.
pub fn perspective(fovy_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh(fovy_degrees.to_radians(), aspect, near, far)
}

/// Projection for a window of the given size. Zero extents count as 1 so a
/// minimized window still yields a finite matrix.
pub fn window_projection(width: u32, height: u32) -> Mat4 {
    let aspect = width.max(1) as f32 / height.max(1) as f32;
    perspective(FIELD_OF_VIEW, aspect, NEAR_PLANE, FAR_PLANE)
}

/// Fixed camera: the world pulled back along -Z.
pub fn view_matrix() -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, -CAMERA_DISTANCE))
}

/// Accumulated rotation angles, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    /// Angle about Z.
    pub theta: f32,
    /// Angle about Y.
    pub phi: f32,
}

impl Default for Rotation {
    fn default() -> Self {
        Self {
            theta: 30.0,
            phi: 40.0,
        }
    }
}

impl Rotation {
    pub const THETA_STEP: f32 = 1.0;
    pub const PHI_STEP: f32 = -1.0;

    /// Advance both angles by one frame.
    pub fn step(&mut self) {
        self.theta += Self::THETA_STEP;
        self.phi += Self::PHI_STEP;
    }

    /// Model matrix rebuilt from the identity with the accumulated angles.
    pub fn model_matrix(&self) -> Mat4 {
        let model = rotate(Mat4::IDENTITY, self.theta, Vec3::Z);
        rotate(model, self.phi, Vec3::Y)
    }
}

/// The three matrices fed to the vertex stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transforms {
    pub model: Mat4,
    pub view: Mat4,
    /// Unset until the first resize.
    pub projection: Option<Mat4>,
}

impl Default for Transforms {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY,
            view: view_matrix(),
            projection: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!(a.abs_diff_eq(b, 1e-5), "{a:?} != {b:?}");
    }

    #[test]
    fn rotation_starts_at_initial_angles() {
        let r = Rotation::default();
        assert_eq!(r.theta, 30.0);
        assert_eq!(r.phi, 40.0);
    }

    #[test]
    fn angles_accumulate_per_frame() {
        let mut r = Rotation::default();
        for n in 0..360 {
            assert_eq!(r.theta, 30.0 + n as f32);
            assert_eq!(r.phi, 40.0 - n as f32);
            r.step();
        }
        assert_eq!(r.theta, 390.0);
        assert_eq!(r.phi, -320.0);
    }

    #[test]
    fn model_applies_z_then_y() {
        let r = Rotation {
            theta: 90.0,
            phi: 90.0,
        };
        // +X -> +Y under Z, then +Y is unchanged under Y.
        let p = r.model_matrix().transform_point3(Vec3::X);
        assert_vec_close(p, Vec3::Y);
        // +Y -> -X under Z, then -X -> +Z under Y.
        let p = r.model_matrix().transform_point3(Vec3::Y);
        assert_vec_close(p, Vec3::Z);
    }

    #[test]
    fn model_rebuilt_from_identity() {
        let mut r = Rotation::default();
        for _ in 0..17 {
            r.step();
        }
        let expected = Mat4::from_rotation_y(r.phi.to_radians())
            * Mat4::from_rotation_z(r.theta.to_radians());
        assert!(r.model_matrix().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn rotate_normalizes_axis() {
        let a = rotate(Mat4::IDENTITY, 30.0, Vec3::new(0.0, 0.0, 5.0));
        let b = rotate(Mat4::IDENTITY, 30.0, Vec3::Z);
        assert!(a.abs_diff_eq(b, 1e-6));
    }

    #[test]
    fn view_moves_world_back() {
        let p = view_matrix().transform_point3(Vec3::ZERO);
        assert_eq!(p, Vec3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn resize_projection_matches_perspective() {
        let p = window_projection(800, 600);
        let expected = perspective(45.0, 800.0 / 600.0, 2.0, 100.0);
        assert_eq!(p, expected);
        assert_eq!(
            expected,
            Mat4::perspective_rh(45.0_f32.to_radians(), 800.0 / 600.0, 2.0, 100.0)
        );
    }

    #[test]
    fn zero_extent_projection_is_finite() {
        assert!(window_projection(640, 0).is_finite());
        assert!(window_projection(0, 600).is_finite());
        assert!(window_projection(0, 0).is_finite());
    }

    #[test]
    fn near_and_far_map_to_depth_range() {
        let p = perspective(45.0, 1.0, 2.0, 100.0);
        let near = p.project_point3(Vec3::new(0.0, 0.0, -2.0));
        let far = p.project_point3(Vec3::new(0.0, 0.0, -100.0));
        assert!((near.z - 0.0).abs() < 1e-5);
        assert!((far.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn transforms_default_has_no_projection() {
        let t = Transforms::default();
        assert_eq!(t.model, Mat4::IDENTITY);
        assert_eq!(t.view, view_matrix());
        assert!(t.projection.is_none());
    }

    #[test]
    fn cube_is_inside_frustum() {
        let t = Transforms::default();
        let mvp = window_projection(512, 512) * t.view * t.model;
        for v in crate::mesh::CUBE_VERTICES {
            let ndc = mvp.project_point3(Vec3::from(v.position));
            assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0);
            assert!((0.0..=1.0).contains(&ndc.z));
        }
    }
}
