// Math utilities for the scene graph

use glam::{Mat4, Vec3};

/// Convert degrees to radians.
pub fn deg_to_rad(angle: f32) -> f32 {
    angle * std::f32::consts::PI / 180.0
}

/// Compose two transforms: `a` applied after `b`.
pub fn compose(a: Mat4, b: Mat4) -> Mat4 {
    a * b
}

/// Apply a translation on top of `m`, as a full affine composition.
///
/// Always `T(d) * m` rather than a write into the translation column, so
/// interleaving with rotation or non-uniform scale stays correct.
pub fn translated(m: Mat4, dx: f32, dy: f32, dz: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(dx, dy, dz)) * m
}

/// Rotate `m` around the X axis. Angle in radians, right-hand rule.
pub fn rotated_x(m: Mat4, angle: f32) -> Mat4 {
    Mat4::from_rotation_x(angle) * m
}

/// Rotate `m` around the Y axis.
pub fn rotated_y(m: Mat4, angle: f32) -> Mat4 {
    Mat4::from_rotation_y(angle) * m
}

/// Rotate `m` around the Z axis.
pub fn rotated_z(m: Mat4, angle: f32) -> Mat4 {
    Mat4::from_rotation_z(angle) * m
}

/// Rotate `m` around an arbitrary axis (Rodrigues' rotation).
///
/// The axis is normalized here; a zero-length axis degenerates to a
/// cosine-scale matrix rather than panicking.
pub fn rotated_about_axis(m: Mat4, axis: Vec3, angle: f32) -> Mat4 {
    Mat4::from_axis_angle(axis.normalize_or_zero(), angle) * m
}

/// Non-uniform scale composed with `m`.
pub fn scaled(m: Mat4, sx: f32, sy: f32, sz: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(sx, sy, sz)) * m
}

/// Symmetric perspective projection. `fov_y` in degrees.
pub fn perspective(fov_y: f32, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
    Mat4::perspective_rh(deg_to_rad(fov_y), aspect, znear, zfar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn arbitrary_matrix() -> Mat4 {
        let m = rotated_x(Mat4::IDENTITY, 0.7);
        let m = rotated_y(m, -1.2);
        let m = scaled(m, 1.5, 0.5, 2.0);
        translated(m, 3.0, -4.0, 5.0)
    }

    #[test]
    fn identity_law() {
        let m = arbitrary_matrix();
        let left = compose(Mat4::IDENTITY, m).to_cols_array();
        let right = compose(m, Mat4::IDENTITY).to_cols_array();
        for (i, e) in m.to_cols_array().into_iter().enumerate() {
            assert_relative_eq!(left[i], e, epsilon = 1e-6);
            assert_relative_eq!(right[i], e, epsilon = 1e-6);
        }
    }

    #[test]
    fn rotations_are_orthonormal() {
        for (name, m) in [
            ("x", rotated_x(Mat4::IDENTITY, 1.3)),
            ("y", rotated_y(Mat4::IDENTITY, -2.6)),
            ("z", rotated_z(Mat4::IDENTITY, 0.4)),
            (
                "axis",
                rotated_about_axis(Mat4::IDENTITY, Vec3::new(1.0, 2.0, -0.5), 2.1),
            ),
        ] {
            let r = glam::Mat3::from_mat4(m);
            let rtr = r.transpose() * r;
            for i in 0..3 {
                assert_relative_eq!(
                    rtr.col(i).x,
                    glam::Mat3::IDENTITY.col(i).x,
                    epsilon = 1e-5
                );
                assert_relative_eq!(
                    rtr.col(i).y,
                    glam::Mat3::IDENTITY.col(i).y,
                    epsilon = 1e-5
                );
                assert_relative_eq!(
                    rtr.col(i).z,
                    glam::Mat3::IDENTITY.col(i).z,
                    epsilon = 1e-5
                );
            }
            assert!(m.w_axis.abs_diff_eq(glam::Vec4::W, 1e-6), "bad w axis for {name}");
        }
    }

    #[test]
    fn axis_rotation_matches_fixed_axis() {
        let a = rotated_about_axis(Mat4::IDENTITY, Vec3::Y, 0.9);
        let b = rotated_y(Mat4::IDENTITY, 0.9);
        for i in 0..4 {
            assert_relative_eq!(a.col(i).x, b.col(i).x, epsilon = 1e-6);
            assert_relative_eq!(a.col(i).y, b.col(i).y, epsilon = 1e-6);
            assert_relative_eq!(a.col(i).z, b.col(i).z, epsilon = 1e-6);
            assert_relative_eq!(a.col(i).w, b.col(i).w, epsilon = 1e-6);
        }
    }

    #[test]
    fn translation_is_full_composition() {
        // Translating after a scale must not pick up the scale factors.
        let m = scaled(Mat4::IDENTITY, 2.0, 3.0, 4.0);
        let m = translated(m, 1.0, 1.0, 1.0);
        let p = m.transform_point3(Vec3::ZERO);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn perspective_keeps_projective_row() {
        let p = perspective(60.0, 16.0 / 9.0, 0.1, 100.0);
        // Projection is the one constructor allowed to break the affine row.
        assert_relative_eq!(p.x_axis.w, 0.0);
        assert_relative_eq!(p.z_axis.w, -1.0);
    }
}
