//! Placement transforms from a position and a heading
//!
//! Objects face along `-z` of their local frame, like a camera does.

use glam::{Mat4, Vec3, Vec4};

/// True when every component is exactly zero
#[inline]
pub fn is_vector_null(v: Vec3) -> bool {
    v.x == 0.0 && v.y == 0.0 && v.z == 0.0
}

/// Build a right-handed placement frame looking along `forward`
///
/// Columns are `[x, 0]`, `[y, 0]`, `[z, 0]`, `[position, 1]` with
/// `z = -normalize(forward)`. A zero `forward` falls back to `z = +Z` and an
/// `up` parallel to `z` falls back to `x = +X`, so the result never holds NaN.
pub fn build_frame(position: Vec3, forward: Vec3, up: Vec3) -> Mat4 {
    let z = if is_vector_null(forward) {
        Vec3::Z
    } else {
        -forward.normalize()
    };

    let x = up.cross(z);
    let x = if is_vector_null(x) { Vec3::X } else { x.normalize() };

    let y = z.cross(x);

    Mat4::from_cols(
        x.extend(0.0),
        y.extend(0.0),
        z.extend(0.0),
        Vec4::new(position.x, position.y, position.z, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn no_nan(m: &Mat4) -> bool {
        m.to_cols_array().iter().all(|v| !v.is_nan())
    }

    #[test]
    fn test_zero_forward_fallback() {
        let pos = Vec3::new(0.3, -0.2, 0.1);
        let m = build_frame(pos, Vec3::ZERO, Vec3::Z);
        assert!(no_nan(&m));

        // z = +Z, up parallel -> x = +X, y = Z x X = +Y
        let expected = Mat4::from_cols(
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.3, -0.2, 0.1, 1.0),
        );
        assert_eq!(m, expected);
    }

    #[test]
    fn test_faces_forward() {
        let forward = Vec3::new(0.0, 1.0, 0.0);
        let m = build_frame(Vec3::ZERO, forward, Vec3::Z);
        // Local -z maps onto the heading
        let facing = m.transform_vector3(-Vec3::Z);
        assert!(facing.distance(forward) < 1e-6);
        // Local +y stays up for a level heading
        let up = m.transform_vector3(Vec3::Y);
        assert!(up.distance(Vec3::Z) < 1e-6);
    }

    #[test]
    fn test_translation_column() {
        let pos = Vec3::new(1.0, 2.0, 3.0);
        let m = build_frame(pos, Vec3::new(1.0, 1.0, 0.0), Vec3::Z);
        assert_eq!(m.w_axis, Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(m.transform_point3(Vec3::ZERO), pos);
    }

    proptest! {
        #[test]
        fn prop_frame_is_orthonormal_and_right_handed(
            fx in -1.0f32..1.0, fy in -1.0f32..1.0, fz in -1.0f32..1.0,
        ) {
            let forward = Vec3::new(fx, fy, fz);
            prop_assume!(forward.length() > 1e-2);
            let m = build_frame(Vec3::ZERO, forward, Vec3::Z);
            prop_assert!(no_nan(&m));
            let x = m.x_axis.truncate();
            let y = m.y_axis.truncate();
            let z = m.z_axis.truncate();
            prop_assert!((x.length() - 1.0).abs() < 1e-4);
            prop_assert!((z.length() - 1.0).abs() < 1e-4);
            prop_assert!(x.dot(z).abs() < 1e-4);
            prop_assert!(x.cross(y).distance(z) < 1e-3);
        }
    }
}
