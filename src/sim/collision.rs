//! Collision detection and scene bounds
//!
//! Everything collides as a sphere. Meshes rarely fill their bounding
//! sphere, so the combined radius is shrunk before the overlap test.

use glam::Vec3;

/// Sphere-sphere hit test with a shrunk combined radius
///
/// Hits when the centre distance is strictly less than
/// `(radius_a + radius_b) * shrink`.
#[inline]
pub fn overlaps(center_a: Vec3, radius_a: f32, center_b: Vec3, radius_b: f32, shrink: f32) -> bool {
    center_a.distance(center_b) < (radius_a + radius_b) * shrink
}

/// Clamp `x` and `y` into the play area, leaving `z` alone
///
/// Used for entities whose motion is otherwise unconstrained (spline
/// followers). The object's radius keeps it fully inside the square.
pub fn clamp_to_scene(position: Vec3, radius: f32, half_extent: f32) -> Vec3 {
    let limit = half_extent - radius;
    Vec3::new(
        clamp_axis(position.x, -limit, limit),
        clamp_axis(position.y, -limit, limit),
        position.z,
    )
}

/// Clamp a player position on all three axes
///
/// Horizontal limits match [`clamp_to_scene`]; vertical limits are the
/// flight ceiling and floor. Nothing wraps: a player pushing into an edge
/// stops there.
pub fn clamp_player(
    position: Vec3,
    radius: f32,
    half_extent: f32,
    min_height: f32,
    max_height: f32,
) -> Vec3 {
    let mut clamped = clamp_to_scene(position, radius, half_extent);
    clamped.z = clamp_axis(clamped.z, min_height, max_height);
    clamped
}

/// `f32::clamp` panics when `min > max`; an object wider than the scene is
/// pinned to the centre instead.
#[inline]
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        return (min + max) * 0.5;
    }
    value.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SHRINK: f32 = 0.7;

    #[test]
    fn test_coincident_spheres_overlap() {
        assert!(overlaps(Vec3::ZERO, 0.05, Vec3::ZERO, 0.1, SHRINK));
    }

    #[test]
    fn test_boundary_is_strict() {
        let ra = 0.1;
        let rb = 0.1;
        let threshold = (ra + rb) * SHRINK;

        // Just inside the shrunk radius
        let inside = Vec3::new(threshold - 1e-4, 0.0, 0.0);
        assert!(overlaps(Vec3::ZERO, ra, inside, rb, SHRINK));

        // Exactly on it does not count; in f32 (0.1 + 0.1) * 0.7 == 0.14
        assert_eq!(threshold, 0.14);
        let on = Vec3::new(threshold, 0.0, 0.0);
        assert!(!overlaps(Vec3::ZERO, ra, on, rb, SHRINK));

        let outside = Vec3::new(0.1401, 0.0, 0.0);
        assert!(!overlaps(Vec3::ZERO, ra, outside, rb, SHRINK));
    }

    #[test]
    fn test_shrink_tightens_hits() {
        // Touching spheres overlap only without shrink
        let b = Vec3::new(0.19, 0.0, 0.0);
        assert!(overlaps(Vec3::ZERO, 0.1, b, 0.1, 1.0));
        assert!(!overlaps(Vec3::ZERO, 0.1, b, 0.1, SHRINK));
    }

    #[test]
    fn test_clamp_to_scene_leaves_z() {
        let p = clamp_to_scene(Vec3::new(2.0, -3.0, 5.0), 0.1, 1.0);
        assert!(p.distance(Vec3::new(0.9, -0.9, 5.0)) < 1e-6);
        assert_eq!(p.z, 5.0);
    }

    #[test]
    fn test_clamp_player_limits_height() {
        let p = clamp_player(Vec3::new(0.99, 0.0, 0.4), 0.05, 1.0, -0.15, 0.15);
        assert!((p.x - 0.95).abs() < 1e-6);
        assert_eq!(p.z, 0.15);

        let p = clamp_player(Vec3::new(0.0, -0.99, -1.0), 0.05, 1.0, -0.15, 0.15);
        assert!((p.y + 0.95).abs() < 1e-6);
        assert_eq!(p.z, -0.15);
    }

    #[test]
    fn test_oversized_object_pinned_to_centre() {
        let p = clamp_to_scene(Vec3::new(0.5, -0.5, 0.0), 2.0, 1.0);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 0.0);
    }

    proptest! {
        #[test]
        fn prop_clamp_is_idempotent(
            x in -5.0f32..5.0, y in -5.0f32..5.0, z in -5.0f32..5.0, r in 0.001f32..0.9,
        ) {
            let p = Vec3::new(x, y, z);
            let once = clamp_to_scene(p, r, 1.0);
            prop_assert_eq!(clamp_to_scene(once, r, 1.0), once);
        }

        #[test]
        fn prop_overlap_is_symmetric(
            ax in -2.0f32..2.0, ay in -2.0f32..2.0, az in -2.0f32..2.0,
            bx in -2.0f32..2.0, by in -2.0f32..2.0, bz in -2.0f32..2.0,
            ra in 0.001f32..1.0, rb in 0.001f32..1.0,
        ) {
            let a = Vec3::new(ax, ay, az);
            let b = Vec3::new(bx, by, bz);
            prop_assert_eq!(overlaps(a, ra, b, rb, SHRINK), overlaps(b, rb, a, ra, SHRINK));
        }
    }
}
