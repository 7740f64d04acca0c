//! Closed Catmull-Rom splines
//!
//! A curve is a ring of control points. The integer part of the parameter
//! picks the segment, the fractional part runs along it, so `t` grows without
//! bound while the curve keeps looping.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Fewest points that make a Catmull-Rom segment
pub const MIN_CONTROL_POINTS: usize = 4;

/// Ordered control points of a closed curve (indices wrap modulo the count)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec3>", into = "Vec<Vec3>")]
pub struct ControlPoints {
    points: Vec<Vec3>,
}

impl ControlPoints {
    /// Build a curve, returning `None` when there are fewer than four points
    pub fn new(points: Vec<Vec3>) -> Option<Self> {
        if points.len() < MIN_CONTROL_POINTS {
            return None;
        }
        Some(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a curve holds at least four points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[Vec3] {
        &self.points
    }

    /// The four points `i-1, i, i+1, i+2` (mod count) of segment `i`
    fn window(&self, segment: usize) -> [Vec3; 4] {
        let n = self.points.len();
        let i = segment % n;
        [
            self.points[(i + n - 1) % n],
            self.points[i],
            self.points[(i + 1) % n],
            self.points[(i + 2) % n],
        ]
    }

    /// Split `t` into (segment index, local parameter)
    fn locate(t: f32) -> (usize, f32) {
        let floor = t.floor();
        (floor as usize, t - floor)
    }
}

impl TryFrom<Vec<Vec3>> for ControlPoints {
    type Error = String;

    fn try_from(points: Vec<Vec3>) -> Result<Self, Self::Error> {
        let count = points.len();
        Self::new(points).ok_or_else(|| {
            format!("closed curve needs at least {MIN_CONTROL_POINTS} control points, got {count}")
        })
    }
}

impl From<ControlPoints> for Vec<Vec3> {
    fn from(curve: ControlPoints) -> Self {
        curve.points
    }
}

/// Catmull-Rom basis weights at local parameter `u`
#[inline]
fn basis(u: f32) -> [f32; 4] {
    let u2 = u * u;
    let u3 = u2 * u;
    [
        0.5 * (-u3 + 2.0 * u2 - u),
        0.5 * (3.0 * u3 - 5.0 * u2 + 2.0),
        0.5 * (-3.0 * u3 + 4.0 * u2 + u),
        0.5 * (u3 - u2),
    ]
}

/// Derivatives of the basis weights with respect to `u`
#[inline]
fn basis_derivative(u: f32) -> [f32; 4] {
    let u2 = u * u;
    [
        0.5 * (-3.0 * u2 + 4.0 * u - 1.0),
        0.5 * (9.0 * u2 - 10.0 * u),
        0.5 * (-9.0 * u2 + 8.0 * u + 1.0),
        0.5 * (3.0 * u2 - 2.0 * u),
    ]
}

#[inline]
fn combine(p: [Vec3; 4], w: [f32; 4]) -> Vec3 {
    p[0] * w[0] + p[1] * w[1] + p[2] * w[2] + p[3] * w[3]
}

/// Point on a single segment given its four control points
pub fn evaluate_segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, u: f32) -> Vec3 {
    combine([p0, p1, p2, p3], basis(u))
}

/// First derivative on a single segment given its four control points
pub fn evaluate_segment_derivative(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, u: f32) -> Vec3 {
    combine([p0, p1, p2, p3], basis_derivative(u))
}

/// Position on the closed curve at parameter `t`
///
/// `t` must be finite and non-negative; callers derive it from elapsed time
/// and a non-negative speed.
pub fn evaluate_position(curve: &ControlPoints, t: f32) -> Vec3 {
    debug_assert!(t >= 0.0, "negative curve parameter {t}");
    let (segment, u) = ControlPoints::locate(t);
    combine(curve.window(segment), basis(u))
}

/// Tangent (not normalized) on the closed curve at parameter `t`
pub fn evaluate_tangent(curve: &ControlPoints, t: f32) -> Vec3 {
    debug_assert!(t >= 0.0, "negative curve parameter {t}");
    let (segment, u) = ControlPoints::locate(t);
    combine(curve.window(segment), basis_derivative(u))
}

/// Built-in flight path of the aircraft, relative to its anchor
pub fn default_flight_path() -> ControlPoints {
    ControlPoints {
        points: vec![
            Vec3::new(0.00, 0.60, 0.00),
            Vec3::new(0.35, 0.55, 0.03),
            Vec3::new(0.60, 0.30, 0.05),
            Vec3::new(0.65, 0.00, 0.03),
            Vec3::new(0.50, -0.35, 0.00),
            Vec3::new(0.20, -0.55, -0.03),
            Vec3::new(-0.15, -0.60, -0.05),
            Vec3::new(-0.45, -0.45, -0.03),
            Vec3::new(-0.65, -0.15, 0.00),
            Vec3::new(-0.60, 0.20, 0.03),
            Vec3::new(-0.40, 0.45, 0.05),
            Vec3::new(-0.20, 0.60, 0.03),
        ],
    }
}

/// Built-in camera fly-path around the scene
pub fn default_camera_path() -> ControlPoints {
    ControlPoints {
        points: vec![
            Vec3::new(0.0, -1.2, 0.5),
            Vec3::new(0.85, -0.85, 0.45),
            Vec3::new(1.2, 0.0, 0.4),
            Vec3::new(0.85, 0.85, 0.45),
            Vec3::new(0.0, 1.2, 0.5),
            Vec3::new(-0.85, 0.85, 0.55),
            Vec3::new(-1.2, 0.0, 0.6),
            Vec3::new(-0.85, -0.85, 0.55),
        ],
    }
}
