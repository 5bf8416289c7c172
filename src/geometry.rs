//! Planar geometry helpers used by the steering behaviours.
//!
//! Stateless functions over [`glam::Vec2`]: magnitude clamping, distances,
//! unit vectors, the look-ahead segment test, and conversions between
//! direction vectors and headings in degrees.

use glam::Vec2;

/// Clamp `vector` to at most `max` in magnitude.
///
/// Vectors already within the limit are returned unchanged; longer vectors
/// are scaled down and keep their direction.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use tank_ai::geometry::truncate;
/// let clamped = truncate(Vec2::new(30.0, 40.0), 10.0);
/// assert!((clamped.length() - 10.0).abs() < 1e-5);
/// assert_eq!(truncate(Vec2::new(3.0, 4.0), 10.0), Vec2::new(3.0, 4.0));
/// ```
#[must_use]
pub fn truncate(vector: Vec2, max: f32) -> Vec2 {
    let length = vector.length();
    if length > max && length > 0.0 {
        vector * (max / length)
    } else {
        vector
    }
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(from: Vec2, to: Vec2) -> f32 {
    from.distance(to)
}

/// Unit vector in the direction of `vector`.
///
/// The zero vector, and vectors with non-finite components, map to
/// [`Vec2::ZERO`] instead of producing NaNs.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use tank_ai::geometry::unit_vector;
/// assert_eq!(unit_vector(Vec2::new(0.0, 5.0)), Vec2::Y);
/// assert_eq!(unit_vector(Vec2::ZERO), Vec2::ZERO);
/// ```
#[must_use]
pub fn unit_vector(vector: Vec2) -> Vec2 {
    if !vector.is_finite() {
        return Vec2::ZERO;
    }
    vector.normalize_or_zero()
}

/// Whether the segment `start..end` touches the circle at `center`.
///
/// The test uses the point of the segment closest to the centre, so a
/// circle lying between the two probe points is detected even when neither
/// endpoint is inside it. Touching the boundary counts as intersecting.
#[must_use]
pub fn line_intersects_circle(start: Vec2, end: Vec2, center: Vec2, radius: f32) -> bool {
    let segment = end - start;
    let length_sq = segment.length_squared();
    let t = if length_sq > 0.0 {
        ((center - start).dot(segment) / length_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closest = start + segment * t;
    closest.distance(center) <= radius
}

/// Heading in degrees, in `[0, 360)`, for a direction of travel.
///
/// `(1, 0)` is 0° and `(0, 1)` is 90°. The vector is negated before
/// `atan2` and 180° added back so the result covers `[0, 360)` instead of
/// `(-180, 180]`.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use tank_ai::geometry::heading_degrees;
/// assert!((heading_degrees(Vec2::new(0.0, 1.0)) - 90.0).abs() < 1e-4);
/// assert!((heading_degrees(Vec2::new(0.0, -1.0)) - 270.0).abs() < 1e-4);
/// ```
#[must_use]
pub fn heading_degrees(direction: Vec2) -> f32 {
    (-direction.y).atan2(-direction.x).to_degrees() + 180.0
}

/// Unit direction for a rotation given in degrees.
#[must_use]
pub fn heading_vector(rotation_degrees: f32) -> Vec2 {
    let radians = rotation_degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}
