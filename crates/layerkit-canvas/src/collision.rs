//! Point-in-shape predicates used for hit-testing.
//!
//! All predicates are pure and never fail: degenerate input (too few vertices,
//! zero-length segments) yields a plain `false` or falls back to a simpler
//! distance test.

use layerkit_core::Point;

/// Squared segment length below which a segment is treated as a single point.
const DEGENERATE_SEGMENT_EPSILON: f64 = 1e-12;

/// Even-odd ray casting test.
///
/// `ring` is closed implicitly: the edge from the last vertex back to the
/// first is always tested, so callers may pass the vertices with or without a
/// repeated closing vertex. Rings with fewer than three vertices contain
/// nothing.
pub fn point_in_polygon(point: &Point, ring: &[Point]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let (x, y) = (point.x, point.y);
    let mut inside = false;
    let mut j = ring.len() - 1;

    for i in 0..ring.len() {
        let a = &ring[i];
        let b = &ring[j];
        if ((a.y > y) != (b.y > y)) && (x < (b.x - a.x) * (y - a.y) / (b.y - a.y) + a.x) {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Returns true if `point` lies within `max_distance` of the segment `a`-`b`.
///
/// The projection is clamped to the segment, so points beyond either end are
/// measured against the nearest endpoint rather than the infinite line.
pub fn point_near_line(point: &Point, a: &Point, b: &Point, max_distance: f64) -> bool {
    distance_to_segment(point, a, b) <= max_distance
}

/// Distance from `point` to the closest point of segment `a`-`b`.
pub fn distance_to_segment(point: &Point, a: &Point, b: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;

    if length_sq < DEGENERATE_SEGMENT_EPSILON {
        return point.distance_to(a);
    }

    let t = (((point.x - a.x) * dx + (point.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * dx, a.y + t * dy);
    point.distance_to(&closest)
}

/// Returns true if `point` is within `tolerance` of any consecutive segment.
///
/// Open paths with fewer than two points have no segments.
pub fn point_near_polyline(point: &Point, points: &[Point], tolerance: f64) -> bool {
    points
        .windows(2)
        .any(|pair| point_near_line(point, &pair[0], &pair[1], tolerance))
}

/// Axis-aligned box test, inclusive on all four edges.
///
/// A negative size extends the box to the left/up of `origin`.
pub fn point_in_box(point: &Point, origin: &Point, size: &Point) -> bool {
    let (min_x, max_x) = ordered(origin.x, origin.x + size.x);
    let (min_y, max_y) = ordered(origin.y, origin.y + size.y);
    min_x <= point.x && point.x <= max_x && min_y <= point.y && point.y <= max_y
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
