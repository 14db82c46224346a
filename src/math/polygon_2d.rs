use super::distance_2d::point_on_segment;
use super::{Point2, PointKey, TOLERANCE};

/// Computes the signed area of a polygon ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. A closing vertex
/// equal to the first one contributes nothing, so open and closed rings
/// give the same result.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Ray-casting point-in-polygon test on a vertex ring.
///
/// Points on an edge or equal to a vertex count as inside. The ring may be
/// open or closed. Separate from [`crate::geometry::Geometry::intersects`]
/// so that its inclusive edge semantics stay fixed.
#[must_use]
pub fn point_in_poly(x: f64, y: f64, poly: &[Point2]) -> bool {
    let n = poly.len();
    if n == 0 {
        return false;
    }
    let pt = Point2::new(x, y);
    let key = PointKey::new(&pt);
    if poly.iter().any(|v| PointKey::new(v) == key) {
        return true;
    }
    if n < 3 {
        return n == 2 && point_on_segment(&pt, &poly[0], &poly[1], TOLERANCE);
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (&poly[j], &poly[i]);
        if point_on_segment(&pt, a, b, TOLERANCE) {
            return true;
        }
        if (a.y > y) != (b.y > y) {
            let x_cross = (b.x - a.x) * (y - a.y) / (b.y - a.y) + a.x;
            if x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
