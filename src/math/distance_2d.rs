use super::Point2;

/// Returns the minimum distance from `p` to the line segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }

    // Project onto the infinite line, clamp to the segment.
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    (p - closest).norm()
}

/// Returns `true` if `p` lies on segment `a`→`b` within `tolerance`.
#[must_use]
pub fn point_on_segment(p: &Point2, a: &Point2, b: &Point2, tolerance: f64) -> bool {
    point_to_segment_dist(p, a, b) <= tolerance
}
