use super::distance_2d::point_on_segment;
use super::{Point2, PointKey, TOLERANCE};

/// Returns `true` if segments `a0-a1` and `b0-b1` cross or touch.
///
/// Touching only at an endpoint the two segments share does not count, so
/// consecutive edges of a chain never report a crossing. Collinear overlap
/// always counts.
#[must_use]
pub fn segments_cross(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let da = a1 - a0;
    let db = b1 - b0;
    let d = b0 - a0;
    let eps = TOLERANCE;

    let cross = da.perp(&db);
    if cross.abs() >= eps {
        let t = d.perp(&db) / cross;
        let u = d.perp(&da) / cross;
        if t < -eps || t > 1.0 + eps || u < -eps || u > 1.0 + eps {
            return false;
        }
        let at_a_end = t <= eps || t >= 1.0 - eps;
        let at_b_end = u <= eps || u >= 1.0 - eps;
        return !(at_a_end && at_b_end && share_endpoint(a0, a1, b0, b1));
    }

    // Parallel: only collinear segments can meet.
    if d.perp(&da).abs() >= eps || (b1 - a0).perp(&da).abs() >= eps {
        return false;
    }
    let len2 = da.norm_squared();
    if len2 < eps {
        return point_on_segment(a0, b0, b1, eps) && !share_endpoint(a0, a1, b0, b1);
    }
    let t0 = d.dot(&da) / len2;
    let t1 = (b1 - a0).dot(&da) / len2;
    let overlap = t0.max(t1).min(1.0) - t0.min(t1).max(0.0);
    overlap > eps || (overlap >= -eps && !share_endpoint(a0, a1, b0, b1))
}

fn share_endpoint(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let (b0, b1) = (PointKey::new(b0), PointKey::new(b1));
    [a0, a1].into_iter().map(PointKey::new).any(|k| k == b0 || k == b1)
}
