use std::collections::HashSet;

use crate::math::{Point2, PointKey};

/// Removes duplicate coordinates, keeping the first occurrence of each.
///
/// Relative order is preserved. Equality is exact; near-duplicates from
/// independently drawn neighbouring shapes are kept apart.
#[must_use]
pub fn dedup(points: &[Point2]) -> Vec<Point2> {
    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .filter(|p| seen.insert(PointKey::new(p)))
        .copied()
        .collect()
}
