use std::collections::HashSet;

use super::distance_2d::point_to_segment_dist;
use super::intersect_2d::segments_cross;
use super::{Point2, PointKey};

/// Topology-preserving Douglas–Peucker simplification of a coordinate
/// sequence.
///
/// Both endpoints are always kept. Vertices closer than `tolerance` to the
/// chord of their span are removed, unless that chord would cross or touch
/// another edge of the result. A simple chain or ring therefore stays
/// simple.
#[must_use]
pub fn douglas_peucker(points: &[Point2], tolerance: f64) -> Vec<Point2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut chords: Vec<(usize, usize)> = Vec::new();
    let mut stack = vec![(0, last)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let (mut max_dist, mut max_idx) = (0.0, start + 1);
        for i in (start + 1)..end {
            let d = point_to_segment_dist(&points[i], &points[start], &points[end]);
            if d > max_dist {
                max_dist = d;
                max_idx = i;
            }
        }
        if max_dist > tolerance || chord_crosses(points, start, end, &chords) {
            keep[max_idx] = true;
            stack.push((start, max_idx));
            stack.push((max_idx, end));
        } else {
            chords.push((start, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Checks the chord `start-end` against every input edge outside its span
/// and every chord already accepted.
fn chord_crosses(points: &[Point2], start: usize, end: usize, chords: &[(usize, usize)]) -> bool {
    let (a, b) = (&points[start], &points[end]);
    let edges = points
        .windows(2)
        .enumerate()
        .filter(|&(i, _)| i < start || i >= end)
        .map(|(_, w)| (&w[0], &w[1]));
    let accepted = chords.iter().map(|&(s, e)| (&points[s], &points[e]));
    edges
        .chain(accepted)
        .any(|(c, d)| segments_cross(a, b, c, d))
}

/// Simplifies a closed ring (first vertex repeated at the end).
///
/// Falls back to the original ring when simplification would leave fewer
/// than three distinct vertices, so the polygon stays valid.
#[must_use]
pub fn simplify_ring(ring: &[Point2], tolerance: f64) -> Vec<Point2> {
    let simplified = douglas_peucker(ring, tolerance);
    let distinct: HashSet<PointKey> = simplified.iter().map(PointKey::new).collect();
    if distinct.len() < 3 {
        return ring.to_vec();
    }
    simplified
}
