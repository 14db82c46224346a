use std::collections::{HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, FixedVertexHandle, InnerTag};
use spade::{
    AngleLimit, ConstrainedDelaunayTriangulation, DelaunayTriangulation, InsertionError,
    Point2 as SpadePoint2, PositionInTriangulation, RefinementParameters, Triangulation,
};
use tracing::{debug, info, warn};

use crate::error::{Result, ShapeMeshError};
use crate::math::Point2;

use super::{MeshInput, TriangulateOptions};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Default cap on Steiner vertices a single refinement may insert.
pub const DEFAULT_MAX_ADDITIONAL_VERTICES: usize = 100_000;

/// Raw triangulation produced by an engine.
#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// Input vertices first, in input order, then Steiner vertices.
    pub vertices: Vec<Point2>,
    /// Counter-clockwise index triples into `vertices`.
    pub triangles: Vec<[usize; 3]>,
}

/// A constrained Delaunay triangulation backend.
pub trait TriangulationEngine {
    /// Triangulates `input` under a Triangle-style option string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOptions` for an unparseable option string and
    /// `EngineFailure` if the input cannot be triangulated.
    fn triangulate(&self, input: &MeshInput, options: &str) -> Result<EngineOutput>;

    /// Vertices on the convex hull of `vertices`, including collinear
    /// vertices lying on hull edges.
    ///
    /// # Errors
    ///
    /// Returns `EngineFailure` if a vertex cannot be inserted.
    fn convex_hull(&self, vertices: &[Point2]) -> Result<Vec<Point2>>;
}

/// Engine backed by spade's constrained Delaunay triangulation and its
/// Delaunay refinement.
#[derive(Debug, Clone, Copy)]
pub struct SpadeEngine {
    max_additional_vertices: usize,
}

impl Default for SpadeEngine {
    fn default() -> Self {
        Self {
            max_additional_vertices: DEFAULT_MAX_ADDITIONAL_VERTICES,
        }
    }
}

impl SpadeEngine {
    /// Creates an engine with the default Steiner vertex cap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of Steiner vertices per refinement.
    #[must_use]
    pub fn with_max_additional_vertices(mut self, max: usize) -> Self {
        self.max_additional_vertices = max;
        self
    }
}

impl TriangulationEngine for SpadeEngine {
    fn triangulate(&self, input: &MeshInput, options: &str) -> Result<EngineOutput> {
        let opts = TriangulateOptions::parse(options)?;
        if input.vertices.is_empty() {
            return Err(ShapeMeshError::EmptyInput);
        }
        input.validate()?;

        let mut cdt = Cdt::new();
        let handles = insert_vertices(&mut cdt, &input.vertices)?;
        if opts.planar_graph {
            insert_segments(&mut cdt, &handles, &input.segments)?;
        }
        let carve_exterior = opts.carves_exterior() && cdt.num_constraints() > 0;

        if opts.needs_refinement() {
            let angle = opts
                .min_angle
                .map_or_else(|| AngleLimit::from_deg(0.0), AngleLimit::from_deg);
            let mut params = RefinementParameters::<f64>::new()
                .with_angle_limit(angle)
                .with_max_additional_vertices(self.max_additional_vertices)
                .exclude_outer_faces(carve_exterior);
            if let Some(area) = opts.max_area {
                params = params.with_max_allowed_area(area);
            }
            let before = cdt.num_vertices();
            let refinement = cdt.refine(params);
            let steiner = cdt.num_vertices() - before;
            if !refinement.refinement_complete && opts.reports() {
                warn!(
                    limit = self.max_additional_vertices,
                    "refinement stopped at the Steiner vertex limit"
                );
            }
            if opts.verbose {
                info!(steiner, "refinement done");
            } else if opts.reports() {
                debug!(steiner, "refinement done");
            }
        }

        let mut seeds = Vec::new();
        if carve_exterior {
            seeds.extend(exterior_seeds(&cdt));
        }
        if opts.planar_graph {
            for hole in &input.holes {
                seeds.extend(hole_seeds(&cdt, hole));
            }
        }
        let removed = flood_unconstrained(&cdt, seeds);

        let vertices = cdt
            .vertices()
            .map(|v| to_point(v.position()))
            .collect();
        let triangles: Vec<[usize; 3]> = cdt
            .inner_faces()
            .filter(|face| !removed.contains(&face.fix().index()))
            .map(|face| face.vertices().map(|v| v.fix().index()))
            .collect();

        if triangles.is_empty() {
            return Err(ShapeMeshError::EngineFailure(
                "triangulation produced no triangles (too few or collinear vertices)".into(),
            ));
        }

        Ok(EngineOutput {
            vertices,
            triangles,
        })
    }

    fn convex_hull(&self, vertices: &[Point2]) -> Result<Vec<Point2>> {
        let points: Vec<SpadePoint2<f64>> = vertices
            .iter()
            .map(|p| SpadePoint2::new(p.x, p.y))
            .collect();
        let dt = DelaunayTriangulation::<SpadePoint2<f64>>::bulk_load(points).map_err(
            |e: InsertionError| ShapeMeshError::EngineFailure(format!("convex hull insert: {e}")),
        )?;

        if dt.num_vertices() < 3 || dt.all_vertices_on_line() {
            return Ok(dt.vertices().map(|v| to_point(v.position())).collect());
        }
        Ok(dt
            .convex_hull()
            .map(|edge| to_point(edge.from().position()))
            .collect())
    }
}

fn to_point(p: SpadePoint2<f64>) -> Point2 {
    Point2::new(p.x, p.y)
}

/// Inserts all vertices in order. Exact duplicates share one handle.
fn insert_vertices(cdt: &mut Cdt, vertices: &[Point2]) -> Result<Vec<FixedVertexHandle>> {
    let mut handles = Vec::with_capacity(vertices.len());
    for p in vertices {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| {
                ShapeMeshError::EngineFailure(format!("vertex ({}, {}): {e}", p.x, p.y))
            })?;
        handles.push(h);
    }
    Ok(handles)
}

fn insert_segments(
    cdt: &mut Cdt,
    handles: &[FixedVertexHandle],
    segments: &[[usize; 2]],
) -> Result<()> {
    for (i, &[a, b]) in segments.iter().enumerate() {
        let (from, to) = (handles[a], handles[b]);
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(ShapeMeshError::EngineFailure(format!(
                "segment {i} ({a}, {b}) crosses another segment"
            )));
        }
        cdt.add_constraint(from, to);
    }
    Ok(())
}

/// Inner faces adjacent to the outer face across an unconstrained edge.
fn exterior_seeds(cdt: &Cdt) -> Vec<FixedFaceHandle<InnerTag>> {
    let outer_fix = cdt.outer_face().fix();
    let mut seeds = Vec::new();
    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer_fix || cdt.is_constraint_edge(edge.as_undirected().fix()) {
            continue;
        }
        if let Some(inner) = edge.rev().face().as_inner() {
            seeds.push(inner.fix());
        }
    }
    seeds
}

/// Faces containing a hole point. A point on an unconstrained edge seeds
/// both neighbours.
fn hole_seeds(cdt: &Cdt, hole: &Point2) -> Vec<FixedFaceHandle<InnerTag>> {
    match cdt.locate(SpadePoint2::new(hole.x, hole.y)) {
        PositionInTriangulation::OnFace(face) => vec![face],
        PositionInTriangulation::OnEdge(edge) => {
            let edge = cdt.directed_edge(edge);
            if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                return Vec::new();
            }
            [edge.face(), edge.rev().face()]
                .into_iter()
                .filter_map(|f| f.as_inner().map(|inner| inner.fix()))
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Collects every face reachable from `seeds` without crossing a
/// constraint edge.
fn flood_unconstrained(cdt: &Cdt, seeds: Vec<FixedFaceHandle<InnerTag>>) -> HashSet<usize> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    for seed in seeds {
        if visited.insert(seed.index()) {
            queue.push_back(seed);
        }
    }

    while let Some(face_fix) = queue.pop_front() {
        let face = cdt.face(face_fix);
        for edge in face.adjacent_edges() {
            if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                continue;
            }
            if let Some(neighbor) = edge.rev().face().as_inner() {
                let n_fix = neighbor.fix();
                if visited.insert(n_fix.index()) {
                    queue.push_back(n_fix);
                }
            }
        }
    }

    visited
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::PointKey;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn unit_square_input() -> MeshInput {
        MeshInput::from_vertices(vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)])
    }

    fn total_area(out: &EngineOutput) -> f64 {
        out.triangles
            .iter()
            .map(|&[a, b, c]| {
                let (a, b, c) = (out.vertices[a], out.vertices[b], out.vertices[c]);
                (b - a).perp(&(c - a)).abs() * 0.5
            })
            .sum()
    }

    #[test]
    fn plain_square_gives_two_triangles() {
        let out = SpadeEngine::new().triangulate(&unit_square_input(), "").unwrap();
        assert_eq!(out.triangles.len(), 2);
        assert_eq!(out.vertices.len(), 4);
    }

    #[test]
    fn input_vertices_come_first() {
        let input = unit_square_input();
        let out = SpadeEngine::new().triangulate(&input, "q20a0.01").unwrap();
        assert!(out.vertices.len() > 4);
        assert_eq!(&out.vertices[..4], input.vertices.as_slice());
    }

    #[test]
    fn area_constraint_bounds_triangles() {
        let out = SpadeEngine::new().triangulate(&unit_square_input(), "a0.05").unwrap();
        assert!(out.triangles.len() >= 20);
        assert!((total_area(&out) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn triangles_are_counter_clockwise() {
        let out = SpadeEngine::new().triangulate(&unit_square_input(), "q25").unwrap();
        for &[a, b, c] in &out.triangles {
            let (a, b, c) = (out.vertices[a], out.vertices[b], out.vertices[c]);
            assert!((b - a).perp(&(c - a)) > 0.0);
        }
    }

    #[test]
    fn segments_ignored_without_p() {
        // L-shape outline: without `p` the convex hull is triangulated.
        let vertices = vec![
            p(0.0, 0.0),
            p(4.0, 0.0),
            p(4.0, 2.0),
            p(2.0, 2.0),
            p(2.0, 4.0),
            p(0.0, 4.0),
        ];
        let segments = (0..6).map(|i| [i, (i + 1) % 6]).collect();
        let input = MeshInput {
            vertices,
            segments,
            holes: Vec::new(),
        };
        let hull = SpadeEngine::new().triangulate(&input, "").unwrap();
        assert!((total_area(&hull) - 14.0).abs() < 1e-9);

        let carved = SpadeEngine::new().triangulate(&input, "p").unwrap();
        assert!((total_area(&carved) - 12.0).abs() < 1e-9);

        let kept = SpadeEngine::new().triangulate(&input, "pc").unwrap();
        assert!((total_area(&kept) - 14.0).abs() < 1e-9);
    }

    #[test]
    fn hole_is_carved_out() {
        let mut vertices = vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)];
        vertices.extend([p(4.0, 4.0), p(6.0, 4.0), p(6.0, 6.0), p(4.0, 6.0)]);
        let segments = vec![[0, 1], [1, 2], [2, 3], [3, 0], [4, 5], [5, 6], [6, 7], [7, 4]];
        let input = MeshInput {
            vertices,
            segments,
            holes: vec![p(5.0, 5.0)],
        };
        let out = SpadeEngine::new().triangulate(&input, "pq20").unwrap();
        assert!((total_area(&out) - 96.0).abs() < 1e-6);
    }

    #[test]
    fn crossing_segments_fail() {
        let input = MeshInput {
            vertices: vec![p(0.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(2.0, 0.0)],
            segments: vec![[0, 1], [2, 3]],
            holes: Vec::new(),
        };
        let err = SpadeEngine::new().triangulate(&input, "p").unwrap_err();
        assert!(matches!(err, ShapeMeshError::EngineFailure(_)));
    }

    #[test]
    fn collinear_input_fails() {
        let input = MeshInput::from_vertices(vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]);
        assert!(matches!(
            SpadeEngine::new().triangulate(&input, "q"),
            Err(ShapeMeshError::EngineFailure(_))
        ));
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(
            SpadeEngine::new().triangulate(&MeshInput::default(), "q"),
            Err(ShapeMeshError::EmptyInput)
        ));
    }

    #[test]
    fn bad_options_fail_before_work() {
        assert!(matches!(
            SpadeEngine::new().triangulate(&unit_square_input(), "qk"),
            Err(ShapeMeshError::InvalidOptions(_))
        ));
    }

    #[test]
    fn hull_includes_collinear_edge_vertices() {
        let pts = vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(1.0, 1.0)];
        let hull = SpadeEngine::new().convex_hull(&pts).unwrap();
        let keys: HashSet<PointKey> = hull.iter().map(PointKey::new).collect();
        assert_eq!(keys.len(), 5);
        assert!(keys.contains(&PointKey::new(&p(1.0, 0.0))));
        assert!(!keys.contains(&PointKey::new(&p(1.0, 1.0))));
    }

    #[test]
    fn hull_of_degenerate_sets() {
        let engine = SpadeEngine::new();
        assert!(engine.convex_hull(&[]).unwrap().is_empty());
        assert_eq!(engine.convex_hull(&[p(1.0, 1.0)]).unwrap().len(), 1);
        let line = engine
            .convex_hull(&[p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)])
            .unwrap();
        assert_eq!(line.len(), 3);
    }
}
