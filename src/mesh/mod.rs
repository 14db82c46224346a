mod boundary;
mod dedup;
mod engine;
mod input;
mod options;
mod ownership;

pub use boundary::{boundary_supported, ClassifyBoundary};
pub use dedup::dedup;
pub use engine::{
    EngineOutput, SpadeEngine, TriangulationEngine, DEFAULT_MAX_ADDITIONAL_VERTICES,
};
pub use input::BuildMeshInput;
pub use options::TriangulateOptions;
pub use ownership::MapShapeOwnership;

use crate::error::{Result, ShapeMeshError};
use crate::math::Point2;

/// Input handed to the triangulation engine.
///
/// Segment endpoints index into `vertices`. Retained verbatim between a
/// mesh run and later refinements so that only the options change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshInput {
    /// Input vertices.
    pub vertices: Vec<Point2>,
    /// Constraint segments as index pairs into `vertices`.
    pub segments: Vec<[usize; 2]>,
    /// Points marking regions to leave untriangulated.
    pub holes: Vec<Point2>,
}

impl MeshInput {
    /// Creates an input with vertices only.
    #[must_use]
    pub fn from_vertices(vertices: Vec<Point2>) -> Self {
        Self {
            vertices,
            ..Self::default()
        }
    }

    /// Checks that every segment endpoint refers to an existing vertex.
    ///
    /// # Errors
    ///
    /// Returns `EngineFailure` naming the first offending segment.
    pub fn validate(&self) -> Result<()> {
        let n = self.vertices.len();
        if let Some((i, seg)) = self
            .segments
            .iter()
            .enumerate()
            .find(|(_, seg)| seg[0] >= n || seg[1] >= n)
        {
            return Err(ShapeMeshError::EngineFailure(format!(
                "segment {i} ({}, {}) references a vertex outside 0..{n}",
                seg[0], seg[1]
            )));
        }
        Ok(())
    }
}

/// Result of a triangulation run.
///
/// Replaced wholesale by every mesh or refinement call.
#[derive(Debug, Clone, Default)]
pub struct MeshResult {
    /// Output vertices: the input vertices followed by any Steiner vertices.
    pub vertices: Vec<Point2>,
    /// Triangles as counter-clockwise index triples into `vertices`.
    pub triangles: Vec<[usize; 3]>,
    /// One centroid per triangle.
    pub centroids: Vec<Point2>,
    /// One flag per vertex, `true` on the outer boundary.
    pub boundary_mask: Vec<bool>,
    /// Owning shape index per triangle, filled on first request.
    pub shape_of_triangle: Option<Vec<usize>>,
}

impl MeshResult {
    /// Number of boundary vertices.
    #[must_use]
    pub fn boundary_count(&self) -> usize {
        self.boundary_mask.iter().filter(|&&b| b).count()
    }
}

/// Mean of the three corners of every triangle.
#[must_use]
pub fn triangle_centroids(vertices: &[Point2], triangles: &[[usize; 3]]) -> Vec<Point2> {
    triangles
        .iter()
        .map(|&[a, b, c]| {
            let (a, b, c) = (vertices[a], vertices[b], vertices[c]);
            Point2::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
        })
        .collect()
}
