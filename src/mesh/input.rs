use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, ShapeMeshError};
use crate::io::PolyFileData;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Point2, PointKey, TOLERANCE};
use crate::registry::ShapeRegistry;

use super::{dedup, MeshInput, TriangulationEngine};

/// Builds triangulation input from the registered shapes.
pub struct BuildMeshInput<'a> {
    registry: &'a ShapeRegistry,
    is_concave: bool,
}

impl<'a> BuildMeshInput<'a> {
    /// Creates a new `BuildMeshInput` operation.
    ///
    /// With `is_concave`, the convex hull of all vertices is emitted as a
    /// closed loop of constraint segments.
    #[must_use]
    pub fn new(registry: &'a ShapeRegistry, is_concave: bool) -> Self {
        Self {
            registry,
            is_concave,
        }
    }

    /// Executes the operation.
    ///
    /// Boundary coordinates of every shape are concatenated in insertion
    /// order and deduplicated. No holes are produced. The hull loop uses
    /// `engine`'s convex hull, the same one that classifies boundary
    /// vertices.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` if no shape is registered, or the engine's
    /// error if the hull cannot be computed.
    pub fn execute(&self, engine: &impl TriangulationEngine) -> Result<MeshInput> {
        if self.registry.is_empty() {
            return Err(ShapeMeshError::EmptyInput);
        }

        let raw: Vec<Point2> = self
            .registry
            .iter()
            .flat_map(|shape| shape.geometry().boundary_coords().iter().copied())
            .collect();
        let vertices = dedup(&raw);

        let segments = if self.is_concave {
            hull_segments(&vertices, engine)?
        } else {
            Vec::new()
        };

        debug!(
            raw = raw.len(),
            vertices = vertices.len(),
            segments = segments.len(),
            "mesh input built from shapes"
        );

        Ok(MeshInput {
            vertices,
            segments,
            holes: Vec::new(),
        })
    }

    /// Takes vertices, segments and holes from a parsed `.poly` file as-is.
    #[must_use]
    pub fn from_poly(data: PolyFileData) -> MeshInput {
        MeshInput {
            vertices: data.vertices,
            segments: data.segments,
            holes: data.holes,
        }
    }
}

/// Closed loop of segments around the convex hull of `vertices`.
///
/// Collinear vertices on hull edges split the loop. Only the hull is
/// constrained, not the concave outline of the shapes. A degenerate hull
/// yields no segments.
fn hull_segments(
    vertices: &[Point2],
    engine: &impl TriangulationEngine,
) -> Result<Vec<[usize; 2]>> {
    let index: HashMap<PointKey, usize> = vertices
        .iter()
        .enumerate()
        .map(|(i, p)| (PointKey::new(p), i))
        .collect();

    let ring = dedup(&engine.convex_hull(vertices)?);
    if ring.len() < 3 || signed_area_2d(&ring).abs() < TOLERANCE {
        return Ok(Vec::new());
    }
    let hull: Vec<usize> = ring
        .iter()
        .filter_map(|p| index.get(&PointKey::new(p)).copied())
        .collect();

    Ok((0..hull.len())
        .map(|i| [hull[i], hull[(i + 1) % hull.len()]])
        .collect())
}
