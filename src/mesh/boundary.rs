use std::collections::HashSet;

use tracing::warn;

use crate::error::Result;
use crate::math::{Point2, PointKey};

use super::TriangulationEngine;

/// Returns `true` if boundary vertices are detected for this domain mode.
#[must_use]
pub fn boundary_supported(is_concave: bool) -> bool {
    ClassifyBoundary::new(is_concave).is_supported()
}

/// Flags the vertices lying on the outer boundary of a mesh.
pub struct ClassifyBoundary {
    is_concave: bool,
}

impl ClassifyBoundary {
    /// Creates a new `ClassifyBoundary` operation.
    #[must_use]
    pub fn new(is_concave: bool) -> Self {
        Self { is_concave }
    }

    /// Returns `true` if boundary detection is available for this domain.
    ///
    /// Concave domains have no boundary detection; their mask is all
    /// `false`.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        !self.is_concave
    }

    /// Executes the classification, returning one flag per vertex.
    ///
    /// A vertex is on the boundary iff its exact coordinate is a vertex of
    /// the engine's convex hull of `vertices`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine's convex hull query fails.
    pub fn execute(&self, vertices: &[Point2], engine: &impl TriangulationEngine) -> Result<Vec<bool>> {
        if !self.is_supported() {
            warn!("boundary detection for concave domains is not implemented; mask left empty");
            return Ok(vec![false; vertices.len()]);
        }

        let hull: HashSet<PointKey> = engine
            .convex_hull(vertices)?
            .iter()
            .map(PointKey::new)
            .collect();
        Ok(vertices
            .iter()
            .map(|v| hull.contains(&PointKey::new(v)))
            .collect())
    }
}
