//! Planar geometry backing each registered shape.
//!
//! Provides construction from coordinate sequences, area, boundary-inclusive
//! point intersection, simplification, and boundary coordinate extraction.

mod kind;

pub use kind::ShapeKind;

use crate::error::{Result, ShapeMeshError};
use crate::math::distance_2d::point_on_segment;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::simplify_2d::{douglas_peucker, simplify_ring};
use crate::math::{Point2, PointKey, TOLERANCE};

/// Geometry of a single shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Polygon stored as a closed exterior ring (first vertex repeated last).
    Polygon(Vec<Point2>),
    /// Polyline through the given coordinates.
    Line(Vec<Point2>),
    /// A single point.
    Point(Point2),
}

impl Geometry {
    /// Builds a geometry of the given kind from a vertex sequence.
    ///
    /// Polygon rings are closed automatically if the last vertex does not
    /// repeat the first.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMeshError::InvalidShape` if the vertex count does not
    /// suit the kind or a coordinate is not finite.
    pub fn new(kind: ShapeKind, vertices: &[Point2]) -> Result<Self> {
        if let Some(bad) = vertices.iter().find(|v| !v.x.is_finite() || !v.y.is_finite()) {
            return Err(ShapeMeshError::InvalidShape(format!(
                "non-finite coordinate ({}, {})",
                bad.x, bad.y
            )));
        }
        if vertices.len() < kind.min_vertices() {
            return Err(ShapeMeshError::InvalidShape(format!(
                "{kind} needs at least {} vertices, got {}",
                kind.min_vertices(),
                vertices.len()
            )));
        }

        match kind {
            ShapeKind::Polygon => {
                let mut ring = vertices.to_vec();
                if PointKey::new(&ring[0]) != PointKey::new(&ring[ring.len() - 1]) {
                    ring.push(ring[0]);
                }
                Ok(Self::Polygon(ring))
            }
            ShapeKind::Line => Ok(Self::Line(vertices.to_vec())),
            ShapeKind::Point => {
                if vertices.len() != 1 {
                    return Err(ShapeMeshError::InvalidShape(format!(
                        "point needs exactly 1 vertex, got {}",
                        vertices.len()
                    )));
                }
                Ok(Self::Point(vertices[0]))
            }
        }
    }

    /// Returns the kind of this geometry.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Polygon(_) => ShapeKind::Polygon,
            Self::Line(_) => ShapeKind::Line,
            Self::Point(_) => ShapeKind::Point,
        }
    }

    /// Enclosed area. Zero for lines and points.
    #[must_use]
    pub fn area(&self) -> f64 {
        match self {
            Self::Polygon(ring) => signed_area_2d(ring).abs(),
            Self::Line(_) | Self::Point(_) => 0.0,
        }
    }

    /// Returns `true` if the point touches the geometry (interior or boundary).
    #[must_use]
    pub fn intersects(&self, point: &Point2) -> bool {
        match self {
            Self::Polygon(ring) => {
                on_chain(point, ring) || winding_number(point, ring) != 0
            }
            Self::Line(coords) => {
                if coords.len() == 1 {
                    return point_on_segment(point, &coords[0], &coords[0], TOLERANCE);
                }
                on_chain(point, coords)
            }
            Self::Point(p) => point_on_segment(point, p, p, TOLERANCE),
        }
    }

    /// Returns a simplified copy.
    ///
    /// A vertex is only dropped if the shortcut replacing it crosses no
    /// other edge. Polygons keep at least three distinct vertices and line
    /// endpoints are never removed.
    #[must_use]
    pub fn simplify(&self, tolerance: f64) -> Self {
        match self {
            Self::Polygon(ring) => Self::Polygon(simplify_ring(ring, tolerance)),
            Self::Line(coords) => Self::Line(douglas_peucker(coords, tolerance)),
            Self::Point(p) => Self::Point(*p),
        }
    }

    /// Closed exterior ring, if this geometry has one.
    #[must_use]
    pub fn exterior(&self) -> Option<&[Point2]> {
        match self {
            Self::Polygon(ring) => Some(ring.as_slice()),
            Self::Line(_) | Self::Point(_) => None,
        }
    }

    /// Boundary coordinates used to seed triangulation vertices.
    ///
    /// The closed exterior ring for polygons, the coordinate sequence
    /// otherwise.
    #[must_use]
    pub fn boundary_coords(&self) -> &[Point2] {
        match self {
            Self::Polygon(ring) | Self::Line(ring) => ring,
            Self::Point(p) => std::slice::from_ref(p),
        }
    }
}

fn on_chain(point: &Point2, chain: &[Point2]) -> bool {
    chain
        .windows(2)
        .any(|w| point_on_segment(point, &w[0], &w[1], TOLERANCE))
}

/// Winding number of a closed ring around `point`.
fn winding_number(point: &Point2, ring: &[Point2]) -> i32 {
    let mut wn = 0;
    for w in ring.windows(2) {
        let (a, b) = (&w[0], &w[1]);
        let side = (b - a).perp(&(point - a));
        if a.y <= point.y {
            if b.y > point.y && side > 0.0 {
                wn += 1;
            }
        } else if b.y <= point.y && side < 0.0 {
            wn -= 1;
        }
    }
    wn
}
