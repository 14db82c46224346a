use std::fmt;
use std::str::FromStr;

use crate::error::ShapeMeshError;

/// The kind of geometry a shape is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// A closed region bounded by an exterior ring.
    Polygon,
    /// An open polyline.
    Line,
    /// A single point.
    Point,
}

impl ShapeKind {
    /// Minimum number of input vertices accepted for this kind.
    #[must_use]
    pub fn min_vertices(self) -> usize {
        match self {
            Self::Polygon => 3,
            Self::Line | Self::Point => 1,
        }
    }

    /// Lower-case label used in log output and parsing.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Polygon => "polygon",
            Self::Line => "line",
            Self::Point => "point",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeMeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "polygon" | "poly" => Ok(Self::Polygon),
            "line" => Ok(Self::Line),
            "point" => Ok(Self::Point),
            other => Err(ShapeMeshError::InvalidShapeKind(other.to_owned())),
        }
    }
}
