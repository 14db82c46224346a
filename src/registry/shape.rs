use crate::geometry::{Geometry, ShapeKind};

slotmap::new_key_type! {
    /// Unique identifier for a shape in the registry.
    pub struct ShapeId;
}

/// A named shape.
///
/// Name and kind are fixed at registration; the geometry may be replaced
/// by simplification.
#[derive(Debug, Clone)]
pub struct Shape {
    name: String,
    kind: ShapeKind,
    pub(crate) geometry: Geometry,
}

impl Shape {
    pub(crate) fn new(name: String, geometry: Geometry) -> Self {
        Self {
            name,
            kind: geometry.kind(),
            geometry,
        }
    }

    /// The shape's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kind of geometry this shape was registered as.
    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// The current geometry.
    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}
