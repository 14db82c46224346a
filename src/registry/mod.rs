mod shape;

pub use shape::{Shape, ShapeId};

use std::collections::HashMap;

use slotmap::SlotMap;
use tracing::debug;

use crate::error::{Result, ShapeMeshError};
use crate::geometry::{Geometry, ShapeKind};
use crate::math::Point2;

/// Ordered collection of named shapes.
///
/// Shapes live in an arena keyed by [`ShapeId`]. Insertion order is kept
/// separately and defines each shape's index, which is the tag used for
/// mesh ownership.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    shapes: SlotMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
    by_name: HashMap<String, ShapeId>,
}

impl ShapeRegistry {
    /// Creates a new, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a shape, parsing its kind from a string.
    ///
    /// Accepted kinds are `"polygon"` (or `"poly"`), `"line"` and `"point"`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidShapeKind` for any other kind string, and the errors
    /// of [`ShapeRegistry::register_kind`].
    pub fn register(&mut self, name: &str, vertices: &[Point2], kind: &str) -> Result<ShapeId> {
        let kind: ShapeKind = kind.parse()?;
        self.register_kind(name, vertices, kind)
    }

    /// Registers a shape of a known kind.
    ///
    /// # Errors
    ///
    /// Returns `InvalidShape` for an empty name or an unsuitable vertex
    /// sequence, and `DuplicateShape` if the name is already taken.
    pub fn register_kind(
        &mut self,
        name: &str,
        vertices: &[Point2],
        kind: ShapeKind,
    ) -> Result<ShapeId> {
        if name.is_empty() {
            return Err(ShapeMeshError::InvalidShape("shape name must not be empty".into()));
        }
        if self.by_name.contains_key(name) {
            return Err(ShapeMeshError::DuplicateShape(name.to_owned()));
        }

        let geometry = Geometry::new(kind, vertices)?;
        let id = self.shapes.insert(Shape::new(name.to_owned(), geometry));
        self.order.push(id);
        self.by_name.insert(name.to_owned(), id);

        debug!(
            kind = kind.as_str(),
            shape = name,
            vertices = vertices.len(),
            "shape registered"
        );
        Ok(id)
    }

    /// Simplifies one named shape, or every shape when `name` is `None`.
    ///
    /// Geometry is replaced in place; insertion order and identity are
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `UnknownShape` if `name` is not registered and
    /// `InvalidShape` if `tolerance` is negative or not finite.
    pub fn simplify(&mut self, tolerance: f64, name: Option<&str>) -> Result<()> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ShapeMeshError::InvalidShape(format!(
                "simplification tolerance must be finite and non-negative, got {tolerance}"
            )));
        }

        let targets = match name {
            Some(name) => vec![self.id_of(name)?],
            None => self.order.clone(),
        };
        for id in targets {
            if let Some(shape) = self.shapes.get_mut(id) {
                let before = shape.geometry.boundary_coords().len();
                shape.geometry = shape.geometry.simplify(tolerance);
                debug!(
                    shape = shape.name(),
                    before,
                    after = shape.geometry.boundary_coords().len(),
                    "shape simplified"
                );
            }
        }
        Ok(())
    }

    /// Returns `true` if the named shape touches `point`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownShape` if `name` is not registered.
    pub fn contains_point(&self, name: &str, point: &Point2) -> Result<bool> {
        Ok(self.get(name)?.geometry().intersects(point))
    }

    /// Sum of all shape areas, in insertion order.
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.iter().map(|shape| shape.geometry().area()).sum()
    }

    /// Characteristic edge length `sqrt(total_area) / samples`.
    ///
    /// Diagnostic only: nothing feeds this back into triangulation options.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn resolution(&self, samples: usize) -> f64 {
        self.total_area().sqrt() / samples.max(1) as f64
    }

    /// Returns the shape registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownShape` if `name` is not registered.
    pub fn get(&self, name: &str) -> Result<&Shape> {
        let id = self.id_of(name)?;
        self.shapes
            .get(id)
            .ok_or_else(|| ShapeMeshError::UnknownShape(name.to_owned()))
    }

    /// Insertion index of the named shape.
    ///
    /// # Errors
    ///
    /// Returns `UnknownShape` if `name` is not registered.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        let id = self.id_of(name)?;
        self.order
            .iter()
            .position(|&o| o == id)
            .ok_or_else(|| ShapeMeshError::UnknownShape(name.to_owned()))
    }

    /// Shape names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(Shape::name)
    }

    /// Shapes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|&id| self.shapes.get(id))
    }

    /// Number of registered shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no shape is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn id_of(&self, name: &str) -> Result<ShapeId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ShapeMeshError::UnknownShape(name.to_owned()))
    }
}
