use crate::math::Point2;
use crate::registry::ShapeRegistry;

/// Assigns each triangle to the shape containing its centroid.
///
/// Shapes are tested in insertion order and a later match overwrites an
/// earlier one, so overlapping regions belong to the last registered
/// shape. Centroids outside every shape keep index 0.
pub struct MapShapeOwnership<'a> {
    centroids: &'a [Point2],
}

impl<'a> MapShapeOwnership<'a> {
    /// Creates a new `MapShapeOwnership` operation.
    #[must_use]
    pub fn new(centroids: &'a [Point2]) -> Self {
        Self { centroids }
    }

    /// Executes the mapping, returning one shape index per triangle.
    #[must_use]
    pub fn execute(&self, registry: &ShapeRegistry) -> Vec<usize> {
        let mut owners = vec![0; self.centroids.len()];
        for (index, shape) in registry.iter().enumerate() {
            for (owner, centroid) in owners.iter_mut().zip(self.centroids) {
                if shape.geometry().intersects(centroid) {
                    *owner = index;
                }
            }
        }
        owners
    }
}
