//! Constrained quality triangular meshing of named 2D shapes.
//!
//! Shapes (polygons, polylines, points) are registered by name, merged into
//! one triangulation input, meshed with a constrained Delaunay engine, and
//! every resulting triangle is tagged with the shape that owns it.

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod io;
pub mod math;
pub mod mesh;
pub mod mesher;
pub mod registry;

pub use config::MesherConfig;
pub use error::{Result, ShapeMeshError};
pub use mesher::ShapeMesher;
