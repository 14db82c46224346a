pub mod distance_2d;
pub mod intersect_2d;
pub mod point_key;
pub mod polygon_2d;
pub mod simplify_2d;

pub use point_key::PointKey;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;
