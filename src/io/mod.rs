//! Legacy file input.

mod poly_file;

pub use poly_file::{read_poly, PolyFileData};
