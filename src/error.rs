use thiserror::Error;

/// Top-level error type for the shape meshing pipeline.
#[derive(Debug, Error)]
pub enum ShapeMeshError {
    #[error("shape kind must be 'polygon', 'line', or 'point', got '{0}'")]
    InvalidShapeKind(String),

    #[error("unknown shape: {0}")]
    UnknownShape(String),

    #[error("shape already registered: {0}")]
    DuplicateShape(String),

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("malformed poly file at line {line}: {reason}")]
    MalformedPolyFile { line: usize, reason: String },

    #[error("unsupported plot format: {0} (choose between .png, .jpg, .jpeg, .pdf, .gif, .eps, .fig)")]
    UnsupportedFormat(String),

    #[error("triangulation engine failed: {0}")]
    EngineFailure(String),

    #[error("invalid triangulation options: {0}")]
    InvalidOptions(String),

    #[error("no vertices to triangulate")]
    EmptyInput,

    #[error("no mesh has been generated yet")]
    NoMesh,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for results using [`ShapeMeshError`].
pub type Result<T> = std::result::Result<T, ShapeMeshError>;
