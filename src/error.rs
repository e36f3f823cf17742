use thiserror::Error;

/// Top-level error type for the floor-plan kernel.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("index {index} is out of range for a polygon with {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors related to entity lookups in the floor-plan arena.
#[derive(Debug, Error)]
pub enum EntityError {
    #[error("entity not found: {0}")]
    NotFound(String),

    #[error("entity {id} is a {actual}, expected {expected}")]
    WrongKind {
        id: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Errors related to reading or writing the persisted floor-plan shape.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("malformed floor plan json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`PlanError`].
pub type Result<T> = std::result::Result<T, PlanError>;
