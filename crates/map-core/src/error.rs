use thiserror::Error;

/// Errors raised while validating the static map configuration or resolving
/// commands coming from the presentation layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("map half extent must be positive, got {0}")]
    InvalidExtent(f32),
    #[error("grid spacing must be positive, got {0}")]
    InvalidGridSpacing(f32),
    #[error("duplicate location id `{0}`")]
    DuplicateLocation(String),
    #[error("location `{id}` at ({x}, {z}) lies outside the map (half extent {half_extent})")]
    LocationOutOfBounds {
        id: String,
        x: f32,
        z: f32,
        half_extent: f32,
    },
    #[error("unknown location id `{0}`")]
    UnknownLocation(String),
}
