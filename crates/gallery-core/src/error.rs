//! Error types for scene and catalog construction.

use thiserror::Error;

/// Failure while building the static scene description.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("primitive `{label}` has invalid dimensions {dims:?}")]
    DegenerateGeometry { label: String, dims: [f32; 3] },
    #[error("primitive `{label}` has a non-finite transform")]
    InvalidTransform { label: String },
    #[error("light `{label}` has invalid parameters")]
    InvalidLight { label: String },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Failure while validating or placing painting records.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    #[error("painting `{id}` has invalid size {width}x{height}")]
    InvalidSize {
        id: String,
        width: f32,
        height: f32,
    },
    #[error("painting id `{0}` appears more than once")]
    DuplicateId(String),
}
