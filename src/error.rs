//! Error types
//!
//! Collider errors signal caller bugs (bad shape data); config errors come
//! from reading user-supplied settings.

use std::path::PathBuf;

/// Invalid collider geometry
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ColliderError {
    /// Polygons need at least a triangle
    #[error("polygon collider needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// NaN or infinite coordinate
    #[error("polygon vertex {0} is not finite")]
    NonFiniteVertex(usize),

    /// More separating axes than edges
    #[error("polygon has {normals} normals but only {vertices} vertices")]
    TooManyNormals { normals: usize, vertices: usize },

    /// Supplied normal is not unit length
    #[error("normal {0} is not unit length")]
    NonUnitNormal(usize),

    /// Circle radius must be finite and positive
    #[error("circle radius must be positive, got {0}")]
    InvalidRadius(f32),
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings JSON is malformed
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Settings parsed but describe an unusable simulation
    #[error("Invalid setting: {0}")]
    Invalid(String),
}
