//! Engine error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpticsError {
    /// Object distance or focal length is zero, so the thin-element
    /// equation has no solution.
    #[error("Degenerate configuration: d={object_distance}, f={focal_length}")]
    DegenerateConfiguration {
        object_distance: f64,
        focal_length: f64,
    },

    #[error("Outline '{name}' has no points with a defined height")]
    EmptyOutline { name: String },

    #[error("Unknown object: {0}")]
    UnknownObject(String),

    #[error("Failed to parse outline catalog: {0}")]
    Catalog(#[source] serde_json::Error),

    #[error("Failed to parse simulation snapshot: {0}")]
    InvalidSnapshot(#[source] serde_json::Error),
}

impl OpticsError {
    pub fn is_degenerate(&self) -> bool {
        matches!(self, OpticsError::DegenerateConfiguration { .. })
    }
}
