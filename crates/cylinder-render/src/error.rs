//! Error types for cylinder construction and configuration

use thiserror::Error;

/// Result type for renderer operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while building the cylinder or its lighting setup
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid scale: {0} (must be finite and > 0)")]
    InvalidScale(f32),

    #[error("Too few sections: {0} (need at least {min})", min = crate::mesh::MIN_SECTIONS)]
    TooFewSections(u32),

    #[error("Too many sections: {0} (at most {max})", max = crate::mesh::MAX_SECTIONS)]
    TooManySections(u32),

    #[error("Invalid lighting {field}: {value}")]
    InvalidLighting { field: &'static str, value: f32 },

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
