//! Error types for the render crate.

use thiserror::Error;

use crate::backdrop::BackdropKind;

/// Errors that can occur while preparing chrome visuals.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The compositor cannot provide the requested backdrop material.
    #[error("backdrop {0:?} is not available on this system")]
    BackdropUnavailable(BackdropKind),

    /// The compositor refused to create a resource.
    #[error("compositor error: {0}")]
    Compositor(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
