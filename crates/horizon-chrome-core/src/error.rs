//! Error types for Horizon Chrome.

use thiserror::Error;

use crate::region_id::RegionId;

/// The main error type for chrome operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChromeError {
    /// A region with this id is already part of the region set.
    #[error("region {0} is already registered")]
    DuplicateRegion(RegionId),

    /// No region with this id is part of the region set.
    #[error("region {0} is not registered")]
    UnknownRegion(RegionId),

    /// A DPI value the window manager never reports.
    #[error("invalid DPI value: {0}")]
    InvalidDpi(u32),

    /// A chrome metric is out of range.
    #[error("invalid chrome metric `{field}`: {reason}")]
    InvalidMetric { field: &'static str, reason: String },

    /// A request to the platform window failed.
    ///
    /// Requests are fire-and-forget; this error is reported and logged,
    /// never retried.
    #[error("platform request failed: {0}")]
    Platform(String),

    /// The window has been torn down.
    #[error("the window is closing")]
    WindowClosed,
}

impl ChromeError {
    /// Create a platform error from any displayable cause.
    pub fn platform(cause: impl std::fmt::Display) -> Self {
        Self::Platform(cause.to_string())
    }
}

/// A specialized Result type for chrome operations.
pub type Result<T> = std::result::Result<T, ChromeError>;
