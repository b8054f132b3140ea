#![forbid(unsafe_code)]

//! geogrid error model.
//!
//! The engine itself is infallible once constructed — degenerate values are
//! clamped or substituted at the boundary, and a zero-extent selection is a
//! defined outcome, not a failure. What can fail is construction of the host
//! adapters, and those failures are fatal and unretried: the overlay cannot
//! exist without a drawing surface.

use std::fmt;

/// Construction-time failures reported by host adapters.
#[derive(Debug)]
pub enum OverlayError {
    /// The 2D drawing context could not be acquired.
    SurfaceUnavailable(String),

    /// The map container element was not found or never became ready.
    ContainerMissing(String),
}

/// Standard result type for geogrid adapter constructors.
pub type Result<T> = std::result::Result<T, OverlayError>;

impl OverlayError {
    /// Error type label for metrics and tracing.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::SurfaceUnavailable(_) => "surface",
            Self::ContainerMissing(_) => "container",
        }
    }
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceUnavailable(msg) => write!(f, "2D drawing context unavailable: {msg}"),
            Self::ContainerMissing(msg) => write!(f, "map container missing: {msg}"),
        }
    }
}

impl std::error::Error for OverlayError {}
