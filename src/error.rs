//! Error types for the form conversion library.
//!
//! This module defines all error types that can occur while turning a PDF
//! form-field layer into template markup.

/// Result type alias for form conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during form conversion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The dispatcher selected a render primitive the active backend cannot
    /// render. This is a dispatcher/backend contract violation, not bad input
    /// data, so it aborts the run instead of being skipped.
    #[error("Backend cannot render primitive '{primitive}' for field '{field}'")]
    UnknownPrimitive {
        /// Fully-qualified name of the offending field
        field: String,
        /// Render primitive the backend declined
        primitive: String,
    },

    /// The external rasterizer exited non-zero. The exit status and captured
    /// stderr are attached for diagnostics; no automatic retry is attempted.
    #[error("External conversion failed with status {status}: {stderr}")]
    ExternalConversionFailure {
        /// Exit status reported by the rasterizer process
        status: i32,
        /// Captured stderr output
        stderr: String,
    },

    /// The base document is missing an element the compositor relies on
    /// (e.g. `#page-container` or a per-page `.pf` element).
    #[error("Base document is missing expected element: {0}")]
    MissingElement(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
