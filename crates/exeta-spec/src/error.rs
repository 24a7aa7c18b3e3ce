//! Error types for catalog loading, pattern validation and filters.

use thiserror::Error;

/// Errors raised while reading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The sprite identifier list of a frame group disagrees with its declared
/// pattern dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    /// `spriteId` length differs from the product of the five dimensions.
    #[error(
        "sprite count mismatch: pattern {frames}x{depth}x{height}x{width}x{layers} \
         expects {expected} sprite ids, found {actual}"
    )]
    CountMismatch {
        frames: u32,
        depth: u32,
        height: u32,
        width: u32,
        layers: u32,
        expected: usize,
        actual: usize,
    },

    /// One of the pattern dimensions is zero.
    #[error("pattern dimension '{0}' must be at least 1")]
    ZeroDimension(&'static str),

    /// The dimension product does not fit in memory-addressable range.
    #[error("pattern dimensions overflow the addressable sprite count")]
    Overflow,
}

/// Errors building a selection filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// An explicit layer selection must name at least one layer.
    #[error("layer selection must contain at least one layer")]
    EmptyLayerSet,
}

/// Common trait for backend errors.
///
/// Each backend error type implements this trait so the batch driver can
/// report a stable code next to the human-readable message without knowing
/// the concrete error type.
///
/// # Example
///
/// ```ignore
/// use exeta_spec::BackendError;
///
/// fn report<E: BackendError>(err: &E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "SHEET_001". Codes are stable and can be
    /// used for programmatic error handling.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}
