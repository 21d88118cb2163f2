//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for laptop-catalog operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` at the binary and file-loading edges.
pub type Result<T> = anyhow::Result<T>;

/// Error raised at the search boundary.
///
/// The engine itself absorbs malformed input; only a sort strategy it does not
/// recognise is surfaced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("unknown sort strategy '{0}' (expected relevance, price-ascending or price-descending)")]
    InvalidStrategy(String),
}

/// Error returned by catalog store operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("laptop '{0}' not found")]
    LaptopNotFound(String),
    #[error("invalid laptop data: {0}")]
    InvalidLaptop(String),
    #[error("invalid inquiry data: {0}")]
    InvalidInquiry(String),
    #[error("unknown laptop id(s): {}", .0.join(", "))]
    UnknownLaptops(Vec<String>),
    #[error("failed to read catalog file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write catalog file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse catalog file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

/// Error returned when an admin capability cannot be issued or verified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid password")]
    InvalidPassword,
    #[error("unauthorized")]
    Unauthorized,
}
