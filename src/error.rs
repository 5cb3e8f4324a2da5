//! Error types for the sitrep library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sitrep operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during report processing.
///
/// Header and date parsing issues never surface here; those degrade to a
/// previous or empty value inside the extractor. This enum covers failures
/// that abort one document (isolated at the batch boundary) or the whole
/// batch (a missing input directory).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input directory is missing or unreadable. Fatal: nothing is
    /// dispatched when this is raised.
    #[error("input directory not found or unreadable: {0}")]
    InputDir(PathBuf),

    /// Error decoding a layout dump.
    #[error("layout decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error writing a section table.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// A layout dump is structurally unusable (e.g. not a JSON object,
    /// wrong extension handed to the source).
    #[error("invalid layout dump: {0}")]
    Layout(String),
}
