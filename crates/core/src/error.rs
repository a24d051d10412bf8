//! Error types for Chronicle operations.
//!
//! This module defines the main error type [`ChronicleError`]. Two kinds of
//! failure exist: run-level errors (a missing or unreadable export, an invalid
//! configuration) that abort the conversion, and post-level errors (an
//! unparseable timestamp, a missing footer) that the pipeline converts into
//! skip counters so they never reach the caller.
//!
//! # Example
//!
//! ```rust
//! use chronicle_core::{ChronicleError, Result};
//!
//! fn require_export(html: &str) -> Result<&str> {
//!     if html.trim().is_empty() {
//!         return Err(ChronicleError::MalformedDocument("empty input".to_string()));
//!     }
//!     Ok(html)
//! }
//!
//! assert!(require_export("   ").is_err());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for export conversion.
#[derive(Error, Debug)]
pub enum ChronicleError {
    /// The export document does not exist.
    ///
    /// Fatal: the run aborts before anything is written.
    #[error("Input file not found: {0}")]
    MissingInput(PathBuf),

    /// The export could not be turned into a document tree.
    ///
    /// Returned for empty input or input that carries no markup at all.
    #[error("Malformed export document: {0}")]
    MalformedDocument(String),

    /// HTML query errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// Invalid character encoding in the export file.
    #[error("Invalid character encoding")]
    InvalidEncoding,

    /// A post footer date that does not match the export's date format.
    #[error("Could not parse date: {0}")]
    UnparseableTimestamp(String),

    /// A post container without one of the sub-nodes the extractor needs.
    #[error("Post is missing its {0}")]
    MissingSubNode(&'static str),

    /// File read/write errors.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),

    /// Page template errors.
    #[error("Failed to render page: {0}")]
    RenderError(#[from] tera::Error),

    /// Serialization errors for the JSON listing.
    #[error("Failed to serialize output: {0}")]
    SerializeError(String),

    /// Configuration file or value errors.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ChronicleError {
    /// Whether this error only affects a single post.
    ///
    /// Post-level errors are recovered by dropping the post; everything else
    /// aborts the run.
    pub fn is_post_level(&self) -> bool {
        matches!(self, Self::UnparseableTimestamp(_) | Self::MissingSubNode(_))
    }
}

/// Result type alias for ChronicleError.
pub type Result<T> = std::result::Result<T, ChronicleError>;
