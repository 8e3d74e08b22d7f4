//! Error types for trcplay-core.
//!
//! This module provides structured error types for all trcplay-core operations:
//!
//! - [`enum@Error`] - Main error enum that wraps all error types
//! - [`ResourceError`] - Errors from composing paths and mapping resource files
//! - [`ReaderError`] - Errors from bounds-checked reads on a [`DataReader`](crate::io::DataReader)
//! - [`VersionError`] - Errors from parsing a `MAJOR.MINOR[.PREVIEW]` version
//!
//! All errors implement `std::error::Error` and can be converted to `anyhow::Error`.

use std::path::PathBuf;

use thiserror::Error;

use crate::bundle::ResourceKind;

/// Main error type for trcplay-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error opening or mapping a resource file
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Out-of-range access on a data reader
    #[error("Reader error: {0}")]
    Reader(#[from] ReaderError),

    /// The playback initializer rejected its inputs
    #[error("Playback initialization failed: {reason}")]
    Initialization { reason: String },

    /// Packet processing or rendering failed on a live session
    #[error("Playback failed: {reason}")]
    Playback { reason: String },

    /// An operation needed a live playback but none is loaded
    #[error("No playback session is loaded")]
    NoSession,
}

impl Error {
    /// Wrap a failure reported by an external playback initializer or driver.
    pub fn initialization(err: impl std::fmt::Display) -> Self {
        Error::Initialization {
            reason: err.to_string(),
        }
    }

    /// Wrap a failure reported while processing or rendering.
    pub fn playback(err: impl std::fmt::Display) -> Self {
        Error::Playback {
            reason: err.to_string(),
        }
    }
}

/// Errors related to locating and mapping resource files.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A named resource could not be opened
    #[error("Failed to open {kind} ({}): {source}", path.display())]
    Open {
        kind: ResourceKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Joining the data folder with a resource name exceeded the path limit
    #[error("Could not merge data path with {kind}: path is {len} bytes")]
    PathTooLong { kind: ResourceKind, len: usize },

    /// A file could not be opened, sized, or mapped
    #[error("Failed to map {}: {source}", path.display())]
    Map {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by bounds-checked reader operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReaderError {
    /// A read or skip would move past the end of the data
    #[error("read of {requested} bytes at position {position} exceeds length {length}")]
    OutOfBounds {
        position: usize,
        requested: usize,
        length: usize,
    },

    /// A seek target lies outside the data
    #[error("seek to {target} exceeds length {length}")]
    InvalidSeek { target: usize, length: usize },
}

/// Errors from parsing a version string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Fewer than `MAJOR.MINOR` components were given
    #[error("version must be in the format 'X.Y', e.g. '8.55'")]
    Missing,

    /// A component is not a non-negative integer
    #[error("version component '{part}' is not numeric")]
    NotNumeric { part: String },

    /// More than `MAJOR.MINOR.PREVIEW` components were given
    #[error("version has too many components, expected 'X.Y' or 'X.Y.Z'")]
    TooManyParts,
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
