//! Error types for rasterlab operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in rasterlab operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a framebuffer.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Input the algorithm cannot work with (coincident points, too few
    /// vertices, seed outside the polygon, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Mesh text that does not follow the vertex/face format.
    #[error("Malformed mesh at line {line}: {message}")]
    MalformedMesh {
        /// 1-based line number in the source text.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// Mesh file failed to load.
    #[error("Failed to read mesh file '{}': {source}", path.display())]
    MeshFile {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying I/O or format error.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Shorthand for [`Error::InvalidInput`].
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Shorthand for [`Error::MalformedMesh`].
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedMesh {
            line,
            message: message.into(),
        }
    }
}
