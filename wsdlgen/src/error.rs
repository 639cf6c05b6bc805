//! Error types for loading and generating.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for locating and fetching WSDL documents.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Local file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Path cannot be expressed as a `file://` URL.
    #[error("'{}' is not an absolute local path", path.display())]
    InvalidPath {
        /// Offending path.
        path: PathBuf,
    },

    /// URL scheme other than `file`, `http` or `https`.
    #[error("unsupported URL scheme '{scheme}'")]
    UnsupportedScheme {
        /// Scheme of the URL.
        scheme: String,
    },

    /// HTTP transfer failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Error type for the end-to-end pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Document could not be loaded.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Document could not be turned into code.
    #[error(transparent)]
    Codegen(#[from] wsdlgen_codegen::CodegenError),
}

impl SourceError {
    /// Creates an IO error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
