//! Error types for opdoc-build.

use std::path::PathBuf;

use thiserror::Error;

use opdoc_core::DataError;
use opdoc_renderer::RenderError;

/// All errors that can abort a build. Every error is fatal; files written
/// before the failure are left in place.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The instruction data could not be loaded.
    #[error(transparent)]
    Data(#[from] DataError),

    /// An error from the rendering engine.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A record cannot be turned into a page (no usable `name`).
    #[error("record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// An output path could not be created or written.
    #[error("cannot write output at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`BuildError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BuildError {
    BuildError::Io {
        path: path.into(),
        source,
    }
}
