//! Error types for opdoc-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template loading and rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template root directory does not exist.
    #[error("template root not found at {path}")]
    RootNotFound { path: PathBuf },

    /// No template with this name is registered. There is no fallback.
    #[error("template '{name}' not found in {origin}")]
    TemplateNotFound { name: String, origin: String },

    /// Template failed to render, e.g. it references an undefined variable.
    #[error("failed to render '{name}': {detail}")]
    Render {
        name: String,
        detail: String,
        #[source]
        source: tera::Error,
    },

    /// Tera engine error while registering templates.
    #[error("template engine error: {}", crate::error::describe(.0))]
    Tera(#[from] tera::Error),

    /// Values could not be bound into a rendering context.
    #[error("context serialization error: {0}")]
    Context(#[source] tera::Error),

    /// Filesystem error while loading or scaffolding templates.
    #[error("template io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}

/// Messages of every error below `err`, outermost first.
pub(crate) fn causes(err: &tera::Error) -> Vec<String> {
    let mut parts = Vec::new();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts
}

/// Tera's `Display` only shows the outermost message, which hides the cause.
pub(crate) fn describe(err: &tera::Error) -> String {
    std::iter::once(err.to_string())
        .chain(causes(err))
        .collect::<Vec<_>>()
        .join(": ")
}
