//! Error types for opdoc-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading instruction data.
#[derive(Debug, Error)]
pub enum DataError {
    /// The data file did not exist at the expected path.
    #[error("instruction data not found at {path}")]
    NotFound { path: PathBuf },

    /// Underlying I/O failure while reading the data file.
    #[error("failed to read instruction data at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid UTF-8.
    #[error("instruction data at {path} is not valid UTF-8: {source}")]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// YAML parse error with the file path and serde_yaml line context.
    #[error("failed to parse instruction data at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Well-formed YAML that is not a sequence of mappings.
    #[error("invalid instruction data at {path}: {detail}")]
    Shape { path: PathBuf, detail: String },
}

/// Errors from loading a build configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
