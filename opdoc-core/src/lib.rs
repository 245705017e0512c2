//! opdoc core library — instruction records, YAML loading, build config.
//!
//! - [`types`] — [`Record`] and [`InstructionSet`]
//! - [`data`] — load an instruction data file
//! - [`config`] — [`BuildConfig`] paths and template names
//! - [`error`] — [`DataError`], [`ConfigError`]

pub mod config;
pub mod data;
pub mod error;
pub mod types;

pub use config::BuildConfig;
pub use error::{ConfigError, DataError};
pub use types::{InstructionName, InstructionSet, Record};
