//! # opdoc-build
//!
//! Load instruction data, render it through named templates, write Markdown.
//!
//! Call [`pipeline::run`] for a full build, or [`diff`] to see what a build
//! would change without writing anything.

pub mod diff;
pub mod error;
pub mod pipeline;
pub mod writer;

pub use diff::{diff, FileDiff};
pub use error::BuildError;
pub use pipeline::{BuildReport, Scope};
pub use writer::WriteResult;
