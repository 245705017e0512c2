//! Template contexts — bind instruction data as Tera variables.
//!
//! Two binding styles are supported:
//! - [`record_context`]: every field of one record becomes a top-level
//!   variable (`{{ name }}`, `{{ description }}`).
//! - [`collection_context`]: the whole ordered record sequence is bound under
//!   one variable (`{% for ins in instructions %}`).

use opdoc_core::{InstructionSet, Record};

use crate::error::RenderError;

/// Bind each field of `record` as a top-level template variable.
pub fn record_context(record: &Record) -> Result<tera::Context, RenderError> {
    tera::Context::from_serialize(record).map_err(RenderError::Context)
}

/// Bind the entire ordered `set` under the variable `var`.
pub fn collection_context(set: &InstructionSet, var: &str) -> Result<tera::Context, RenderError> {
    let mut ctx = tera::Context::new();
    ctx.try_insert(var, set).map_err(RenderError::Context)?;
    Ok(ctx)
}
