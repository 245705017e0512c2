//! Instruction data loading.
//!
//! The data file is a YAML document whose top level is a sequence of
//! mappings:
//!
//! ```yaml
//! - name: ADD
//!   opcode: 0x10
//!   description: Pops two values and pushes their sum.
//! - name: SUB
//!   opcode: 0x11
//! ```
//!
//! Input is always decoded as UTF-8; a leading byte-order mark is ignored.
//! Anchors and `<<` merge keys are resolved, so records can share a base:
//!
//! ```yaml
//! - &arith
//!   name: ADD
//!   operands: []
//! - <<: *arith
//!   name: SUB
//! ```

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::DataError;
use crate::types::{value_kind, InstructionSet, Record};

/// Load and validate the instruction data file at `path`.
///
/// Returns `DataError::NotFound` if absent, `DataError::Parse` (with path +
/// line context) if malformed YAML, and `DataError::Shape` if the document is
/// not a sequence of string-keyed mappings.
pub fn load_instructions(path: &Path) -> Result<InstructionSet, DataError> {
    if !path.exists() {
        return Err(DataError::NotFound { path: path.to_path_buf() });
    }
    let bytes = std::fs::read(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| DataError::Encoding {
        path: path.to_path_buf(),
        source,
    })?;
    parse_instructions(&text, path)
}

/// Parse instruction data from text. `origin` is only used in error messages.
pub fn parse_instructions(text: &str, origin: &Path) -> Result<InstructionSet, DataError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let parse_err = |source: serde_yaml::Error| DataError::Parse {
        path: origin.to_path_buf(),
        source,
    };
    let mut doc: Value = serde_yaml::from_str(text).map_err(parse_err)?;
    // Resolve `<<: *anchor` merge keys before records are validated.
    doc.apply_merge().map_err(parse_err)?;

    let items = match doc {
        Value::Null => return Ok(InstructionSet::default()),
        Value::Sequence(items) => items,
        other => {
            return Err(shape_err(
                origin,
                format!(
                    "expected a sequence of records at the top level, found {}",
                    value_kind(&other)
                ),
            ))
        }
    };

    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            Record::from_value(item)
                .map_err(|e| shape_err(origin, format!("record {index}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(InstructionSet::from(records))
}

fn shape_err(path: &Path, detail: String) -> DataError {
    DataError::Shape { path: PathBuf::from(path), detail }
}
