//! Domain types for instruction data.
//!
//! Records are schema-free: every field is kept as a [`serde_yaml::Value`]
//! in source order. The only field the pipeline interprets is `name`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Field used to derive per-record output filenames.
pub const NAME_FIELD: &str = "name";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// The `name` of an instruction record, e.g. `ADD_ST`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstructionName(pub String);

impl InstructionName {
    /// Lower-cased form used as the output file stem. No other normalisation
    /// is applied.
    pub fn file_stem(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for InstructionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for InstructionName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InstructionName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One instruction definition: an ordered map of string keys to values.
///
/// Construct via [`Record::from_value`] or deserialize directly; both reject
/// non-mapping nodes and non-string keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(Mapping);

/// Why a YAML node could not become a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordShapeError {
    /// The node is not a mapping; carries the kind that was found.
    NotAMapping(&'static str),
    /// A key of the mapping is not a string; carries the key's kind.
    NonStringKey(&'static str),
}

impl fmt::Display for RecordShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordShapeError::NotAMapping(kind) => write!(f, "expected a mapping, found {kind}"),
            RecordShapeError::NonStringKey(kind) => {
                write!(f, "field keys must be strings, found a {kind} key")
            }
        }
    }
}

impl Record {
    /// Validate a parsed YAML node as a record.
    pub fn from_value(value: Value) -> Result<Self, RecordShapeError> {
        match value {
            Value::Mapping(map) => {
                if let Some(bad) = map.keys().find(|k| !k.is_string()) {
                    return Err(RecordShapeError::NonStringKey(value_kind(bad)));
                }
                Ok(Record(map))
            }
            other => Err(RecordShapeError::NotAMapping(value_kind(&other))),
        }
    }

    /// Field lookup by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The record's `name`, if present and a string.
    pub fn name(&self) -> Option<InstructionName> {
        self.get(NAME_FIELD)
            .and_then(Value::as_str)
            .map(InstructionName::from)
    }

    /// Fields in source order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().filter_map(|(k, v)| k.as_str().map(|k| (k, v)))
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Record::from_value(value).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// InstructionSet
// ---------------------------------------------------------------------------

/// Ordered collection of records, in the order they appear in the data file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructionSet {
    records: Vec<Record>,
}

impl InstructionSet {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for InstructionSet {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a InstructionSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Human-readable kind of a YAML node, for diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(yaml: &str) -> Record {
        Record::from_value(serde_yaml::from_str(yaml).expect("yaml")).expect("record")
    }

    #[test]
    fn name_file_stem_is_lowercased_only() {
        assert_eq!(InstructionName::from("ADD_ST").file_stem(), "add_st");
        assert_eq!(InstructionName::from("Trap If Zero").file_stem(), "trap if zero");
    }

    #[test]
    fn fields_keep_source_order() {
        let r = record("name: NOP\nopcode: 0\ndescription: does nothing\n");
        let keys: Vec<_> = r.fields().map(|(k, _)| k).collect();
        assert_eq!(keys, ["name", "opcode", "description"]);
    }

    #[test]
    fn name_requires_string() {
        assert_eq!(record("name: HLT").name(), Some(InstructionName::from("HLT")));
        assert!(record("name: 12").name().is_none());
        assert!(record("opcode: 1").name().is_none());
    }

    #[test]
    fn non_mapping_is_rejected() {
        let err = Record::from_value(Value::from("ADD")).unwrap_err();
        assert_eq!(err, RecordShapeError::NotAMapping("string"));
    }

    #[test]
    fn non_string_key_is_rejected() {
        let value: Value = serde_yaml::from_str("1: one\nname: X\n").unwrap();
        let err = Record::from_value(value).unwrap_err();
        assert_eq!(err, RecordShapeError::NonStringKey("number"));
    }
}
