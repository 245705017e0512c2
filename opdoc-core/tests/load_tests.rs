//! Data-file loading: error classification, encoding, shape and ordering.

use assert_fs::prelude::*;
use opdoc_core::{
    data,
    types::{InstructionName, Record},
    BuildConfig, ConfigError, DataError,
};
use predicates::prelude::predicate;
use rstest::rstest;
use serde_yaml::Value;

const SAMPLE: &str = "\
- name: ADD
  opcode: 0x10
  description: Pops two integers and pushes their sum.
  operands: []
- name: TRAP_IF_ZERO
  opcode: 0x03
  description: Traps when the top of the stack is zero.
  stack: { pops: 1, pushes: 0 }
";

// ---------------------------------------------------------------------------
// 1. Load error messages
// ---------------------------------------------------------------------------

#[test]
fn load_missing_file_returns_not_found() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let path = dir.path().join("data").join("instructions.yaml");
    let err = data::load_instructions(&path).unwrap_err();
    assert!(matches!(err, DataError::NotFound { .. }), "got: {err}");
    assert!(err.to_string().contains("instructions.yaml"));
    dir.child("data").assert(predicate::path::missing());
}

#[test]
fn load_corrupt_yaml_returns_parse_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("instructions.yaml");
    file.write_str(": : corrupt : yaml : !!!\n  - broken: [unclosed").expect("write");

    let err = data::load_instructions(file.path()).unwrap_err();
    assert!(matches!(err, DataError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("instructions.yaml"), "must contain file path, got: {err}");
}

#[test]
fn load_invalid_utf8_returns_encoding_error() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("instructions.yaml");
    file.write_binary(b"- name: \xff\xfe\n").expect("write");

    let err = data::load_instructions(file.path()).unwrap_err();
    assert!(matches!(err, DataError::Encoding { .. }), "got: {err}");
}

#[rstest]
#[case("scalar", "just text\n")]
#[case("mapping", "name: ADD\n")]
#[case("nested_sequence", "- [ADD, SUB]\n")]
#[case("null_element", "- name: ADD\n- ~\n")]
fn load_wrong_shape_returns_shape_error(#[case] label: &str, #[case] yaml: &str) {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("instructions.yaml");
    file.write_str(yaml).expect("write");

    let err = data::load_instructions(file.path()).unwrap_err();
    assert!(matches!(err, DataError::Shape { .. }), "[{label}] got: {err}");
}

// ---------------------------------------------------------------------------
// 2. Successful loads
// ---------------------------------------------------------------------------

#[test]
fn load_preserves_record_order_and_fields() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("instructions.yaml");
    file.write_str(SAMPLE).expect("write");

    let set = data::load_instructions(file.path()).expect("load");
    assert_eq!(set.len(), 2);

    let first = &set.records()[0];
    assert_eq!(first.name(), Some(InstructionName::from("ADD")));
    assert_eq!(first.get("opcode").and_then(Value::as_u64), Some(16));
    assert_eq!(first.get("operands"), Some(&Value::Sequence(vec![])));

    let second = &set.records()[1];
    let keys: Vec<_> = second.fields().map(|(k, _)| k).collect();
    assert_eq!(keys, ["name", "opcode", "description", "stack"]);
}

#[test]
fn load_unicode_content() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("instructions.yaml");
    file.write_str("- name: Пуш\n  description: \"日本語 & <spéçïal>\"\n").expect("write");

    let set = data::load_instructions(file.path()).expect("load");
    let name = set.records()[0].name().expect("name");
    assert_eq!(name.file_stem(), "пуш");
}

#[test]
fn record_deserializes_through_serde() {
    let record: Record = serde_yaml::from_str("name: NOP\nopcode: 0\n").expect("record");
    assert_eq!(record.fields().count(), 2);

    let err = serde_yaml::from_str::<Record>("- not a mapping\n").unwrap_err();
    assert!(err.to_string().contains("expected a mapping"), "got: {err}");
}

// ---------------------------------------------------------------------------
// 3. Config files
// ---------------------------------------------------------------------------

#[test]
fn config_missing_file_is_not_found() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let err = BuildConfig::load(&dir.path().join("opdoc.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }), "got: {err}");
}

#[test]
fn config_empty_file_is_default() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("opdoc.yaml");
    file.write_str("\n").expect("write");
    assert_eq!(BuildConfig::load(file.path()).expect("load"), BuildConfig::default());
}

#[test]
fn config_unknown_field_is_rejected() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("opdoc.yaml");
    file.write_str("output_dir: docs\n").expect("write");
    let err = BuildConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
}

#[test]
fn config_overrides_selected_fields() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let file = dir.child("opdoc.yaml");
    file.write_str("templates: doc-templates\ncreate_dirs: false\ncollection_var: ops\n")
        .expect("write");
    let cfg = BuildConfig::load(file.path()).expect("load");
    assert_eq!(cfg.templates, std::path::PathBuf::from("doc-templates"));
    assert!(!cfg.create_dirs);
    assert_eq!(cfg.collection_var, "ops");
    assert_eq!(cfg.data, BuildConfig::default().data);
}
