//! Dry-run unified diff support for `opdoc diff`.

use std::path::{Path, PathBuf};

use similar::TextDiff;

use opdoc_core::{data::load_instructions, BuildConfig, InstructionSet};
use opdoc_renderer::{TemplateEngine, Templates};

use crate::pipeline::{for_each_page, index_page, require_templates, Scope};
use crate::writer::{normalize_line_endings, read_existing};
use crate::BuildError;

/// A single rendered file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Render what `build` would generate and compare it to current on-disk
/// content. Files that would not change are omitted; missing files diff
/// against empty.
///
/// No files or directories are written.
pub fn diff(config: &BuildConfig, scope: Scope) -> Result<Vec<FileDiff>, BuildError> {
    let set = load_instructions(&config.data)?;
    let engine = TemplateEngine::from_dir(&config.templates)?;
    diff_with(&engine, &set, config, scope)
}

/// [`diff`] with an already-constructed template engine.
pub fn diff_with<T: Templates>(
    templates: &T,
    set: &InstructionSet,
    config: &BuildConfig,
    scope: Scope,
) -> Result<Vec<FileDiff>, BuildError> {
    require_templates(templates, config, scope)?;

    let mut diffs = Vec::new();
    if scope.includes_pages() {
        for_each_page(templates, set, config, |path, content| {
            diffs.extend(file_diff(path, &content)?);
            Ok(())
        })?;
    }
    if scope.includes_index() {
        let (path, content) = index_page(templates, set, config)?;
        diffs.extend(file_diff(path, &content)?);
    }
    Ok(diffs)
}

fn file_diff(path: PathBuf, rendered: &str) -> Result<Option<FileDiff>, BuildError> {
    let rendered = normalize_line_endings(rendered);
    let existing = read_existing_text(&path)?;
    if existing == rendered {
        return Ok(None);
    }

    let old_header = format!("a/{}", path.display());
    let new_header = format!("b/{}", path.display());
    let unified = TextDiff::from_lines(&existing, &rendered)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string();

    Ok(Some(FileDiff {
        path,
        unified_diff: unified,
    }))
}

fn read_existing_text(path: &Path) -> Result<String, BuildError> {
    let bytes = read_existing(path)?.unwrap_or_default();
    Ok(normalize_line_endings(&String::from_utf8_lossy(&bytes)))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use opdoc_core::data::parse_instructions;
    use tempfile::TempDir;

    use crate::pipeline::build_with;

    use super::*;

    fn setup(root: &Path) -> (TemplateEngine, InstructionSet, BuildConfig) {
        let config = BuildConfig {
            out_dir: root.join("docs").join("instructions"),
            index_out: root.join("docs").join("instructions.md"),
            ..BuildConfig::default()
        };
        let set = parse_instructions(
            "- name: ADD\n  summary: Integer addition.\n- name: SUB\n  summary: Integer subtraction.\n",
            Path::new("instructions.yaml"),
        )
        .expect("parse");
        (TemplateEngine::embedded().expect("engine"), set, config)
    }

    #[test]
    fn no_diffs_after_clean_build() {
        let root = TempDir::new().expect("root");
        let (engine, set, config) = setup(root.path());
        build_with(&engine, &set, &config, Scope::All, false).expect("build");

        let diffs = diff_with(&engine, &set, &config, Scope::All).expect("diff");
        assert!(diffs.is_empty(), "built docs should have no diff: {diffs:?}");
    }

    #[test]
    fn missing_outputs_diff_against_empty_and_are_not_created() {
        let root = TempDir::new().expect("root");
        let (engine, set, config) = setup(root.path());

        let diffs = diff_with(&engine, &set, &config, Scope::All).expect("diff");
        assert_eq!(diffs.len(), 3);
        assert!(diffs[0].unified_diff.contains("+# ADD"));
        assert!(!config.out_dir.exists(), "diff must not create directories");
    }

    #[test]
    fn local_edit_produces_unified_diff() {
        let root = TempDir::new().expect("root");
        let (engine, set, config) = setup(root.path());
        build_with(&engine, &set, &config, Scope::All, false).expect("build");

        let target = config.out_dir.join("sub.md");
        let edited = format!("{}\nmanual tweak\n", fs::read_to_string(&target).expect("read"));
        fs::write(&target, edited).expect("write");

        let diffs = diff_with(&engine, &set, &config, Scope::Pages).expect("diff");
        assert_eq!(diffs.len(), 1);
        let sub = &diffs[0];
        assert!(sub.path.ends_with("sub.md"));
        assert!(sub.unified_diff.contains("--- a/"));
        assert!(sub.unified_diff.contains("+++ b/"));
        assert!(sub.unified_diff.contains("-manual tweak"));
        assert!(sub.unified_diff.contains("@@"));
    }
}
