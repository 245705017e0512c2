//! Build pipeline: load → render → write, in that order, once per run.
//!
//! - Per-record mode writes `<out_dir>/<lowercased name>.md` for every record.
//! - Aggregate mode writes the whole set, rendered once, to `index_out`.

use std::collections::HashSet;
use std::path::PathBuf;

use opdoc_core::types::{value_kind, NAME_FIELD};
use opdoc_core::{data::load_instructions, BuildConfig, InstructionSet};
use opdoc_renderer::{RenderError, TemplateEngine, Templates};

use crate::error::BuildError;
use crate::writer::{atomic_write, ensure_dir, WriteResult};

/// Which outputs a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Per-record pages and the index.
    #[default]
    All,
    /// Per-record pages only.
    Pages,
    /// The aggregate index only.
    Index,
}

impl Scope {
    pub fn includes_pages(self) -> bool {
        matches!(self, Scope::All | Scope::Pages)
    }

    pub fn includes_index(self) -> bool {
        matches!(self, Scope::All | Scope::Index)
    }
}

/// Outcome of a build run.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Number of records loaded from the data file.
    pub records: usize,
    pub writes: Vec<WriteResult>,
}

impl BuildReport {
    /// Files actually written to disk.
    pub fn written(&self) -> usize {
        self.writes
            .iter()
            .filter(|w| matches!(w, WriteResult::Written { .. }))
            .count()
    }

    /// Files a dry run would have written.
    pub fn would_write(&self) -> usize {
        self.writes
            .iter()
            .filter(|w| matches!(w, WriteResult::WouldWrite { .. }))
            .count()
    }

    pub fn unchanged(&self) -> usize {
        self.writes
            .iter()
            .filter(|w| matches!(w, WriteResult::Unchanged { .. }))
            .count()
    }
}

/// Run a build from the paths in `config`.
///
/// The data file is loaded before the template root is read, so a missing
/// data file fails with no other side effects.
pub fn run(config: &BuildConfig, scope: Scope, dry_run: bool) -> Result<BuildReport, BuildError> {
    let set = load_instructions(&config.data)?;
    tracing::info!("loaded {} records from {}", set.len(), config.data.display());
    let engine = TemplateEngine::from_dir(&config.templates)?;
    build_with(&engine, &set, config, scope, dry_run)
}

/// Render and write `set` with an already-constructed template engine.
pub fn build_with<T: Templates>(
    templates: &T,
    set: &InstructionSet,
    config: &BuildConfig,
    scope: Scope,
    dry_run: bool,
) -> Result<BuildReport, BuildError> {
    require_templates(templates, config, scope)?;

    let mut report = BuildReport {
        records: set.len(),
        writes: Vec::new(),
    };
    if scope.includes_pages() {
        report.writes.extend(render_pages(templates, set, config, dry_run)?);
    }
    if scope.includes_index() {
        report.writes.push(render_index(templates, set, config, dry_run)?);
    }
    Ok(report)
}

/// Fail before any write if a template the scope needs is missing.
pub(crate) fn require_templates<T: Templates>(
    templates: &T,
    config: &BuildConfig,
    scope: Scope,
) -> Result<(), BuildError> {
    let mut needed = Vec::new();
    if scope.includes_pages() {
        needed.push(config.page_template.as_str());
    }
    if scope.includes_index() {
        needed.push(config.index_template.as_str());
    }
    for name in needed {
        if !templates.has_template(name) {
            return Err(RenderError::TemplateNotFound {
                name: name.to_string(),
                origin: config.templates.display().to_string(),
            }
            .into());
        }
    }
    Ok(())
}

/// Per-record mode: one page per record, written as soon as it is rendered.
///
/// The output directory is created once, before the first write. A bad record
/// aborts the run; pages already written stay on disk.
pub fn render_pages<T: Templates>(
    templates: &T,
    set: &InstructionSet,
    config: &BuildConfig,
    dry_run: bool,
) -> Result<Vec<WriteResult>, BuildError> {
    ensure_dir(&config.out_dir, dry_run)?;
    let mut writes = Vec::with_capacity(set.len());
    for_each_page(templates, set, config, |path, content| {
        writes.push(atomic_write(&path, &content, dry_run)?);
        Ok(())
    })?;
    Ok(writes)
}

/// Aggregate mode: render the whole set once and write the index page.
pub fn render_index<T: Templates>(
    templates: &T,
    set: &InstructionSet,
    config: &BuildConfig,
    dry_run: bool,
) -> Result<WriteResult, BuildError> {
    let (path, content) = index_page(templates, set, config)?;
    if config.create_dirs {
        if let Some(parent) = path.parent() {
            ensure_dir(parent, dry_run)?;
        }
    }
    atomic_write(&path, &content, dry_run)
}

/// Render each record's page in order and hand it to `emit`.
pub(crate) fn for_each_page<T, F>(
    templates: &T,
    set: &InstructionSet,
    config: &BuildConfig,
    mut emit: F,
) -> Result<(), BuildError>
where
    T: Templates,
    F: FnMut(PathBuf, String) -> Result<(), BuildError>,
{
    let mut seen = HashSet::new();
    for (index, record) in set.iter().enumerate() {
        let name = record.name().ok_or_else(|| BuildError::InvalidRecord {
            index,
            reason: match record.get(NAME_FIELD) {
                None => format!("missing `{NAME_FIELD}` field"),
                Some(other) => format!("`{NAME_FIELD}` must be a string, found {}", value_kind(other)),
            },
        })?;
        let path = config.page_path(&name);
        if !seen.insert(path.clone()) {
            tracing::warn!("record {index} ({name}) overwrites an earlier page at {}", path.display());
        }
        tracing::debug!(
            fields = ?record.fields().map(|(k, _)| k).collect::<Vec<_>>(),
            "rendering {name} to {}",
            path.display()
        );
        let content = templates.render_record(&config.page_template, record)?;
        emit(path, content)?;
    }
    Ok(())
}

/// Render the index page without writing it.
pub(crate) fn index_page<T: Templates>(
    templates: &T,
    set: &InstructionSet,
    config: &BuildConfig,
) -> Result<(PathBuf, String), BuildError> {
    let content =
        templates.render_collection(&config.index_template, set, &config.collection_var)?;
    Ok((config.index_out.clone(), content))
}
