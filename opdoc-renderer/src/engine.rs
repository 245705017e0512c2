//! Tera rendering engine — the [`Templates`] seam and [`TemplateEngine`].
//!
//! # Template naming
//!
//! Templates are registered under their path relative to the template root,
//! with `/` separators, e.g. `instruction_page.md.tera` or
//! `partials/operands.md.tera`. Only files ending in `.tera` are loaded.
//!
//! | Default name               | Used for                          |
//! |----------------------------|-----------------------------------|
//! | `instruction_page.md.tera` | one page per instruction record   |
//! | `instructions.md.tera`     | the aggregate instruction index   |

use std::path::{Path, PathBuf};

use tera::Tera;

use opdoc_core::config::{DEFAULT_INDEX_TEMPLATE, DEFAULT_PAGE_TEMPLATE};
use opdoc_core::{InstructionSet, Record};

use crate::context::{collection_context, record_context};
use crate::error::{causes, RenderError};

// ---------------------------------------------------------------------------
// Embedded templates, baked into the binary via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    (
        DEFAULT_PAGE_TEMPLATE,
        include_str!("templates/instruction_page.md.tera"),
    ),
    (
        DEFAULT_INDEX_TEMPLATE,
        include_str!("templates/instructions.md.tera"),
    ),
];

/// Default templates shipped with the binary, as `(name, source)` pairs.
pub fn embedded_templates() -> &'static [(&'static str, &'static str)] {
    TPLS
}

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_dir_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    files.sort();

    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        tracing::debug!("registered template {name} from {}", path.display());
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(templates: Vec<(String, String)>) -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    // Markdown output; never HTML-escape field values.
    tera.autoescape_on(vec![]);
    tera.add_raw_templates(templates)?;
    Ok(tera)
}

/// Join the causes below Tera's outer "Failed to render" message.
fn render_detail(err: &tera::Error) -> String {
    let parts = causes(err);
    if parts.is_empty() {
        err.to_string()
    } else {
        parts.join(": ")
    }
}

// ---------------------------------------------------------------------------
// Templates seam
// ---------------------------------------------------------------------------

/// Named-template rendering.
///
/// `render` must fail with [`RenderError::TemplateNotFound`] when `name` is not
/// registered; implementations never substitute another template.
pub trait Templates {
    /// Whether a template called `name` is registered.
    fn has_template(&self, name: &str) -> bool;

    /// Render the template `name` with `vars` bound.
    fn render(&self, name: &str, vars: &tera::Context) -> Result<String, RenderError>;

    /// Render `name` with each field of `record` bound as a variable.
    fn render_record(&self, name: &str, record: &Record) -> Result<String, RenderError> {
        self.render(name, &record_context(record)?)
    }

    /// Render `name` once with the whole `set` bound under `var`.
    fn render_collection(
        &self,
        name: &str,
        set: &InstructionSet,
        var: &str,
    ) -> Result<String, RenderError> {
        self.render(name, &collection_context(set, var)?)
    }
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-backed [`Templates`] implementation.
///
/// Build it from a template root with [`TemplateEngine::from_dir`], or from the
/// templates compiled into the binary with [`TemplateEngine::embedded`].
pub struct TemplateEngine {
    tera: Tera,
    origin: String,
}

impl TemplateEngine {
    /// Load every `.tera` file below `root`.
    pub fn from_dir(root: &Path) -> Result<Self, RenderError> {
        if !root.is_dir() {
            return Err(RenderError::RootNotFound { path: root.to_path_buf() });
        }
        let tera = build_tera(load_dir_templates(root)?)?;
        Ok(TemplateEngine {
            tera,
            origin: root.display().to_string(),
        })
    }

    /// Construct an engine holding only the embedded default templates.
    pub fn embedded() -> Result<Self, RenderError> {
        let templates = TPLS
            .iter()
            .map(|(name, content)| (name.to_string(), content.to_string()))
            .collect();
        Ok(TemplateEngine {
            tera: build_tera(templates)?,
            origin: "embedded templates".to_string(),
        })
    }

    /// Registered template names, sorted.
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }
}

impl Templates for TemplateEngine {
    fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    fn render(&self, name: &str, vars: &tera::Context) -> Result<String, RenderError> {
        if !self.has_template(name) {
            return Err(RenderError::TemplateNotFound {
                name: name.to_string(),
                origin: self.origin.clone(),
            });
        }
        self.tera
            .render(name, vars)
            .map_err(|source| RenderError::Render {
                name: name.to_string(),
                detail: render_detail(&source),
                source,
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
