//! Write the embedded default templates into a template root.

use std::path::{Path, PathBuf};

use crate::engine::embedded_templates;
use crate::error::RenderError;

/// Outcome for one scaffolded template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldResult {
    Created { path: PathBuf },
    /// File already existed and `force` was not set.
    Skipped { path: PathBuf },
    Overwritten { path: PathBuf },
}

/// Copy every embedded template into `root`, creating it if needed.
///
/// Existing files are left alone unless `force` is set.
pub fn scaffold(root: &Path, force: bool) -> Result<Vec<ScaffoldResult>, RenderError> {
    std::fs::create_dir_all(root).map_err(|source| RenderError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut results = Vec::new();
    for (name, content) in embedded_templates() {
        let path = root.join(name);
        let existed = path.exists();
        if existed && !force {
            tracing::debug!("kept existing template: {}", path.display());
            results.push(ScaffoldResult::Skipped { path });
            continue;
        }
        std::fs::write(&path, content).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!("wrote template: {}", path.display());
        results.push(if existed {
            ScaffoldResult::Overwritten { path }
        } else {
            ScaffoldResult::Created { path }
        });
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{TemplateEngine, Templates};
    use tempfile::TempDir;

    #[test]
    fn scaffold_creates_root_and_templates() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("templates");
        let results = scaffold(&root, false).expect("scaffold");
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| matches!(r, ScaffoldResult::Created { .. })));

        let engine = TemplateEngine::from_dir(&root).expect("load scaffolded");
        assert!(engine.has_template("instruction_page.md.tera"));
        assert!(engine.has_template("instructions.md.tera"));
    }

    #[test]
    fn scaffold_keeps_user_edits_without_force() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let page = root.join("instruction_page.md.tera");
        std::fs::write(&page, "custom {{ name }}").unwrap();

        let results = scaffold(root, false).unwrap();
        assert!(results.contains(&ScaffoldResult::Skipped { path: page.clone() }));
        assert_eq!(std::fs::read_to_string(&page).unwrap(), "custom {{ name }}");

        let results = scaffold(root, true).unwrap();
        assert!(results.contains(&ScaffoldResult::Overwritten { path: page.clone() }));
        assert_ne!(std::fs::read_to_string(&page).unwrap(), "custom {{ name }}");
    }
}
