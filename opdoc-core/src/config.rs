//! Build configuration.
//!
//! Every field defaults to the conventional project layout, so an absent or
//! empty config file builds from `data/instructions.yaml` into `docs/`.
//! Relative paths resolve against the working directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::InstructionName;

pub const DEFAULT_DATA_PATH: &str = "data/instructions.yaml";
pub const DEFAULT_TEMPLATE_ROOT: &str = "templates";
pub const DEFAULT_OUT_DIR: &str = "docs/instructions";
pub const DEFAULT_INDEX_OUT: &str = "docs/instructions.md";
pub const DEFAULT_PAGE_TEMPLATE: &str = "instruction_page.md.tera";
pub const DEFAULT_INDEX_TEMPLATE: &str = "instructions.md.tera";
pub const DEFAULT_COLLECTION_VAR: &str = "instructions";

/// Paths and template names for one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Instruction data file.
    pub data: PathBuf,
    /// Directory searched for named templates.
    pub templates: PathBuf,
    /// Directory receiving one page per record.
    pub out_dir: PathBuf,
    /// Path of the aggregate index page.
    pub index_out: PathBuf,
    pub page_template: String,
    pub index_template: String,
    /// Variable the whole record sequence is bound to in the index template.
    pub collection_var: String,
    /// Create the index page's parent directory when missing.
    pub create_dirs: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            data: PathBuf::from(DEFAULT_DATA_PATH),
            templates: PathBuf::from(DEFAULT_TEMPLATE_ROOT),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            index_out: PathBuf::from(DEFAULT_INDEX_OUT),
            page_template: DEFAULT_PAGE_TEMPLATE.to_string(),
            index_template: DEFAULT_INDEX_TEMPLATE.to_string(),
            collection_var: DEFAULT_COLLECTION_VAR.to_string(),
            create_dirs: true,
        }
    }
}

impl BuildConfig {
    /// Load a YAML config file. Missing fields take their defaults; unknown
    /// fields are rejected.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound { path: path.to_path_buf() });
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(BuildConfig::default());
        }
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<out_dir>/<lowercased name>.md`. Pure, no I/O.
    pub fn page_path(&self, name: &InstructionName) -> PathBuf {
        self.out_dir.join(format!("{}.md", name.file_stem()))
    }
}
