//! `opdoc init [--force]` — scaffold the default templates.

use anyhow::{Context, Result};
use clap::Args;

use opdoc_core::BuildConfig;
use opdoc_renderer::{scaffold, ScaffoldResult};

/// Write the embedded default templates into the template root.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite templates that already exist.
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    pub fn run(self, config: &BuildConfig) -> Result<()> {
        let root = &config.templates;
        let results = scaffold(root, self.force)
            .with_context(|| format!("failed to scaffold templates in '{}'", root.display()))?;

        println!("✓ Templates in '{}'", root.display());
        for r in results {
            match r {
                ScaffoldResult::Created { path } => println!("  +  {}", path.display()),
                ScaffoldResult::Overwritten { path } => println!("  ✎  {}", path.display()),
                ScaffoldResult::Skipped { path } => {
                    println!("  ·  {} (exists; use --force to overwrite)", path.display())
                }
            }
        }
        Ok(())
    }
}
