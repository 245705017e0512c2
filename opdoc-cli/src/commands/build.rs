//! `opdoc build` — render and write instruction pages and the index.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use opdoc_build::{pipeline, BuildReport, WriteResult};
use opdoc_core::BuildConfig;

use crate::ScopeArgs;

/// Arguments for `opdoc build`.
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl BuildArgs {
    pub fn run(self, config: &BuildConfig) -> Result<()> {
        let report = pipeline::run(config, self.scope.into(), self.dry_run)
            .with_context(|| format!("build failed for '{}'", config.data.display()))?;
        print_report(&report, self.dry_run);
        Ok(())
    }
}

fn print_report(report: &BuildReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    if report.writes.is_empty() {
        println!("{prefix}{} nothing to do", "✓".green().bold());
        return;
    }

    let changed = if dry_run {
        format!("{} would write", report.would_write())
    } else {
        format!("{} written", report.written())
    };
    println!(
        "{prefix}{} {} records ({changed}, {} unchanged)",
        "✓".green().bold(),
        report.records,
        report.unchanged()
    );

    for r in &report.writes {
        match r {
            WriteResult::Written { path } => println!("  ✎  {}", path.display()),
            WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
            WriteResult::Unchanged { path } => println!("  ·  {}", path.display().to_string().dimmed()),
        }
    }
}
