//! `opdoc diff` — show unified diffs for what build would write.

use anyhow::{Context, Result};
use clap::Args;

use opdoc_build::diff;
use opdoc_core::BuildConfig;

use crate::ScopeArgs;

/// Arguments for `opdoc diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,
}

impl DiffArgs {
    pub fn run(self, config: &BuildConfig) -> Result<()> {
        let diffs = diff(config, self.scope.into())
            .with_context(|| format!("diff failed for '{}'", config.data.display()))?;

        if diffs.is_empty() {
            println!("No differences.");
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        Ok(())
    }
}
