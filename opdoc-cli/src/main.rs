//! opdoc — render instruction reference docs from YAML.
//!
//! # Usage
//!
//! ```text
//! opdoc                       # same as `opdoc build`
//! opdoc build [--pages|--index] [--dry-run]
//! opdoc diff [--pages|--index]
//! opdoc init [--force]
//! ```
//!
//! Paths default to `data/instructions.yaml`, `templates/`,
//! `docs/instructions/` and `docs/instructions.md`. Override them with a
//! YAML config (`--config`) or individual flags.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};

use commands::{build::BuildArgs, diff::DiffArgs, init::InitArgs};
use opdoc_build::Scope;
use opdoc_core::BuildConfig;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "opdoc",
    version,
    about = "Render VM instruction reference pages from YAML definitions",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    paths: PathArgs,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render and write instruction pages and the index (default).
    Build(BuildArgs),

    /// Show unified diff of what build would write.
    Diff(DiffArgs),

    /// Write the default templates into the template root.
    Init(InitArgs),
}

// ---------------------------------------------------------------------------
// Shared arguments
// ---------------------------------------------------------------------------

/// Config file plus per-path overrides, applied in that order.
#[derive(Args, Debug, Default)]
pub struct PathArgs {
    /// YAML build config; fields not set there keep their defaults.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Instruction data file.
    #[arg(long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Template root directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Directory receiving one page per instruction.
    #[arg(long, global = true, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Path of the aggregate index page.
    #[arg(long, global = true, value_name = "FILE")]
    pub index_out: Option<PathBuf>,
}

impl PathArgs {
    pub fn resolve(&self) -> Result<BuildConfig> {
        let mut config = match &self.config {
            Some(path) => BuildConfig::load(path)
                .with_context(|| format!("cannot load config '{}'", path.display()))?,
            None => BuildConfig::default(),
        };
        if let Some(data) = &self.data {
            config.data = data.clone();
        }
        if let Some(templates) = &self.templates {
            config.templates = templates.clone();
        }
        if let Some(out_dir) = &self.out_dir {
            config.out_dir = out_dir.clone();
        }
        if let Some(index_out) = &self.index_out {
            config.index_out = index_out.clone();
        }
        Ok(config)
    }
}

/// `--pages` / `--index` selection shared by `build` and `diff`.
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct ScopeArgs {
    /// Only the per-instruction pages.
    #[arg(long, conflicts_with = "index")]
    pub pages: bool,

    /// Only the aggregate index page.
    #[arg(long)]
    pub index: bool,
}

impl From<ScopeArgs> for Scope {
    fn from(args: ScopeArgs) -> Self {
        match (args.pages, args.index) {
            (true, _) => Scope::Pages,
            (_, true) => Scope::Index,
            _ => Scope::All,
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = cli.paths.resolve()?;
    tracing::debug!(?config, "resolved build config");
    match cli.command {
        None => BuildArgs::default().run(&config),
        Some(Commands::Build(args)) => args.run(&config),
        Some(Commands::Diff(args)) => args.run(&config),
        Some(Commands::Init(args)) => args.run(&config),
    }
}
