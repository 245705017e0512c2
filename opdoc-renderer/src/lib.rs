//! # opdoc-renderer
//!
//! Tera-based template engine that renders instruction records into Markdown.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use opdoc_core::data::load_instructions;
//! use opdoc_renderer::{TemplateEngine, Templates};
//!
//! fn render_pages() -> Result<(), Box<dyn std::error::Error>> {
//!     let set = load_instructions(Path::new("data/instructions.yaml"))?;
//!     let engine = TemplateEngine::from_dir(Path::new("templates"))?;
//!     for record in &set {
//!         let page = engine.render_record("instruction_page.md.tera", record)?;
//!         println!("{} bytes", page.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod scaffold;

pub use context::{collection_context, record_context};
pub use engine::{embedded_templates, TemplateEngine, Templates};
pub use error::RenderError;
pub use scaffold::{scaffold, ScaffoldResult};
