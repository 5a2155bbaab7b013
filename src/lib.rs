//! portletgen - build-time portlet registry generator
//!
//! Scans Java source trees for classes marked with a component-descriptor
//! annotation (`@Portlet`) or a module-registration annotation
//! (`@ProjectModulePlugin`), turns each marked class into a validated,
//! immutable descriptor, and renders the complete descriptor sets into
//! generated Java sources: one portlet factory plus one glue class per module.
//!
//! # Architecture Overview
//!
//! ```text
//! source roots ──▶ scanner ──▶ extractor ──▶ builder ──▶ orchestrator ──▶ codegen ──▶ writer
//!                 (tree-sitter) (marker match) (descriptors)  (set union)    (tera)
//! ```
//!
//! - Every source root is scanned independently; descriptor sets are unioned
//!   with set semantics, so scan order never affects the output.
//! - Output order is re-derived from descriptor content (class name), so the
//!   same sources always produce byte-identical files.
//! - Broken files and malformed declarations are reported as diagnostics and
//!   skipped; only setup, template and write failures abort a run.
//!
//! # Core Modules
//!
//! - [`scanner`] - Java source discovery and parsing into declarations
//! - [`extractor`] - Selection of declarations carrying the marker annotations
//! - [`builder`] - Validation of marker arguments into descriptors
//! - [`descriptor`] - Descriptor types, stable hash keys and Java escaping
//! - [`codegen`] - Tera rendering of the factory and module glue
//! - [`orchestrator`] - End-to-end runs over all source roots
//! - [`writer`] - Sinks for rendered artifacts
//!
//! ## Supporting Modules
//!
//! - [`cli`] - Command-line interface
//! - [`config`] - `portletgen.toml` loading and command line overrides
//! - [`core`] - Errors, diagnostics and user-facing error rendering
//! - [`utils`] - Atomic file writes
//!
//! # Example
//!
//! ```rust,no_run
//! use portletgen::config::GeneratorConfig;
//! use portletgen::orchestrator::PortletGenerator;
//! use portletgen::writer::DirectorySourceWriter;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GeneratorConfig {
//!     source_roots: vec!["src/main/java".into()],
//!     ..GeneratorConfig::default()
//! };
//! let mut writer = DirectorySourceWriter::new(&config.output_dir);
//! let report = PortletGenerator::new(config).run(&mut writer).await?;
//! println!("{} portlet(s)", report.portlet_types.len());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod constants;
pub mod core;
pub mod descriptor;
pub mod extractor;
pub mod orchestrator;
pub mod scanner;
pub mod utils;
pub mod writer;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
