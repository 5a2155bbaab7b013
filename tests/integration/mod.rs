//! Integration test suite for portletgen
//!
//! End-to-end tests for the generation pipeline and the command-line
//! interface. They build real source trees in temporary directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **pipeline**: library-level runs over real source trees
//! - **generate**: the `generate` command and its exit behavior
//! - **list**: the `list` command in text and JSON form
//! - **config_file**: `portletgen.toml` discovery, resolution and errors

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod config_file;
mod generate;
mod list;
mod pipeline;
