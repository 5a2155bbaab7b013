//! File system helpers shared by the writer and the test fixtures.
//!
//! # Example
//!
//! ```rust,no_run
//! use portletgen::utils::{atomic_write, ensure_dir};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("target/generated-sources/portletgen"))?;
//! atomic_write(Path::new("target/generated-sources/portletgen/A.java"), b"class A {}")?;
//! # Ok(())
//! # }
//! ```

pub mod fs;

pub use fs::{atomic_write, ensure_dir, safe_write};
