//! Test utilities for portletgen
//!
//! Logging setup plus fixtures that lay out Java source trees under a caller
//! supplied root (usually a `tempfile::TempDir`).
//!
//! # Example
//!
//! ```rust,no_run
//! use portletgen::test_utils::{portlet_source, write_java_source};
//! use std::path::Path;
//!
//! let root = Path::new("/tmp/java");
//! write_java_source(
//!     root,
//!     "edu/example/FooPortlet.java",
//!     &portlet_source("edu.example", "FooPortlet", "portlets.Foo", "Foo", "Shows foo"),
//! )
//! .unwrap();
//! ```

use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::utils::safe_write;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=portletgen=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Write `contents` to `root/relative_path`, creating package directories.
///
/// # Errors
///
/// Fails if the file cannot be written.
pub fn write_java_source(
    root: &Path,
    relative_path: &str,
    contents: &str,
) -> anyhow::Result<PathBuf> {
    let path = root.join(relative_path);
    safe_write(&path, contents)?;
    Ok(path)
}

/// A class carrying a complete `@Portlet` marker.
pub fn portlet_source(package: &str, class: &str, id: &str, title: &str, tooltip: &str) -> String {
    format!(
        r#"package {package};

@Portlet(id = "{id}", title = "{title}", tooltip = "{tooltip}")
public class {class} extends AbstractWebProtegePortletPresenter {{
}}
"#
    )
}

/// A class carrying a `@ProjectModulePlugin` marker binding the given types.
///
/// `bindings` are written as class literals, e.g. `FooPresenter` or `a.b.Foo`.
pub fn module_source(package: &str, class: &str, bindings: &[&str]) -> String {
    let literals: Vec<String> = bindings.iter().map(|b| format!("{b}.class")).collect();
    format!(
        "package {package};\n\n@ProjectModulePlugin({{{}}})\npublic class {class} {{\n}}\n",
        literals.join(", ")
    )
}

/// A file tree-sitter cannot parse cleanly.
pub fn broken_source(package: &str) -> String {
    format!("package {package};\n\npublic class Broken {{\n    void f( {{\n")
}

/// `edu/example/Foo.java` style path for a class in a package.
pub fn java_path(package: &str, class: &str) -> String {
    if package.is_empty() {
        format!("{class}.java")
    } else {
        format!("{}/{class}.java", package.replace('.', "/"))
    }
}
