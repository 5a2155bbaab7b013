//! Java source file discovery.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::constants::JAVA_EXTENSION;
use crate::core::{Diagnostics, ParseError};

/// Recursively find `.java` files under `root`, sorted by path.
///
/// Exclude patterns are matched against the path relative to `root`, using `/` as
/// the separator on every platform. Directories that cannot be read are reported
/// to `diagnostics` and skipped.
///
/// # Examples
///
/// ```rust,no_run
/// use portletgen::core::Diagnostics;
/// use portletgen::scanner::find_java_files;
/// use std::path::Path;
///
/// let excludes = vec![glob::Pattern::new("**/generated/**").unwrap()];
/// let mut diagnostics = Diagnostics::new();
/// let files = find_java_files(Path::new("src/main/java"), &excludes, &mut diagnostics);
/// ```
pub fn find_java_files(
    root: &Path,
    excludes: &[glob::Pattern],
    diagnostics: &mut Diagnostics,
) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                let path = error.path().unwrap_or(root).to_path_buf();
                diagnostics.parse_error(ParseError::new(&path, format!("cannot read: {error}")));
                continue;
            }
        };

        if !entry.file_type().is_file()
            || entry.path().extension().and_then(|e| e.to_str()) != Some(JAVA_EXTENSION)
        {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let relative = relative.to_string_lossy().replace('\\', "/");
        if excludes.iter().any(|pattern| pattern.matches(&relative)) {
            tracing::debug!("Excluded {}", relative);
            continue;
        }

        files.push(entry.into_path());
    }

    files
}
