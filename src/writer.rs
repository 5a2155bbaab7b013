//! Sinks for generated artifacts.
//!
//! The code generator only renders; a [`SourceWriter`] decides where the text
//! goes. [`DirectorySourceWriter`] writes under an output directory and
//! [`MemorySourceWriter`] keeps everything in memory for dry runs and tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::codegen::GeneratedArtifact;
use crate::core::PortletGenError;
use crate::utils::safe_write;

/// Destination for rendered source files.
pub trait SourceWriter {
    /// Emit one artifact, returning where it ended up.
    ///
    /// # Errors
    ///
    /// Returns [`PortletGenError::WriteError`] if the artifact cannot be stored.
    fn write_source(&mut self, artifact: &GeneratedArtifact) -> Result<PathBuf, PortletGenError>;
}

/// Writes artifacts below an output directory, one file per artifact.
#[derive(Debug, Clone)]
pub struct DirectorySourceWriter {
    output_dir: PathBuf,
}

impl DirectorySourceWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl SourceWriter for DirectorySourceWriter {
    fn write_source(&mut self, artifact: &GeneratedArtifact) -> Result<PathBuf, PortletGenError> {
        let target = self.output_dir.join(&artifact.relative_path);
        safe_write(&target, &artifact.contents).map_err(|e| PortletGenError::WriteError {
            path: target.display().to_string(),
            reason: format!("{e:#}"),
        })?;
        tracing::debug!("Wrote {}", target.display());
        Ok(target)
    }
}

/// Keeps artifacts in memory, keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct MemorySourceWriter {
    files: BTreeMap<PathBuf, String>,
}

impl MemorySourceWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, relative_path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(relative_path.as_ref()).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl SourceWriter for MemorySourceWriter {
    fn write_source(&mut self, artifact: &GeneratedArtifact) -> Result<PathBuf, PortletGenError> {
        self.files.insert(artifact.relative_path.clone(), artifact.contents.clone());
        Ok(artifact.relative_path.clone())
    }
}
