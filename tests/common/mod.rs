//! Shared helpers for the integration tests.

#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use portletgen::test_utils::{java_path, module_source, portlet_source, write_java_source};

/// A temporary project with a Java source root and an output directory.
pub struct TestProject {
    _temp: TempDir,
    root: PathBuf,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new()?;
        let root = temp.path().to_path_buf();
        fs::create_dir_all(root.join("src/main/java"))?;
        Ok(Self {
            _temp: temp,
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_root(&self) -> PathBuf {
        self.root.join("src/main/java")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join("target/generated-sources/portletgen")
    }

    /// Write any Java file relative to the default source root.
    pub fn add_source(&self, relative_path: &str, contents: &str) -> Result<PathBuf> {
        write_java_source(&self.source_root(), relative_path, contents)
    }

    pub fn add_portlet(
        &self,
        package: &str,
        class: &str,
        id: &str,
        title: &str,
        tooltip: &str,
    ) -> Result<PathBuf> {
        self.add_source(
            &java_path(package, class),
            &portlet_source(package, class, id, title, tooltip),
        )
    }

    pub fn add_module(&self, package: &str, class: &str, bindings: &[&str]) -> Result<PathBuf> {
        self.add_source(&java_path(package, class), &module_source(package, class, bindings))
    }

    pub fn write_config(&self, contents: &str) -> Result<PathBuf> {
        let path = self.root.join("portletgen.toml");
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Read a generated file relative to the output directory.
    pub fn read_output(&self, relative_path: &str) -> Result<String> {
        Ok(fs::read_to_string(self.output_dir().join(relative_path))?)
    }

    /// The portletgen binary, run from the project root with colors and `RUST_LOG` off.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("portletgen").expect("portletgen binary");
        cmd.current_dir(&self.root).env("NO_COLOR", "1").env_remove("RUST_LOG");
        cmd
    }
}
