//! End-to-end generation runs.
//!
//! [`PortletGenerator`] ties the pipeline together:
//!
//! 1. check the source roots (any failure aborts before scanning)
//! 2. per root, scan, extract and build descriptors on the blocking pool
//! 3. union the per-root descriptor sets and concatenate diagnostics in root order
//! 4. render every artifact, then hand them to a [`SourceWriter`]
//!
//! Parse and validation problems are collected as diagnostics and never fail
//! the run. Setup, template and write failures do.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use futures::future::try_join_all;

use crate::builder::{build_module_descriptor, build_type_descriptor};
use crate::codegen::{CodeGenerator, GeneratedArtifact, TemplateSet};
use crate::config::GeneratorConfig;
use crate::core::{Diagnostics, PortletGenError};
use crate::descriptor::{PortletModuleDescriptor, PortletTypeDescriptor};
use crate::extractor::AnnotatedDeclarationExtractor;
use crate::scanner::SourceScanner;
use crate::writer::SourceWriter;

/// Descriptors and diagnostics collected from all source roots.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub portlet_types: BTreeSet<PortletTypeDescriptor>,
    pub modules: BTreeSet<PortletModuleDescriptor>,
    pub diagnostics: Diagnostics,
}

impl ScanOutcome {
    fn merge(&mut self, other: ScanOutcome) {
        self.portlet_types.extend(other.portlet_types);
        self.modules.extend(other.modules);
        self.diagnostics.extend(other.diagnostics);
    }
}

/// Result of a successful [`PortletGenerator::run`].
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub portlet_types: BTreeSet<PortletTypeDescriptor>,
    pub modules: BTreeSet<PortletModuleDescriptor>,
    pub diagnostics: Diagnostics,
    /// Where each artifact was written, in relative-path order.
    pub written: Vec<PathBuf>,
}

/// Runs the scan and generation pipeline for one configuration.
#[derive(Debug, Clone)]
pub struct PortletGenerator {
    config: GeneratorConfig,
}

impl PortletGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Check every configured source root.
    ///
    /// # Errors
    ///
    /// - [`PortletGenError::NoSourceRoots`] when none are configured
    /// - [`PortletGenError::SourceRootNotFound`] for a missing root
    /// - [`PortletGenError::SourceRootNotDirectory`] for a root that is a file
    /// - [`PortletGenError::SourceRootUnreadable`] for a root that cannot be listed
    pub fn validate_source_roots(&self) -> Result<Vec<PathBuf>, PortletGenError> {
        if self.config.source_roots.is_empty() {
            return Err(PortletGenError::NoSourceRoots);
        }

        for root in &self.config.source_roots {
            let path = root.display().to_string();
            if !root.exists() {
                return Err(PortletGenError::SourceRootNotFound {
                    path,
                });
            }
            if !root.is_dir() {
                return Err(PortletGenError::SourceRootNotDirectory {
                    path,
                });
            }
            fs::read_dir(root).map_err(|e| PortletGenError::SourceRootUnreadable {
                path,
                reason: e.to_string(),
            })?;
        }

        Ok(self.config.source_roots.clone())
    }

    /// Scan all source roots concurrently and union the results.
    ///
    /// # Errors
    ///
    /// Fails on an invalid source root, an invalid exclude pattern, or if a
    /// scan task cannot run.
    pub async fn scan(&self) -> Result<ScanOutcome> {
        let roots = self.validate_source_roots()?;
        let scanner = SourceScanner::new().with_excludes(self.config.exclude_patterns()?);
        let extractor = AnnotatedDeclarationExtractor::new(
            &self.config.component_annotation,
            &self.config.module_annotation,
        );

        let tasks = roots.into_iter().map(|root| {
            let scanner = scanner.clone();
            let extractor = extractor.clone();
            tokio::task::spawn_blocking(move || scan_root(&root, &scanner, &extractor))
        });

        let mut outcome = ScanOutcome::default();
        let results = try_join_all(tasks).await.map_err(|e| PortletGenError::ScanFailed {
            reason: e.to_string(),
        })?;
        for result in results {
            outcome.merge(result?);
        }

        tracing::debug!(
            "Scan found {} portlet(s) and {} module(s) with {} diagnostic(s)",
            outcome.portlet_types.len(),
            outcome.modules.len(),
            outcome.diagnostics.len()
        );
        Ok(outcome)
    }

    /// Render the artifacts for a scan outcome.
    ///
    /// # Errors
    ///
    /// Returns [`PortletGenError::TemplateError`] if the templates cannot be
    /// loaded or rendered.
    pub fn render(&self, outcome: &ScanOutcome) -> Result<Vec<GeneratedArtifact>, PortletGenError> {
        let templates = match &self.config.templates {
            Some(dir) => TemplateSet::with_overrides(dir)?,
            None => TemplateSet::builtin(),
        };
        CodeGenerator::new(&self.config.package, templates)
            .generate(&outcome.portlet_types, &outcome.modules)
    }

    /// Validate, scan, render and write.
    ///
    /// Every artifact is rendered before the first one is written, so a
    /// template failure leaves the output untouched.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration, setup errors, template errors, or write
    /// errors. Parse and validation problems are reported in the returned
    /// diagnostics instead.
    pub async fn run(&self, writer: &mut dyn SourceWriter) -> Result<GenerationReport> {
        self.config.validate()?;
        let outcome = self.scan().await?;
        let artifacts = self.render(&outcome)?;

        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in &artifacts {
            written.push(writer.write_source(artifact)?);
        }

        for portlet in &outcome.portlet_types {
            tracing::info!("[Portlet] {}", portlet.id());
        }
        tracing::info!(
            "Generated {} file(s) for {} portlet(s) and {} module(s)",
            written.len(),
            outcome.portlet_types.len(),
            outcome.modules.len()
        );

        Ok(GenerationReport {
            portlet_types: outcome.portlet_types,
            modules: outcome.modules,
            diagnostics: outcome.diagnostics,
            written,
        })
    }
}

fn scan_root(
    root: &Path,
    scanner: &SourceScanner,
    extractor: &AnnotatedDeclarationExtractor,
) -> Result<ScanOutcome> {
    let mut outcome = ScanOutcome::default();
    let declarations = scanner.scan(root, &mut outcome.diagnostics)?;

    for annotated in extractor.find_portlet_declarations(&declarations) {
        match build_type_descriptor(&annotated) {
            Ok(descriptor) => {
                tracing::debug!("Built {}", descriptor);
                outcome.portlet_types.insert(descriptor);
            }
            Err(error) => outcome.diagnostics.validation_error(error),
        }
    }

    for annotated in extractor.find_module_declarations(&declarations) {
        match build_module_descriptor(&annotated) {
            Ok(descriptor) => {
                outcome.modules.insert(descriptor);
            }
            Err(error) => outcome.diagnostics.validation_error(error),
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiagnosticKind;
    use crate::test_utils::{
        broken_source, init_test_logging, java_path, module_source, portlet_source,
        write_java_source,
    };
    use crate::writer::MemorySourceWriter;
    use tempfile::TempDir;

    fn generator(roots: Vec<PathBuf>) -> PortletGenerator {
        PortletGenerator::new(GeneratorConfig {
            source_roots: roots,
            package: "edu.example.gen".to_string(),
            ..GeneratorConfig::default()
        })
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_valid_descriptors() {
        init_test_logging(None);
        let temp = TempDir::new().unwrap();
        write_java_source(temp.path(), "edu/example/Broken.java", &broken_source("edu.example"))
            .unwrap();
        write_java_source(
            temp.path(),
            &java_path("edu.example", "FooPortlet"),
            &portlet_source("edu.example", "FooPortlet", "portlets.Foo", "Foo", "Shows foo"),
        )
        .unwrap();

        let mut writer = MemorySourceWriter::new();
        let report = generator(vec![temp.path().to_path_buf()]).run(&mut writer).await.unwrap();

        assert_eq!(report.portlet_types.len(), 1);
        assert_eq!(report.diagnostics.count(DiagnosticKind::Parse), 1);
        assert_eq!(report.diagnostics.count(DiagnosticKind::Validation), 0);
        let factory = writer.get("edu/example/gen/PortletFactoryGenerated.java").unwrap();
        assert!(factory.contains("edu.example.FooPortlet.class"));
    }

    #[tokio::test]
    async fn test_invalid_declaration_is_reported_and_skipped() {
        let temp = TempDir::new().unwrap();
        write_java_source(
            temp.path(),
            "p/Quoted.java",
            "package p;\n@Portlet(id = \"\\\"x\\\"\", title = \"T\", tooltip = \"t\")\nclass Quoted {}\n",
        )
        .unwrap();
        write_java_source(temp.path(), "p/Good.java", &portlet_source("p", "Good", "g", "G", "g"))
            .unwrap();

        let outcome = generator(vec![temp.path().to_path_buf()]).scan().await.unwrap();
        let ids: Vec<_> = outcome.portlet_types.iter().map(|d| d.id().to_string()).collect();
        assert_eq!(ids, vec!["g"]);
        assert_eq!(outcome.diagnostics.count(DiagnosticKind::Validation), 1);
        let message = &outcome.diagnostics.iter().next().unwrap().message;
        assert!(message.contains("p.Quoted"));
    }

    #[tokio::test]
    async fn test_roots_without_annotations_yield_stub() {
        let temp = TempDir::new().unwrap();
        write_java_source(temp.path(), "p/Plain.java", "package p;\nclass Plain {}\n").unwrap();

        let mut writer = MemorySourceWriter::new();
        let report = generator(vec![temp.path().to_path_buf()]).run(&mut writer).await.unwrap();

        assert!(report.portlet_types.is_empty());
        assert!(report.modules.is_empty());
        assert!(report.diagnostics.is_empty());
        assert_eq!(writer.len(), 1);
        assert!(writer.get("edu/example/gen/PortletFactoryGenerated.java").is_some());
    }

    #[tokio::test]
    async fn test_zero_roots_is_setup_error() {
        let mut writer = MemorySourceWriter::new();
        let error = generator(Vec::new()).run(&mut writer).await.unwrap_err();
        assert_eq!(error.downcast_ref::<PortletGenError>(), Some(&PortletGenError::NoSourceRoots));
        assert!(writer.is_empty());
    }

    #[test]
    fn test_invalid_roots() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.java");
        fs::write(&file, "").unwrap();

        let missing = generator(vec![temp.path().join("missing")]).validate_source_roots();
        assert!(matches!(missing, Err(PortletGenError::SourceRootNotFound { .. })));

        let not_dir = generator(vec![file]).validate_source_roots();
        assert!(matches!(not_dir, Err(PortletGenError::SourceRootNotDirectory { .. })));
    }

    #[tokio::test]
    async fn test_duplicates_across_roots_collapse() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let source = portlet_source("p", "Same", "same", "Same", "same");
        write_java_source(first.path(), "p/Same.java", &source).unwrap();
        write_java_source(second.path(), "p/Same.java", &source).unwrap();
        write_java_source(
            second.path(),
            "p/Other.java",
            &portlet_source("p", "Other", "other", "Other", "other"),
        )
        .unwrap();

        let outcome = generator(vec![first.path().to_path_buf(), second.path().to_path_buf()])
            .scan()
            .await
            .unwrap();
        let classes: Vec<_> =
            outcome.portlet_types.iter().map(|d| d.canonical_class_name().to_string()).collect();
        assert_eq!(classes, vec!["p.Other", "p.Same"]);
    }

    #[tokio::test]
    async fn test_modules_are_generated() {
        let temp = TempDir::new().unwrap();
        write_java_source(
            temp.path(),
            "p/FooModule.java",
            &module_source("p", "FooModule", &["FooPresenter", "q.BarView"]),
        )
        .unwrap();

        let mut writer = MemorySourceWriter::new();
        let report = generator(vec![temp.path().to_path_buf()]).run(&mut writer).await.unwrap();

        let module = report.modules.iter().next().unwrap();
        assert_eq!(module.bindings(), ["FooPresenter", "q.BarView"]);
        let glue = writer.get("p/FooModuleGenerated.java").unwrap();
        assert!(glue.contains("bindings.add(FooPresenter.class);"));
        assert!(glue.contains("bindings.add(q.BarView.class);"));
        let factory = writer.get("edu/example/gen/PortletFactoryGenerated.java").unwrap();
        assert!(factory.contains("portletModules.add(p.FooModuleGenerated.class);"));
    }

    #[tokio::test]
    async fn test_excluded_files_are_not_scanned() {
        let temp = TempDir::new().unwrap();
        write_java_source(
            temp.path(),
            "p/generated/Gen.java",
            &portlet_source("p.generated", "Gen", "gen", "Gen", "gen"),
        )
        .unwrap();
        write_java_source(temp.path(), "p/Kept.java", &portlet_source("p", "Kept", "k", "K", "k"))
            .unwrap();

        let generator = PortletGenerator::new(GeneratorConfig {
            source_roots: vec![temp.path().to_path_buf()],
            exclude: vec!["**/generated/**".into()],
            ..GeneratorConfig::default()
        });
        let outcome = generator.scan().await.unwrap();
        assert_eq!(outcome.portlet_types.len(), 1);
        assert_eq!(outcome.portlet_types.iter().next().unwrap().id(), "k");
    }
}
