//! Error handling for portletgen
//!
//! This module provides the error types used by the generation pipeline and the
//! user-facing error reporting used by the CLI. Errors fall into two groups:
//!
//! 1. **Fatal errors** ([`PortletGenError`]) abort the whole run. These cover setup
//!    problems (missing source roots, bad configuration) and generation problems
//!    (template failures, output that cannot be written).
//! 2. **Recoverable errors** ([`ParseError`], [`ValidationError`]) are scoped to a
//!    single file or declaration. They are collected into
//!    [`Diagnostics`](crate::core::Diagnostics) and reported, never propagated.
//!
//! Use [`user_friendly_error`] to turn any `anyhow::Error` into an [`ErrorContext`]
//! with an actionable suggestion before displaying it.
//!
//! # Examples
//!
//! ```rust,no_run
//! use portletgen::core::{PortletGenError, ErrorContext, user_friendly_error};
//!
//! fn check_roots(roots: &[std::path::PathBuf]) -> Result<(), PortletGenError> {
//!     if roots.is_empty() {
//!         return Err(PortletGenError::NoSourceRoots);
//!     }
//!     Ok(())
//! }
//!
//! if let Err(e) = check_roots(&[]) {
//!     let ctx = user_friendly_error(anyhow::Error::from(e));
//!     ctx.display();
//! }
//! ```

use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal errors for portletgen operations.
///
/// Every variant terminates the run. Per-file and per-declaration problems are
/// reported through [`ParseError`] and [`ValidationError`] instead.
///
/// # Error Categories
///
/// ## Setup
/// - [`NoSourceRoots`] - nothing to scan
/// - [`SourceRootNotFound`] - a configured root does not exist
/// - [`SourceRootNotDirectory`] - a configured root is a file
/// - [`SourceRootUnreadable`] - a configured root cannot be listed
///
/// ## Configuration
/// - [`ConfigNotFound`] - an explicitly requested config file is missing
/// - [`ConfigParseError`] - invalid TOML
/// - [`ConfigError`] - semantically invalid configuration
/// - [`InvalidPackageName`] - target package is not a Java package name
/// - [`InvalidExcludePattern`] - exclude entry is not a valid glob
///
/// ## Generation
/// - [`TemplateError`] - a template failed to load or render
/// - [`WriteError`] - a generated file could not be written
/// - [`ScanFailed`] - a background scan task panicked or was cancelled
/// - [`Other`] - anything without a more specific variant
///
/// [`NoSourceRoots`]: PortletGenError::NoSourceRoots
/// [`SourceRootNotFound`]: PortletGenError::SourceRootNotFound
/// [`SourceRootNotDirectory`]: PortletGenError::SourceRootNotDirectory
/// [`SourceRootUnreadable`]: PortletGenError::SourceRootUnreadable
/// [`ConfigNotFound`]: PortletGenError::ConfigNotFound
/// [`ConfigParseError`]: PortletGenError::ConfigParseError
/// [`ConfigError`]: PortletGenError::ConfigError
/// [`InvalidPackageName`]: PortletGenError::InvalidPackageName
/// [`InvalidExcludePattern`]: PortletGenError::InvalidExcludePattern
/// [`TemplateError`]: PortletGenError::TemplateError
/// [`WriteError`]: PortletGenError::WriteError
/// [`ScanFailed`]: PortletGenError::ScanFailed
/// [`Other`]: PortletGenError::Other
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortletGenError {
    /// No source roots were supplied, either in the configuration file or on the
    /// command line.
    #[error("No source roots configured")]
    NoSourceRoots,

    /// A configured source root does not exist.
    #[error("Source root does not exist: {path}")]
    SourceRootNotFound {
        /// The missing path as configured
        path: String,
    },

    /// A configured source root exists but is not a directory.
    #[error("Source root is not a directory: {path}")]
    SourceRootNotDirectory {
        /// The offending path
        path: String,
    },

    /// A configured source root cannot be listed.
    #[error("Source root is not readable: {path}")]
    SourceRootUnreadable {
        /// The offending path
        path: String,
        /// The underlying I/O failure
        reason: String,
    },

    /// Configuration file requested with `--config` does not exist.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to the missing configuration file
        path: String,
    },

    /// Configuration file is not valid TOML or has unexpected keys.
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParseError {
        /// Path to the configuration file
        file: String,
        /// Parser message
        reason: String,
    },

    /// Configuration is syntactically valid but unusable.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// The target package for the generated registry is not a valid Java package.
    #[error("Invalid Java package name: '{package}'")]
    InvalidPackageName {
        /// The rejected package name
        package: String,
    },

    /// An exclude entry is not a valid glob pattern.
    #[error("Invalid exclude pattern '{pattern}': {reason}")]
    InvalidExcludePattern {
        /// The rejected pattern
        pattern: String,
        /// Why the glob parser rejected it
        reason: String,
    },

    /// A template could not be loaded, parsed, or rendered.
    #[error("Template '{template}' failed: {reason}")]
    TemplateError {
        /// Template name
        template: String,
        /// Flattened error chain from the template engine
        reason: String,
    },

    /// A generated file could not be written to the output directory.
    #[error("Failed to write generated source: {path}")]
    WriteError {
        /// Target path of the generated file
        path: String,
        /// The underlying I/O failure
        reason: String,
    },

    /// A source root scan task did not complete.
    #[error("Source scan failed: {reason}")]
    ScanFailed {
        /// Why the task did not complete
        reason: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl PortletGenError {
    /// Whether this error was raised before scanning began.
    #[must_use]
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Self::NoSourceRoots
                | Self::SourceRootNotFound { .. }
                | Self::SourceRootNotDirectory { .. }
                | Self::SourceRootUnreadable { .. }
        )
    }
}

/// A file and optional line inside a source root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    /// Path of the source file
    pub path: PathBuf,
    /// 1-based line number, when known
    pub line: Option<usize>,
}

impl SourceLocation {
    /// Location covering a whole file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            line: None,
        }
    }

    /// Location of a specific line in a file.
    pub fn line(path: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            path: path.into(),
            line: Some(line),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path.display(), line),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

/// A source file that could not be parsed.
///
/// Scoped to one file: the scanner skips the file's declarations and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Couldn't parse file {location}: {reason}")]
pub struct ParseError {
    /// The file (and line of the first syntax error, if any)
    pub location: SourceLocation,
    /// What went wrong
    pub reason: String,
}

impl ParseError {
    /// Create a parse error for a file.
    pub fn new(path: &Path, reason: impl Into<String>) -> Self {
        Self {
            location: SourceLocation::file(path),
            reason: reason.into(),
        }
    }

    /// Create a parse error pointing at a line.
    pub fn at_line(path: &Path, line: usize, reason: impl Into<String>) -> Self {
        Self {
            location: SourceLocation::line(path, line),
            reason: reason.into(),
        }
    }
}

/// An annotated declaration whose arguments could not be turned into a descriptor.
///
/// Scoped to one declaration: it is dropped from the result set and reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid declaration {declaration}: {reason}")]
pub struct ValidationError {
    /// Canonical name of the offending declaration
    pub declaration: String,
    /// Where the declaration was found
    pub location: Option<SourceLocation>,
    /// What is wrong with it
    pub reason: String,
}

impl ValidationError {
    /// Create a validation error for a declaration.
    pub fn new(
        declaration: impl Into<String>,
        location: Option<SourceLocation>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            declaration: declaration.into(),
            location,
            reason: reason.into(),
        }
    }
}

/// Error wrapper that adds a suggestion and details for display in the terminal.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: PortletGenError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error without any suggestion or details.
    #[must_use]
    pub fn new(error: PortletGenError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a suggestion where one is known.
///
/// Known [`PortletGenError`]s get variant-specific advice. Other errors are wrapped
/// as [`PortletGenError::WriteError`] when they originate from I/O and as
/// [`PortletGenError::Other`] otherwise, keeping the full `anyhow` chain as details.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(known) = error.downcast_ref::<PortletGenError>() {
        return create_error_context(known.clone());
    }

    let chain = error.chain().map(ToString::to_string).collect::<Vec<_>>().join(": ");

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        return ErrorContext::new(PortletGenError::WriteError {
            path: "unknown".to_string(),
            reason: io_error.to_string(),
        })
        .with_details(chain)
        .with_suggestion("Check that the output directory is writable and the disk is not full");
    }

    ErrorContext::new(PortletGenError::Other {
        message: error.to_string(),
    })
    .with_details(chain)
}

fn create_error_context(error: PortletGenError) -> ErrorContext {
    let setup = error.is_setup_error();
    let mut context = variant_context(error);
    if setup && context.details.is_none() {
        context.details = Some("Nothing was scanned and no files were written".to_string());
    }
    context
}

fn variant_context(error: PortletGenError) -> ErrorContext {
    match &error {
        PortletGenError::NoSourceRoots => ErrorContext::new(error)
            .with_suggestion(
                "Pass --source-root <dir> or set source_roots in portletgen.toml",
            )
            .with_details("At least one directory of Java sources is required"),
        PortletGenError::SourceRootNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Check the path; relative roots in a config file resolve against the file's directory"),
        PortletGenError::SourceRootNotDirectory { .. } => ErrorContext::new(error)
            .with_suggestion("Source roots must be directories such as src/main/java"),
        PortletGenError::SourceRootUnreadable { reason, .. } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Check directory permissions")
        }
        PortletGenError::ConfigNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Create the file or omit --config to use ./portletgen.toml when present"),
        PortletGenError::ConfigParseError { reason, .. } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Check the TOML syntax. Supported keys: source_roots, output_dir, package, component_annotation, module_annotation, exclude, templates")
        }
        PortletGenError::InvalidPackageName { .. } => ErrorContext::new(error)
            .with_suggestion("Use a dotted Java package name such as edu.example.portlets"),
        PortletGenError::InvalidExcludePattern { .. } => ErrorContext::new(error)
            .with_suggestion("Exclude entries are glob patterns relative to each source root, e.g. **/generated/**"),
        PortletGenError::TemplateError { .. } => ErrorContext::new(error)
            .with_suggestion("If you use a custom template directory, check the template syntax and variable names")
            .with_details("No files were written; partial generated output is never emitted"),
        PortletGenError::WriteError { reason, .. } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion("Check that the output directory is writable")
        }
        PortletGenError::ScanFailed { .. } => ErrorContext::new(error)
            .with_details("No files were written")
            .with_suggestion("Run again with --verbose; if it persists, report it with the log output"),
        PortletGenError::ConfigError { .. } | PortletGenError::Other { .. } => {
            ErrorContext::new(error)
        }
    }
}
