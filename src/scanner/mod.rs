//! Source scanning: from a source root to a stream of type declarations.
//!
//! The scanner walks a source root for `.java` files, parses each one with the
//! tree-sitter Java grammar, and reports every type declaration it finds
//! (including nested member types) together with the annotations attached to it
//! and their literal argument values.
//!
//! # Failure Handling
//!
//! A file that cannot be read or contains syntax errors is reported to the
//! [`Diagnostics`] sink as a parse error and contributes no declarations. The
//! scan always continues with the next file.
//!
//! # Literal Arguments
//!
//! Only literal annotation arguments are resolved: string literals and text
//! blocks (decoded), class literals (type references, qualified where the
//! file determines the type), array initializers, and simple constants. Any other
//! expression is kept as [`AnnotationValue::NonLiteral`] so that the descriptor
//! builder can reject the declaration that needs it.
//!
//! # Example
//!
//! ```rust,no_run
//! use portletgen::core::Diagnostics;
//! use portletgen::scanner::SourceScanner;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let scanner = SourceScanner::new();
//! let mut diagnostics = Diagnostics::new();
//! for declaration in scanner.declarations(Path::new("src/main/java"), &mut diagnostics)? {
//!     println!("{}", declaration.canonical_name);
//! }
//! # Ok(())
//! # }
//! ```

mod discovery;
mod java;
mod literal;

pub use discovery::find_java_files;
pub use java::JavaSourceParser;
pub use literal::decode_string_literal;

use anyhow::Result;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::{Diagnostics, SourceLocation};

/// The flavour of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Class,
    Interface,
    Enum,
    Record,
    AnnotationType,
}

impl DeclarationKind {
    /// Map a tree-sitter node kind to a declaration kind.
    pub(crate) fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "class_declaration" => Some(Self::Class),
            "interface_declaration" => Some(Self::Interface),
            "enum_declaration" => Some(Self::Enum),
            "record_declaration" => Some(Self::Record),
            "annotation_type_declaration" => Some(Self::AnnotationType),
            _ => None,
        }
    }
}

/// A literal annotation argument value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnnotationValue {
    /// A decoded string literal or text block
    String(String),
    /// A class literal (`Foo.class`), fully qualified when the file determines it, else as written
    Type(String),
    /// An array initializer (`{a, b}`)
    Array(Vec<AnnotationValue>),
    /// Another literal token (number, boolean, char, `null`) as written
    Constant(String),
    /// Any non-literal expression, as written
    NonLiteral(String),
}

impl AnnotationValue {
    /// The decoded string, if this is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::String(value) => format!("string \"{value}\""),
            Self::Type(name) => format!("class literal {name}.class"),
            Self::Array(items) => format!("array of {} element(s)", items.len()),
            Self::Constant(text) => format!("constant {text}"),
            Self::NonLiteral(text) => format!("non-literal expression `{text}`"),
        }
    }
}

/// Ordered mapping from annotation parameter name to literal value.
///
/// A single unnamed argument (`@Marker("x")`) is stored under `value`, matching
/// Java's shorthand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationArguments {
    entries: Vec<(String, AnnotationValue)>,
}

impl AnnotationArguments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an argument, keeping first-insertion order.
    pub fn insert(&mut self, key: impl Into<String>, value: AnnotationValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&AnnotationValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnnotationValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, AnnotationValue)> for AnnotationArguments {
    fn from_iter<I: IntoIterator<Item = (K, AnnotationValue)>>(iter: I) -> Self {
        let mut arguments = Self::new();
        for (key, value) in iter {
            arguments.insert(key, value);
        }
        arguments
    }
}

/// One annotation attached to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationUse {
    /// Name as written in source (`Portlet` or `edu.example.Portlet`)
    pub name: String,
    pub arguments: AnnotationArguments,
}

impl AnnotationUse {
    /// Last segment of the written name.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// A type declaration found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub simple_name: String,
    /// Enclosing package, empty for the default package
    pub package_name: String,
    /// Package plus enclosing type names plus simple name, dot-separated
    pub canonical_name: String,
    pub kind: DeclarationKind,
    pub annotations: Vec<AnnotationUse>,
    pub location: SourceLocation,
    /// Prefixes of the file's non-static `import a.b.*;` declarations, in source order
    pub on_demand_imports: Vec<String>,
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.canonical_name, self.location)
    }
}

/// Scans source roots for type declarations.
#[derive(Debug, Clone, Default)]
pub struct SourceScanner {
    excludes: Vec<glob::Pattern>,
}

impl SourceScanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip files whose path relative to the source root matches any pattern.
    #[must_use]
    pub fn with_excludes(mut self, excludes: Vec<glob::Pattern>) -> Self {
        self.excludes = excludes;
        self
    }

    /// Lazily parse every Java file under `root`.
    ///
    /// Files are discovered up front in sorted order; each file is parsed only when
    /// the iterator reaches it. Parse failures go to `diagnostics`.
    ///
    /// # Errors
    ///
    /// Fails only if the Java grammar cannot be loaded.
    pub fn declarations<'a>(
        &self,
        root: &Path,
        diagnostics: &'a mut Diagnostics,
    ) -> Result<Declarations<'a>> {
        let files = find_java_files(root, &self.excludes, diagnostics);
        tracing::debug!("Found {} Java file(s) under {}", files.len(), root.display());

        Ok(Declarations {
            files: files.into_iter(),
            parser: JavaSourceParser::new()?,
            pending: VecDeque::new(),
            diagnostics,
        })
    }

    /// Parse every Java file under `root` and collect the declarations.
    ///
    /// # Errors
    ///
    /// Fails only if the Java grammar cannot be loaded.
    pub fn scan(&self, root: &Path, diagnostics: &mut Diagnostics) -> Result<Vec<Declaration>> {
        Ok(self.declarations(root, diagnostics)?.collect())
    }
}

/// Lazy stream of declarations produced by [`SourceScanner::declarations`].
pub struct Declarations<'a> {
    files: std::vec::IntoIter<PathBuf>,
    parser: JavaSourceParser,
    pending: VecDeque<Declaration>,
    diagnostics: &'a mut Diagnostics,
}

impl Iterator for Declarations<'_> {
    type Item = Declaration;

    fn next(&mut self) -> Option<Declaration> {
        loop {
            if let Some(declaration) = self.pending.pop_front() {
                return Some(declaration);
            }

            let file = self.files.next()?;
            tracing::debug!("Parsing {}", file.display());
            match self.parser.parse_file(&file) {
                Ok(declarations) => self.pending.extend(declarations),
                Err(error) => self.diagnostics.parse_error(error),
            }
        }
    }
}
