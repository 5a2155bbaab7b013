//! Java parsing with tree-sitter.
//!
//! Only the parts of the syntax tree the generator needs are inspected: the
//! package declaration, imports (to qualify class literals), type declarations
//! with their member types, and the annotations in each declaration's modifiers.
//!
//! A class literal is qualified only when its first segment is certain: a
//! single-type import, a type declared in scope in the same file, or a name that
//! is already package-qualified. Anything else (same package, `java.lang`, or an
//! on-demand import) stays as written, and the file's on-demand imports travel
//! with the declaration so generated code can resolve it the same way.

use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tree_sitter::{Node, Parser};

use super::literal::decode_string_literal;
use super::{AnnotationArguments, AnnotationUse, AnnotationValue, Declaration, DeclarationKind};
use crate::core::{ParseError, SourceLocation};

const PRIMITIVE_TYPES: &[&str] =
    &["boolean", "byte", "char", "short", "int", "long", "float", "double", "void"];

/// A reusable tree-sitter parser configured for Java.
pub struct JavaSourceParser {
    parser: Parser,
}

impl JavaSourceParser {
    /// Create a parser with the Java grammar loaded.
    ///
    /// # Errors
    ///
    /// Fails if the grammar's ABI version is incompatible with the tree-sitter runtime.
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .context("Failed to load the tree-sitter Java grammar")?;
        Ok(Self {
            parser,
        })
    }

    /// Read and parse one file.
    pub fn parse_file(&mut self, path: &Path) -> Result<Vec<Declaration>, ParseError> {
        let bytes = std::fs::read(path)
            .map_err(|e| ParseError::new(path, format!("cannot read file: {e}")))?;
        let source = String::from_utf8(bytes)
            .map_err(|_| ParseError::new(path, "file is not valid UTF-8"))?;
        self.parse_source(&source, path)
    }

    /// Parse Java source text that was read from `path`.
    ///
    /// Returns every type declaration in the file, outer types before their members.
    /// A syntax tree containing any error or missing node fails the whole file.
    pub fn parse_source(
        &mut self,
        source: &str,
        path: &Path,
    ) -> Result<Vec<Declaration>, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParseError::new(path, "parser produced no syntax tree"))?;
        let root = tree.root_node();

        if root.has_error() {
            let line = first_error(root).map_or(1, |node| node.start_position().row + 1);
            return Err(ParseError::at_line(path, line, format!("syntax error at line {line}")));
        }

        let unit = CompilationUnit::new(root, source.as_bytes(), path)?;
        let mut declarations = Vec::new();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if let Some(kind) = DeclarationKind::from_node_kind(child.kind()) {
                unit.collect(child, kind, None, &mut declarations)?;
            }
        }

        Ok(declarations)
    }
}

/// Depth-first search for the first error or missing node.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().filter(|c| c.has_error()).find_map(first_error)
}

/// Per-file state shared by every declaration in the file.
struct CompilationUnit<'a> {
    source: &'a [u8],
    path: &'a Path,
    package: String,
    imports: HashMap<String, String>,
    on_demand_imports: Vec<String>,
    /// Nested names (`Outer.Inner`) of every type declared in the file
    declared: HashSet<String>,
}

impl<'a> CompilationUnit<'a> {
    fn new(root: Node<'_>, source: &'a [u8], path: &'a Path) -> Result<Self, ParseError> {
        let mut unit = Self {
            source,
            path,
            package: String::new(),
            imports: HashMap::new(),
            on_demand_imports: Vec::new(),
            declared: HashSet::new(),
        };

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_declaration" => {
                    if let Some(name) = qualified_name_child(child) {
                        unit.package = unit.text(name)?.to_string();
                    }
                }
                "import_declaration" => unit.add_import(child)?,
                kind if DeclarationKind::from_node_kind(kind).is_some() => {
                    unit.declare(child, None)?;
                }
                _ => {}
            }
        }

        Ok(unit)
    }

    /// Record `import a.b.C;` by simple name and `import a.b.*;` by its prefix.
    /// Static imports cannot name a class literal's type and are ignored.
    fn add_import(&mut self, node: Node<'_>) -> Result<(), ParseError> {
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        if children.iter().any(|c| c.kind() == "static") {
            return Ok(());
        }
        let Some(name) = qualified_name_child(node) else {
            return Ok(());
        };
        let qualified = self.text(name)?.to_string();

        if children.iter().any(|c| c.kind() == "asterisk") {
            if !self.on_demand_imports.contains(&qualified) {
                self.on_demand_imports.push(qualified);
            }
        } else {
            let simple = qualified.rsplit('.').next().unwrap_or(&qualified).to_string();
            self.imports.insert(simple, qualified);
        }
        Ok(())
    }

    /// Register a type declaration and its member types by nested name.
    fn declare(&mut self, node: Node<'_>, outer: Option<&str>) -> Result<(), ParseError> {
        let Some(name_node) = node.child_by_field_name("name") else {
            return Ok(());
        };
        let simple_name = self.text(name_node)?;
        let nested_name = match outer {
            Some(outer) => format!("{outer}.{simple_name}"),
            None => simple_name.to_string(),
        };

        if let Some(body) = node.child_by_field_name("body") {
            for member in member_types(body) {
                self.declare(member, Some(&nested_name))?;
            }
        }
        self.declared.insert(nested_name);
        Ok(())
    }

    fn text(&self, node: Node<'_>) -> Result<&'a str, ParseError> {
        node.utf8_text(self.source).map_err(|_| {
            ParseError::at_line(self.path, node.start_position().row + 1, "invalid UTF-8 in source")
        })
    }

    /// Record a type declaration and recurse into its member types.
    fn collect(
        &self,
        node: Node<'_>,
        kind: DeclarationKind,
        outer: Option<&str>,
        out: &mut Vec<Declaration>,
    ) -> Result<(), ParseError> {
        let Some(name_node) = node.child_by_field_name("name") else {
            return Ok(());
        };
        let simple_name = self.text(name_node)?.to_string();
        let nested_name = match outer {
            Some(outer) => format!("{outer}.{simple_name}"),
            None => simple_name.clone(),
        };
        let canonical_name = if self.package.is_empty() {
            nested_name.clone()
        } else {
            format!("{}.{}", self.package, nested_name)
        };

        out.push(Declaration {
            simple_name,
            package_name: self.package.clone(),
            canonical_name,
            kind,
            annotations: self.annotations(node, outer)?,
            location: SourceLocation::line(self.path, node.start_position().row + 1),
            on_demand_imports: self.on_demand_imports.clone(),
        });

        if let Some(body) = node.child_by_field_name("body") {
            for member in member_types(body) {
                if let Some(kind) = DeclarationKind::from_node_kind(member.kind()) {
                    self.collect(member, kind, Some(&nested_name), out)?;
                }
            }
        }
        Ok(())
    }

    /// Annotations in the modifiers of `declaration`, resolved in the scope of
    /// its enclosing type `outer`.
    fn annotations(
        &self,
        declaration: Node<'_>,
        outer: Option<&str>,
    ) -> Result<Vec<AnnotationUse>, ParseError> {
        let mut cursor = declaration.walk();
        let Some(modifiers) =
            declaration.named_children(&mut cursor).find(|c| c.kind() == "modifiers")
        else {
            return Ok(Vec::new());
        };

        let mut annotations = Vec::new();
        let mut cursor = modifiers.walk();
        for node in modifiers.named_children(&mut cursor) {
            match node.kind() {
                "marker_annotation" | "annotation" => {
                    annotations.push(self.annotation(node, outer)?);
                }
                _ => {}
            }
        }
        Ok(annotations)
    }

    fn annotation(&self, node: Node<'_>, outer: Option<&str>) -> Result<AnnotationUse, ParseError> {
        let name = match node.child_by_field_name("name") {
            Some(name) => self.text(name)?.to_string(),
            None => String::new(),
        };

        let mut arguments = AnnotationArguments::new();
        if let Some(list) = node.child_by_field_name("arguments") {
            let mut cursor = list.walk();
            let items: Vec<Node<'_>> =
                list.named_children(&mut cursor).filter(|c| !is_comment(*c)).collect();
            for item in items {
                if item.kind() == "element_value_pair" {
                    let key = match item.child_by_field_name("key") {
                        Some(key) => self.text(key)?.to_string(),
                        None => continue,
                    };
                    if let Some(value) = item.child_by_field_name("value") {
                        arguments.insert(key, self.value(value, outer)?);
                    }
                } else {
                    arguments.insert("value", self.value(item, outer)?);
                }
            }
        }

        Ok(AnnotationUse {
            name,
            arguments,
        })
    }

    fn value(&self, node: Node<'_>, outer: Option<&str>) -> Result<AnnotationValue, ParseError> {
        let text = self.text(node)?;
        let value = match node.kind() {
            "string_literal" | "text_block" => match decode_string_literal(text) {
                Ok(decoded) => AnnotationValue::String(decoded),
                Err(reason) => {
                    tracing::debug!("Undecodable literal {} in {}: {}", text, self.path.display(), reason);
                    AnnotationValue::NonLiteral(text.to_string())
                }
            },
            "class_literal" => {
                let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                match compact.strip_suffix(".class") {
                    Some(type_name) => AnnotationValue::Type(self.resolve_type(type_name, outer)),
                    None => AnnotationValue::NonLiteral(text.to_string()),
                }
            }
            "element_value_array_initializer" => {
                let mut cursor = node.walk();
                let elements: Vec<Node<'_>> =
                    node.named_children(&mut cursor).filter(|c| !is_comment(*c)).collect();
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.value(element, outer)?);
                }
                AnnotationValue::Array(values)
            }
            "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal"
            | "decimal_floating_point_literal"
            | "hex_floating_point_literal"
            | "character_literal"
            | "true"
            | "false"
            | "null_literal" => AnnotationValue::Constant(text.to_string()),
            _ => AnnotationValue::NonLiteral(text.to_string()),
        };
        Ok(value)
    }

    /// Qualify a type name written in a class literal, seen from inside `outer`.
    ///
    /// The first segment is looked up as a member type of each enclosing type
    /// (innermost first), then as a top-level type of this file, then among the
    /// single-type imports. Otherwise the name is returned as written, which
    /// covers package-qualified names too.
    fn resolve_type(&self, written: &str, outer: Option<&str>) -> String {
        let (first, rest) = match written.split_once('.') {
            Some((first, rest)) => (first, Some(rest)),
            None => (written, None),
        };
        if rest.is_none() && PRIMITIVE_TYPES.contains(&first) {
            return written.to_string();
        }

        let mut scope = outer;
        while let Some(enclosing) = scope {
            let candidate = format!("{enclosing}.{first}");
            if self.declared.contains(&candidate) {
                return self.qualify(&candidate, rest);
            }
            scope = enclosing.rsplit_once('.').map(|(parent, _)| parent);
        }
        if self.declared.contains(first) {
            return self.qualify(first, rest);
        }

        if let Some(qualified) = self.imports.get(first) {
            return match rest {
                Some(rest) => format!("{qualified}.{rest}"),
                None => qualified.clone(),
            };
        }
        written.to_string()
    }

    /// `Outer.Inner` + `rest` in this file's package.
    fn qualify(&self, nested: &str, rest: Option<&str>) -> String {
        let mut name = if self.package.is_empty() {
            nested.to_string()
        } else {
            format!("{}.{}", self.package, nested)
        };
        if let Some(rest) = rest {
            name.push('.');
            name.push_str(rest);
        }
        name
    }
}

/// Member type declarations in a type body, including those after an enum's
/// constant list.
fn member_types(body: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = body.walk();
    let mut members = Vec::new();
    for member in body.named_children(&mut cursor) {
        if DeclarationKind::from_node_kind(member.kind()).is_some() {
            members.push(member);
        } else if member.kind() == "enum_body_declarations" {
            members.extend(member_types(member));
        }
    }
    members
}

fn qualified_name_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .find(|c| matches!(c.kind(), "identifier" | "scoped_identifier"))
}

fn is_comment(node: Node<'_>) -> bool {
    node.kind().ends_with("comment")
}
