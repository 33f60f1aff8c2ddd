//! Go contract parser on top of tree-sitter-go.
//!
//! Lowers the concrete syntax tree of one Go file into the declaration tree
//! of [`strata_core::domain::syntax`]. Only what the extractor needs is kept:
//! the package clause, imports and top-level type declarations.

use std::path::Path;

use strata_core::{
    application::{ApplicationError, ports::ContractParser},
    domain::{FieldDecl, ImportSpec, MethodDecl, SourceFile, TypeDecl, TypeExpr},
    error::{StrataError, StrataResult},
};
use tracing::debug;
use tree_sitter::{Node, Parser};

/// Production contract parser for Go source files.
///
/// A fresh `tree_sitter::Parser` is created per call; the adapter itself is
/// stateless and therefore `Send + Sync`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoContractParser;

impl GoContractParser {
    pub fn new() -> Self {
        Self
    }
}

impl ContractParser for GoContractParser {
    fn parse(&self, source: &str, path: &Path) -> StrataResult<SourceFile> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| StrataError::Internal {
                message: format!("Failed to load the Go grammar: {e}"),
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| StrataError::Internal {
                message: "tree-sitter returned no tree".into(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            let node = first_error(root);
            let reason = if node.is_missing() {
                format!("missing `{}`", node.kind())
            } else {
                format!("unexpected `{}`", snippet(node_text(&node, source)))
            };
            return Err(ApplicationError::ContractParse {
                path: path.to_path_buf(),
                line: node.start_position().row + 1,
                column: node.start_position().column + 1,
                reason,
            }
            .into());
        }

        let file = Lowering { source }.source_file(root);
        debug!(
            path = %path.display(),
            package = %file.package,
            declarations = file.declarations.len(),
            "Go contract lowered"
        );
        Ok(file)
    }

    fn extension(&self) -> &'static str {
        "go"
    }
}

/// Get text for a tree-sitter node
fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// First line of `text`, capped for error messages.
fn snippet(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > 24 {
        format!("{}…", line.chars().take(24).collect::<String>())
    } else {
        line.to_string()
    }
}

/// Depth-first search for the first ERROR or MISSING node.
fn first_error(node: Node<'_>) -> Node<'_> {
    if node.is_error() || node.is_missing() {
        return node;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.is_error() || child.is_missing() || child.has_error() {
            return first_error(child);
        }
    }
    node
}

struct Lowering<'s> {
    source: &'s str,
}

impl<'s> Lowering<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        node_text(&node, self.source)
    }

    fn source_file(&self, root: Node<'_>) -> SourceFile {
        let mut file = SourceFile::default();
        let mut cursor = root.walk();

        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_clause" => {
                    if let Some(name) = child.named_child(0) {
                        file.package = self.text(name).to_string();
                    }
                }
                "import_declaration" => self.imports(child, &mut file.imports),
                "type_declaration" => self.type_declaration(child, &mut file.declarations),
                _ => {}
            }
        }
        file
    }

    // ── Imports ──────────────────────────────────────────────────────────────

    fn imports(&self, decl: Node<'_>, out: &mut Vec<ImportSpec>) {
        let mut cursor = decl.walk();
        for child in decl.named_children(&mut cursor) {
            match child.kind() {
                "import_spec" => out.extend(self.import_spec(child)),
                "import_spec_list" => {
                    let mut inner = child.walk();
                    for spec in child.named_children(&mut inner) {
                        if spec.kind() == "import_spec" {
                            out.extend(self.import_spec(spec));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn import_spec(&self, spec: Node<'_>) -> Option<ImportSpec> {
        let path = spec.child_by_field_name("path")?;
        let path = self.text(path).trim_matches(|c| c == '"' || c == '`');
        Some(match spec.child_by_field_name("name") {
            Some(alias) => ImportSpec::aliased(self.text(alias), path),
            None => ImportSpec::new(path),
        })
    }

    // ── Type declarations ────────────────────────────────────────────────────

    fn type_declaration(&self, decl: Node<'_>, out: &mut Vec<TypeDecl>) {
        let mut cursor = decl.walk();
        for spec in decl.named_children(&mut cursor) {
            if !matches!(spec.kind(), "type_spec" | "type_alias") {
                continue;
            }
            let Some(name) = spec.child_by_field_name("name") else {
                continue;
            };
            let name = self.text(name);

            let generic = spec.child_by_field_name("type_parameters").is_some();
            let body = spec
                .child_by_field_name("type")
                .filter(|ty| ty.kind() == "interface_type" && spec.kind() == "type_spec");

            out.push(match body {
                Some(iface) if !generic => TypeDecl::interface(name, self.methods(iface)),
                _ => TypeDecl::other(name),
            });
        }
    }

    /// Explicit methods of an interface; embedded interfaces and type
    /// constraints are not lifted.
    fn methods(&self, iface: Node<'_>) -> Vec<MethodDecl> {
        let mut cursor = iface.walk();
        iface
            .named_children(&mut cursor)
            .filter(|child| matches!(child.kind(), "method_elem" | "method_spec"))
            .filter_map(|method| {
                let name = self.text(method.child_by_field_name("name")?).to_string();
                let parameters = method
                    .child_by_field_name("parameters")
                    .map(|list| self.parameter_list(list))
                    .unwrap_or_default();
                let results = match method.child_by_field_name("result") {
                    None => Vec::new(),
                    Some(list) if list.kind() == "parameter_list" => self.parameter_list(list),
                    Some(ty) => vec![FieldDecl::unnamed(self.type_expr(ty))],
                };
                Some(MethodDecl {
                    name,
                    parameters,
                    results,
                })
            })
            .collect()
    }

    /// Flattens `a, b int` into one field per name.
    fn parameter_list(&self, list: Node<'_>) -> Vec<FieldDecl> {
        let mut out = Vec::new();
        let mut cursor = list.walk();

        for decl in list.named_children(&mut cursor) {
            let Some(ty) = decl.child_by_field_name("type") else {
                continue;
            };
            match decl.kind() {
                "parameter_declaration" => {
                    let ty = self.type_expr(ty);
                    let mut names_cursor = decl.walk();
                    let names: Vec<&str> = decl
                        .children_by_field_name("name", &mut names_cursor)
                        .map(|n| self.text(n))
                        .collect();
                    if names.is_empty() {
                        out.push(FieldDecl::unnamed(ty));
                    } else {
                        out.extend(names.into_iter().map(|n| FieldDecl::named(n, ty.clone())));
                    }
                }
                "variadic_parameter_declaration" => {
                    let ty = TypeExpr::variadic(self.type_expr(ty));
                    out.push(match decl.child_by_field_name("name") {
                        Some(name) => FieldDecl::named(self.text(name), ty),
                        None => FieldDecl::unnamed(ty),
                    });
                }
                _ => {}
            }
        }
        out
    }

    // ── Type expressions ─────────────────────────────────────────────────────

    fn type_expr(&self, node: Node<'_>) -> TypeExpr {
        let unsupported = || TypeExpr::unsupported(node.kind(), self.text(node));

        match node.kind() {
            "type_identifier" => TypeExpr::ident(self.text(node)),
            "qualified_type" => {
                match (
                    node.child_by_field_name("package"),
                    node.child_by_field_name("name"),
                ) {
                    (Some(pkg), Some(name)) => TypeExpr::qualified(self.text(pkg), self.text(name)),
                    _ => unsupported(),
                }
            }
            "pointer_type" => node
                .named_child(0)
                .map(|inner| TypeExpr::pointer(self.type_expr(inner)))
                .unwrap_or_else(unsupported),
            "slice_type" => node
                .child_by_field_name("element")
                .map(|inner| TypeExpr::slice(self.type_expr(inner)))
                .unwrap_or_else(unsupported),
            "parenthesized_type" => node
                .named_child(0)
                .map(|inner| self.type_expr(inner))
                .unwrap_or_else(unsupported),
            "interface_type" => TypeExpr::Wildcard,
            _ => unsupported(),
        }
    }
}
