//! Language-agnostic declaration tree produced by a `ContractParser`.
//!
//! Parsers lower their concrete syntax tree into these types; the extractor
//! only ever walks this tree, so type-node dispatch is an exhaustive `match`
//! over [`TypeExpr`] instead of a runtime switch over parser node kinds.

use crate::domain::contract::ImportSpec;

/// A parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `*T`
    Pointer(Box<TypeExpr>),
    /// `[]T`
    Slice(Box<TypeExpr>),
    /// `pkg.Name`
    Qualified { package: String, name: String },
    /// A bare identifier: builtins, unexported and exported local types.
    Ident(String),
    /// An inline interface type (`interface{}` and friends).
    Wildcard,
    /// `...T` in the last parameter position.
    Variadic(Box<TypeExpr>),
    /// Anything else (maps, channels, funcs, arrays, generics, structs).
    /// `kind` is the parser's node kind, `text` the verbatim source.
    Unsupported { kind: String, text: String },
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn pointer(inner: TypeExpr) -> Self {
        Self::Pointer(Box::new(inner))
    }

    pub fn slice(inner: TypeExpr) -> Self {
        Self::Slice(Box::new(inner))
    }

    pub fn variadic(inner: TypeExpr) -> Self {
        Self::Variadic(Box::new(inner))
    }

    pub fn unsupported(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Unsupported {
            kind: kind.into(),
            text: text.into(),
        }
    }

    /// `false` if this node or any nested node is [`TypeExpr::Unsupported`].
    pub fn is_supported(&self) -> bool {
        match self {
            Self::Pointer(inner) | Self::Slice(inner) | Self::Variadic(inner) => {
                inner.is_supported()
            }
            Self::Unsupported { .. } => false,
            Self::Qualified { .. } | Self::Ident(_) | Self::Wildcard => true,
        }
    }

    /// Reconstruct the expression as it was written, without normalization.
    pub fn source_text(&self) -> String {
        match self {
            Self::Pointer(inner) => format!("*{}", inner.source_text()),
            Self::Slice(inner) => format!("[]{}", inner.source_text()),
            Self::Variadic(inner) => format!("...{}", inner.source_text()),
            Self::Qualified { package, name } => format!("{package}.{name}"),
            Self::Ident(name) => name.clone(),
            Self::Wildcard => "interface{}".to_string(),
            Self::Unsupported { text, .. } => text.clone(),
        }
    }
}

/// A parameter or result declaration. Grouped declarations (`a, b int`) are
/// flattened by the parser into one `FieldDecl` per name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: Option<String>,
    pub ty: TypeExpr,
}

impl FieldDecl {
    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn unnamed(ty: TypeExpr) -> Self {
        Self { name: None, ty }
    }
}

/// A method element of an interface type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    pub parameters: Vec<FieldDecl>,
    pub results: Vec<FieldDecl>,
}

/// The underlying type of a top-level type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeBody {
    Interface(Vec<MethodDecl>),
    /// Structs, aliases, named scalars: irrelevant to extraction.
    Other,
}

/// A top-level `type Name ...` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub body: TypeBody,
}

impl TypeDecl {
    pub fn interface(name: impl Into<String>, methods: Vec<MethodDecl>) -> Self {
        Self {
            name: name.into(),
            body: TypeBody::Interface(methods),
        }
    }

    pub fn other(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: TypeBody::Other,
        }
    }
}

/// One parsed contract source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceFile {
    pub package: String,
    pub imports: Vec<ImportSpec>,
    /// Top-level type declarations in source order.
    pub declarations: Vec<TypeDecl>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_text_round_trips_nested_prefixes() {
        let ty = TypeExpr::slice(TypeExpr::pointer(TypeExpr::ident("Example")));
        assert_eq!(ty.source_text(), "[]*Example");
    }

    #[test]
    fn nested_unsupported_is_detected() {
        let ty = TypeExpr::pointer(TypeExpr::unsupported("map_type", "map[string]int"));
        assert!(!ty.is_supported());
        assert_eq!(ty.source_text(), "*map[string]int");
        assert!(TypeExpr::qualified("time", "Time").is_supported());
    }
}
