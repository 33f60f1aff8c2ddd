//! Zero-value resolver: the literal a stub returns for each result type.
//!
//! The resolver is total. Every string, including the empty unsupported
//! marker, maps to a non-empty literal; anything unrecognised falls through
//! to [`NIL`].

use crate::domain::normalize::DEFAULT_NAMESPACE;

/// Null sentinel for pointers, slices, interfaces, external types and
/// anything unknown.
pub const NIL: &str = "nil";

/// Category a normalized type expression falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroCategory {
    Integer,
    Float,
    Complex,
    Bool,
    String,
    /// A struct-like type from the contract namespace (`domain.Example`,
    /// `domain.Page[domain.Example]`).
    LocalComposite,
    /// Array and struct literal types (`[2]domain.Example`, `struct{}`).
    Composite,
    Nil,
}

const INTEGER_KEYWORDS: &[&str] = &[
    "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64",
    "uintptr", "byte", "rune",
];

pub fn categorize(type_expr: &str, namespace: &str) -> ZeroCategory {
    match type_expr {
        t if INTEGER_KEYWORDS.contains(&t) => ZeroCategory::Integer,
        "float32" | "float64" => ZeroCategory::Float,
        "complex64" | "complex128" => ZeroCategory::Complex,
        "bool" => ZeroCategory::Bool,
        "string" => ZeroCategory::String,
        t if is_local_composite(t, namespace) => ZeroCategory::LocalComposite,
        t if is_array(t) || is_struct_literal(t) => ZeroCategory::Composite,
        _ => ZeroCategory::Nil,
    }
}

fn is_local_composite(type_expr: &str, namespace: &str) -> bool {
    let Some(name) = type_expr
        .strip_prefix(namespace)
        .and_then(|rest| rest.strip_prefix('.'))
    else {
        return false;
    };
    // Generic instantiation: `Page[domain.Example]`.
    let base = match name.split_once('[') {
        Some((base, _)) if name.ends_with(']') => base,
        Some(_) => return false,
        None => name,
    };
    !base.is_empty() && base.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// `[N]T`, not a slice.
fn is_array(type_expr: &str) -> bool {
    type_expr.starts_with('[') && !type_expr.starts_with("[]")
}

fn is_struct_literal(type_expr: &str) -> bool {
    type_expr
        .strip_prefix("struct")
        .is_some_and(|rest| rest.trim_start().starts_with('{'))
}

/// Zero value for `type_expr` in the default `domain` namespace.
pub fn zero_value_for(type_expr: &str) -> String {
    zero_value_in(type_expr, DEFAULT_NAMESPACE)
}

pub fn zero_value_in(type_expr: &str, namespace: &str) -> String {
    match categorize(type_expr, namespace) {
        ZeroCategory::Integer => "0".into(),
        ZeroCategory::Float => "0.0".into(),
        ZeroCategory::Complex => "0i".into(),
        ZeroCategory::Bool => "false".into(),
        ZeroCategory::String => "\"\"".into(),
        ZeroCategory::LocalComposite | ZeroCategory::Composite => format!("{type_expr}{{}}"),
        ZeroCategory::Nil => NIL.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_families() {
        for t in INTEGER_KEYWORDS {
            assert_eq!(zero_value_for(t), "0", "{t}");
        }
        assert_eq!(zero_value_for("float64"), "0.0");
        assert_eq!(zero_value_for("complex128"), "0i");
    }

    #[test]
    fn scalars() {
        assert_eq!(zero_value_for("bool"), "false");
        assert_eq!(zero_value_for("string"), "\"\"");
    }

    #[test]
    fn local_struct_gets_composite_literal() {
        assert_eq!(zero_value_for("domain.Example"), "domain.Example{}");
        assert_eq!(zero_value_in("model.User", "model"), "model.User{}");
        // A different namespace is external.
        assert_eq!(zero_value_in("domain.Example", "model"), NIL);
    }

    #[test]
    fn arrays_and_struct_types_get_composite_literals() {
        assert_eq!(zero_value_for("[2]domain.Example"), "[2]domain.Example{}");
        assert_eq!(zero_value_for("[16]byte"), "[16]byte{}");
        assert_eq!(zero_value_for("struct{}"), "struct{}{}");
        assert_eq!(zero_value_for("struct{ id int64 }"), "struct{ id int64 }{}");
        assert_eq!(
            zero_value_for("domain.Page[domain.Example]"),
            "domain.Page[domain.Example]{}"
        );
    }

    #[test]
    fn references_and_externals_are_nil() {
        for t in [
            "*domain.Example",
            "[]*domain.Example",
            "[]byte",
            "error",
            "context.Context",
            "time.Time",
            "interface{}",
            "any",
            "domainx.Example",
            "domain.",
            "map[int64]*domain.Example",
            "chan int",
            "func() error",
            "domain.Page[x",
        ] {
            assert_eq!(zero_value_for(t), NIL, "{t}");
        }
    }

    #[test]
    fn unsupported_marker_maps_to_nil() {
        assert_eq!(zero_value_for(""), NIL);
        assert_eq!(categorize("", DEFAULT_NAMESPACE), ZeroCategory::Nil);
    }

    #[test]
    fn resolver_never_returns_empty() {
        for t in ["", "int", "???", "map[string]int", "domain.X", "chan int"] {
            assert!(!zero_value_for(t).is_empty());
        }
    }
}
