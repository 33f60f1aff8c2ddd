//! Type expression normalizer.
//!
//! Converts a [`TypeExpr`] into the canonical string form stored in
//! [`ValueSpec::type_expr`](crate::domain::ValueSpec):
//!
//! | node                | result                          |
//! |---------------------|---------------------------------|
//! | `*T`                | `"*" + normalize(T)`            |
//! | `[]T`               | `"[]" + normalize(T)`           |
//! | `...T`              | `"..." + normalize(T)`          |
//! | `pkg.Name`          | `"pkg.Name"` verbatim           |
//! | `Name` (exported)   | `"domain.Name"`                 |
//! | `name` (otherwise)  | `"name"`                        |
//! | inline interface    | `"interface{}"`                 |
//! | unsupported         | `""` ([`UNSUPPORTED_MARKER`])   |
//!
//! An unsupported node anywhere in the tree makes the whole expression
//! unsupported. In opaque mode its source text is kept instead, with
//! exported bare identifiers qualified the same way; text that declares
//! exported names of its own (struct fields, named func parameters) stays
//! unsupported because it cannot be qualified reliably.

use crate::domain::{naming, syntax::TypeExpr};

/// Namespace token for types declared in the contract package.
pub const DEFAULT_NAMESPACE: &str = "domain";

/// Canonical token for the untyped-value wildcard.
pub const WILDCARD_TOKEN: &str = "interface{}";

/// Result of normalizing a type the normalizer cannot express.
pub const UNSUPPORTED_MARKER: &str = "";

/// Inputs that shape normalization beyond the expression itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeContext<'a> {
    /// Qualifier prepended to exported bare identifiers.
    pub namespace: &'a str,
    /// Stem of the interface the expression belongs to.
    pub stem: &'a str,
}

impl<'a> NormalizeContext<'a> {
    pub const fn new(namespace: &'a str, stem: &'a str) -> Self {
        Self { namespace, stem }
    }
}

/// Normalize `expr`; returns [`UNSUPPORTED_MARKER`] for unsupported types.
///
/// Callers must check for the marker: an empty type cannot be emitted.
pub fn normalize(expr: &TypeExpr, ctx: &NormalizeContext<'_>) -> String {
    render(expr, ctx, false).unwrap_or_default()
}

/// Like [`normalize`], but unsupported nodes are kept as their verbatim
/// source text instead of collapsing the expression to the marker.
pub fn normalize_opaque(expr: &TypeExpr, ctx: &NormalizeContext<'_>) -> String {
    render(expr, ctx, true).unwrap_or_default()
}

fn render(expr: &TypeExpr, ctx: &NormalizeContext<'_>, opaque: bool) -> Option<String> {
    let out = match expr {
        TypeExpr::Pointer(inner) => format!("*{}", render(inner, ctx, opaque)?),
        TypeExpr::Slice(inner) => format!("[]{}", render(inner, ctx, opaque)?),
        TypeExpr::Variadic(inner) => format!("...{}", render(inner, ctx, opaque)?),
        TypeExpr::Qualified { package, name } => format!("{package}.{name}"),
        TypeExpr::Ident(name) if naming::is_exported(name) => {
            format!("{}.{name}", ctx.namespace)
        }
        TypeExpr::Ident(name) => name.clone(),
        TypeExpr::Wildcard => WILDCARD_TOKEN.to_string(),
        TypeExpr::Unsupported { text, .. } if opaque => qualify_opaque(text, ctx.namespace)?,
        TypeExpr::Unsupported { .. } => return None,
    };
    Some(out)
}

/// Qualify exported bare identifiers in verbatim type text:
/// `map[int64]*Example` becomes `map[int64]*domain.Example`.
///
/// Selectors (`time.Time`) and quoted tags are left alone. `None` when an
/// exported identifier names a field or parameter (`struct{ ID int64 }`).
fn qualify_opaque(text: &str, namespace: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + namespace.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '"' || c == '`' {
            let end = chars[i + 1..]
                .iter()
                .position(|&q| q == c)
                .map_or(chars.len(), |p| i + 2 + p);
            out.extend(&chars[i..end]);
            i = end;
            continue;
        }
        if !(c.is_alphabetic() || c == '_') {
            out.push(c);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
            i += 1;
        }
        let ident: String = chars[start..i].iter().collect();
        let selector = out.trim_end().ends_with('.');
        if selector || !naming::is_exported(&ident) {
            out.push_str(&ident);
            continue;
        }

        let mut next = i;
        while next < chars.len() && chars[next].is_whitespace() {
            next += 1;
        }
        let declares_name = next > i
            && chars
                .get(next)
                .is_some_and(|&n| n.is_alphabetic() || n == '_' || matches!(n, '*' | '[' | '('));
        if declares_name {
            return None;
        }
        out.push_str(namespace);
        out.push('.');
        out.push_str(&ident);
    }
    Some(out)
}
