//! Go source emission helpers shared by every layer renderer.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::contract::{ContractModel, ImportSpec, InterfaceSpec, MethodSpec, ValueSpec};
use crate::domain::zero_value;

/// Import paths of one file, rendered as a standard-library group followed
/// by a third-party group, each sorted by path.
#[derive(Debug, Default, Clone)]
pub(crate) struct ImportSet {
    // path -> alias
    entries: BTreeMap<String, Option<String>>,
}

impl ImportSet {
    pub fn add(&mut self, path: impl Into<String>) {
        self.entries.entry(path.into()).or_insert(None);
    }

    pub fn add_spec(&mut self, spec: &ImportSpec) {
        let implied = ImportSpec::new(spec.path.clone());
        let alias = spec
            .alias
            .clone()
            .filter(|a| a != "_" && a != "." && implied.qualifier() != Some(a.as_str()));
        let slot = self.entries.entry(spec.path.clone()).or_insert(None);
        if slot.is_none() {
            *slot = alias;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render(&self) -> String {
        let (std, third): (Vec<_>, Vec<_>) = self
            .entries
            .iter()
            .partition(|(path, _)| is_std_path(path));

        let line = |(path, alias): &(&String, &Option<String>)| match alias {
            Some(alias) => format!("\t{alias} \"{path}\"\n"),
            None => format!("\t\"{path}\"\n"),
        };

        let mut out = String::from("import (\n");
        out.extend(std.iter().map(line));
        if !std.is_empty() && !third.is_empty() {
            out.push('\n');
        }
        out.extend(third.iter().map(line));
        out.push(')');
        out
    }
}

/// Standard-library paths have no dot in their first segment.
pub(crate) fn is_std_path(path: &str) -> bool {
    !path.split('/').next().unwrap_or_default().contains('.')
}

/// Package qualifiers referenced by a normalized type expression.
///
/// `[]*domain.Example` → `domain`; `map[string]sql.NullString` → `sql`.
pub(crate) fn qualifiers(type_expr: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = None;

    for (i, c) in type_expr.char_indices() {
        if c.is_alphanumeric() || c == '_' {
            start.get_or_insert(i);
            continue;
        }
        if let Some(s) = start.take() {
            if c == '.' {
                out.push(&type_expr[s..i]);
            }
        }
    }
    out
}

/// Imports required by the signatures of `iface`, resolved against the
/// contract's own import list. The local namespace is skipped; callers add
/// the domain import themselves.
pub(crate) fn signature_imports(
    model: &ContractModel,
    iface: &InterfaceSpec,
    namespace: &str,
) -> Vec<ImportSpec> {
    let used: BTreeSet<&str> = iface
        .methods
        .iter()
        .flat_map(MethodSpec::values)
        .flat_map(|v| qualifiers(&v.type_expr))
        .filter(|q| *q != namespace)
        .collect();

    used.into_iter()
        .map(|q| model.import_for(q).cloned().unwrap_or_else(|| ImportSpec::new(q)))
        .collect()
}

/// One Go source file under construction.
#[derive(Debug)]
pub(crate) struct GoFile {
    package: String,
    imports: ImportSet,
    decls: Vec<String>,
}

impl GoFile {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            imports: ImportSet::default(),
            decls: Vec::new(),
        }
    }

    pub fn imports_mut(&mut self) -> &mut ImportSet {
        &mut self.imports
    }

    pub fn decl(&mut self, text: String) {
        self.decls.push(text);
    }

    pub fn finish(self) -> String {
        let mut out = format!("package {}\n", self.package);
        if !self.imports.is_empty() {
            out.push('\n');
            out.push_str(&self.imports.render());
            out.push('\n');
        }
        for decl in &self.decls {
            out.push('\n');
            out.push_str(decl);
            out.push('\n');
        }
        out
    }
}

// ── Signatures ───────────────────────────────────────────────────────────────

/// Render a value list as Go declares it: all names or none. When a list
/// mixes named and unnamed values, unnamed ones get `<fallback><index>`.
fn value_list(values: &[ValueSpec], fallback: &str) -> Vec<String> {
    let any_named = values.iter().any(|v| v.name().is_some());
    values
        .iter()
        .enumerate()
        .map(|(i, v)| match (v.name(), any_named) {
            (Some(name), _) => format!("{name} {}", v.type_expr),
            (None, true) => format!("{fallback}{i} {}", v.type_expr),
            (None, false) => v.type_expr.clone(),
        })
        .collect()
}

/// `(ctx context.Context, id int64)`
pub(crate) fn param_list(params: &[ValueSpec]) -> String {
    format!("({})", value_list(params, "arg").join(", "))
}

/// Result clause including its leading space: `""`, `" error"`,
/// `" ([]*domain.Example, error)"`.
pub(crate) fn result_clause(results: &[ValueSpec]) -> String {
    match results {
        [] => String::new(),
        [single] if single.name().is_none() => format!(" {}", single.type_expr),
        _ => format!(" ({})", value_list(results, "ret").join(", ")),
    }
}

/// A stub method returning one zero value per declared result.
pub(crate) fn method_stub(
    receiver: &str,
    struct_name: &str,
    method: &MethodSpec,
    namespace: &str,
) -> String {
    let mut out = format!(
        "func ({receiver} *{struct_name}) {}{}{} {{\n",
        method.name,
        param_list(&method.parameters),
        result_clause(&method.results),
    );
    if !method.results.is_empty() {
        let zeros: Vec<String> = method
            .results
            .iter()
            .map(|r| zero_value::zero_value_in(&r.type_expr, namespace))
            .collect();
        out.push_str(&format!("\treturn {}\n", zeros.join(", ")));
    }
    out.push('}');
    out
}

/// A receiver name that shadows no parameter or result of any method.
pub(crate) fn pick_receiver(preferred: &str, methods: &[MethodSpec]) -> String {
    let taken: BTreeSet<&str> = methods
        .iter()
        .flat_map(MethodSpec::values)
        .filter_map(ValueSpec::name)
        .collect();

    [preferred, "r", "recv"]
        .into_iter()
        .map(str::to_string)
        .chain((1..).map(|n| format!("recv{n}")))
        .find(|name| !taken.contains(name.as_str()))
        .unwrap_or_else(|| preferred.to_string())
}
