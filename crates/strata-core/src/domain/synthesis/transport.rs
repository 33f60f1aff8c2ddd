use std::collections::BTreeSet;

use crate::domain::{
    contract::{ContractModel, MethodSpec, Role},
    naming,
    variants::TransportKind,
};

use super::{SynthesisOptions, go::GoFile};

/// Route path for one method: `/<entity>/<method>`, both kebab-cased.
pub(super) fn route_path(entity: &str, method: &str) -> String {
    format!(
        "/{}/{}",
        naming::kebab_case(entity),
        naming::kebab_case(method)
    )
}

pub(super) fn render(
    model: &ContractModel,
    role: Role,
    kind: TransportKind,
    options: &SynthesisOptions,
) -> String {
    let transport = kind.descriptor();
    let iface = model.interface(role);
    let entity = iface.entity(role);
    let ns = &options.namespace;

    let handler = format!("{entity}Handler");
    let field = pick_field(&role.suffix().to_lowercase(), &iface.methods);
    let param = match role {
        Role::Usecase => "us",
        Role::Repository => "repo",
    };

    let mut file = GoFile::new(transport.package);
    let imports = file.imports_mut();
    for path in transport.imports {
        imports.add(*path);
    }
    imports.add(options.domain_import());

    file.decl(format!(
        "// {handler} serves {ns}.{iface} over {name}.\n\
         type {handler} struct {{\n\
         \t{field} {ns}.{iface}\n\
         }}",
        iface = iface.name,
        name = transport.display_name,
    ));

    let mut ctor = format!(
        "// New{handler} registers one route per {ns}.{iface} method.\n\
         func New{handler}({router}, {param} {ns}.{iface}) {{\n\
         \thandler := &{handler}{{{field}: {param}}}\n",
        iface = iface.name,
        router = transport.router_param,
    );
    if iface.methods.is_empty() {
        ctor.push_str("\t_ = handler\n");
    }
    for method in &iface.methods {
        let line = transport
            .register
            .replace("{path}", &route_path(entity, &method.name))
            .replace("{method}", &method.name);
        ctor.push_str(&format!("\t{line}\n"));
    }
    ctor.push('}');
    file.decl(ctor);

    for method in &iface.methods {
        let mut out = format!(
            "func (h *{handler}) {}{} {{\n",
            method.name, transport.handler_signature
        );
        for line in transport.respond {
            out.push_str(&format!("\t{}\n", line.replace("{method}", &method.name)));
        }
        out.push('}');
        file.decl(out);
    }

    file.finish()
}

/// A struct field name that is not also one of the handler's method names.
fn pick_field(preferred: &str, methods: &[MethodSpec]) -> String {
    let taken: BTreeSet<&str> = methods.iter().map(|m| m.name.as_str()).collect();

    std::iter::once(preferred.to_string())
        .chain((1..).map(|n| format!("{preferred}{n}")))
        .find(|name| !taken.contains(name.as_str()))
        .unwrap_or_else(|| preferred.to_string())
}
