use crate::domain::{
    contract::{ContractModel, Role},
    naming,
    variants::BackendKind,
};

use super::{
    SynthesisOptions,
    go::{self, GoFile},
};

pub(super) fn render(
    model: &ContractModel,
    role: Role,
    kind: BackendKind,
    options: &SynthesisOptions,
) -> String {
    let backend = kind.descriptor();
    let iface = model.interface(role);
    let ns = &options.namespace;

    let struct_name = format!("{}{}", backend.struct_prefix, iface.name);
    let constructor = format!("New{}{}", backend.constructor_prefix, iface.name);
    let preferred = naming::lower_first(backend.struct_prefix)
        .chars()
        .next()
        .map(String::from)
        .unwrap_or_else(|| "r".into());
    let receiver = go::pick_receiver(&preferred, &iface.methods);

    let mut file = GoFile::new(backend.package);
    let imports = file.imports_mut();
    imports.add(backend.client_import);
    imports.add(options.domain_import());
    for spec in go::signature_imports(model, iface, ns) {
        imports.add_spec(&spec);
    }

    file.decl(format!(
        "type {struct_name} struct {{\n\t{} {}\n}}",
        backend.field, backend.client_type
    ));
    file.decl(format!(
        "// {constructor} returns a {ns}.{iface} backed by {db}.\n\
         func {constructor}({param} {client}) {ns}.{iface} {{\n\
         \treturn &{struct_name}{{{field}: {param}}}\n\
         }}",
        iface = iface.name,
        db = backend.display_name,
        param = backend.param,
        client = backend.client_type,
        field = backend.field,
    ));
    for method in &iface.methods {
        file.decl(go::method_stub(&receiver, &struct_name, method, ns));
    }

    file.finish()
}
