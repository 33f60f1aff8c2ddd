use crate::domain::{
    contract::{ContractModel, Role},
    naming,
};

use super::{
    SynthesisOptions,
    go::{self, GoFile},
};

/// The usecase implementation: holds the repository, stubs every usecase
/// method.
pub(super) fn render(model: &ContractModel, options: &SynthesisOptions) -> String {
    let usecase = &model.usecase;
    let repository = &model.repository;
    let entity = usecase.entity(Role::Usecase);
    let ns = &options.namespace;

    let struct_name = naming::lower_first(&usecase.name);
    let field = format!("{}Repo", naming::lower_first(entity));
    let receiver = go::pick_receiver("u", &usecase.methods);

    let mut file = GoFile::new("usecase");
    let imports = file.imports_mut();
    imports.add(options.domain_import());
    for spec in go::signature_imports(model, usecase, ns) {
        imports.add_spec(&spec);
    }

    file.decl(format!(
        "type {struct_name} struct {{\n\t{field} {ns}.{repo}\n}}",
        repo = repository.name,
    ));
    file.decl(format!(
        "// New{uc} returns a {ns}.{uc} that stores through repo.\n\
         func New{uc}(repo {ns}.{repo}) {ns}.{uc} {{\n\
         \treturn &{struct_name}{{{field}: repo}}\n\
         }}",
        uc = usecase.name,
        repo = repository.name,
    ));
    for method in &usecase.methods {
        file.decl(go::method_stub(&receiver, &struct_name, method, ns));
    }

    file.finish()
}
