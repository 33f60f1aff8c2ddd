//! `strata inspect`: print the contract model extracted from a file.

use strata_adapters::{GoContractParser, LocalFilesystem};
use strata_core::{
    application::ExtractionService,
    domain::{ExtractOptions, InterfaceSpec, MethodSpec, Role, ValueSpec},
};

use crate::{
    cli::{InspectArgs, InspectFormat, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: InspectArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let parser = GoContractParser::new();
    let filesystem = LocalFilesystem::new();
    let options = ExtractOptions::default()
        .with_namespace(config.generate.namespace.clone())
        .with_policy(super::unsupported_policy(args.allow_opaque_types, &config));

    let extraction = ExtractionService::new(&parser, &filesystem).extract(
        &args.contract,
        args.stem.as_deref(),
        &options,
    )?;

    let format = args.format.unwrap_or(match output.format() {
        OutputFormat::Json => InspectFormat::Json,
        _ => InspectFormat::Text,
    });

    match format {
        InspectFormat::Json => {
            let value = serde_json::to_value(&extraction.model).map_err(|e| {
                std::io::Error::other(format!("failed to serialise contract model: {e}"))
            })?;
            output.json(&value)?;
        }
        InspectFormat::Text => {
            let model = &extraction.model;
            output.header(&format!(
                "{} (package {}, stem {})",
                model.entity(),
                model.package,
                model.stem
            ))?;
            for role in Role::ALL {
                output.print("")?;
                for line in describe(model.interface(role), role) {
                    output.print(&line)?;
                }
            }
            for skipped in &extraction.skipped {
                output.warning(&format!(
                    "Ignored interface {} ({:?})",
                    skipped.name, skipped.reason
                ))?;
            }
        }
    }

    Ok(())
}

fn describe(iface: &InterfaceSpec, role: Role) -> Vec<String> {
    let mut lines = vec![format!("{} [{}]", iface.name, role.as_str())];
    if iface.methods.is_empty() {
        lines.push("  (no methods)".into());
    }
    lines.extend(iface.methods.iter().map(|m| format!("  {}", signature(m))));
    lines
}

/// Go-style signature: `Fetch(ctx context.Context) ([]*domain.Example, error)`.
fn signature(method: &MethodSpec) -> String {
    let params = join(&method.parameters);
    match method.results.as_slice() {
        [] => format!("{}({params})", method.name),
        [single] if single.name().is_none() => {
            format!("{}({params}) {}", method.name, single.type_expr)
        }
        results => format!("{}({params}) ({})", method.name, join(results)),
    }
}

fn join(values: &[ValueSpec]) -> String {
    values
        .iter()
        .map(|v| match v.name() {
            Some(name) => format!("{name} {}", v.type_expr),
            None => v.type_expr.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signatures() {
        let fetch = MethodSpec::new("Fetch")
            .with_parameter(ValueSpec::named("ctx", "context.Context"))
            .with_result(ValueSpec::unnamed("[]*domain.Example"))
            .with_result(ValueSpec::unnamed("error"));
        assert_eq!(
            signature(&fetch),
            "Fetch(ctx context.Context) ([]*domain.Example, error)"
        );

        let delete = MethodSpec::new("Delete")
            .with_parameter(ValueSpec::named("id", "int64"))
            .with_result(ValueSpec::unnamed("error"));
        assert_eq!(signature(&delete), "Delete(id int64) error");

        let named = MethodSpec::new("Count").with_result(ValueSpec::named("n", "int"));
        assert_eq!(signature(&named), "Count() (n int)");

        assert_eq!(signature(&MethodSpec::new("Ping")), "Ping()");
    }

    #[test]
    fn empty_interface_is_described() {
        let lines = describe(
            &InterfaceSpec::new("ExampleUsecase", vec![]),
            Role::Usecase,
        );
        assert_eq!(lines, vec!["ExampleUsecase [usecase]", "  (no methods)"]);
    }
}
