//! Implementation of the `strata list` command.

use serde_json::json;
use strata_core::domain::{BACKEND_REGISTRY, TRANSPORT_REGISTRY};

use crate::{
    cli::{ListArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    match args.format {
        ListFormat::Table => {
            output.header("Persistence backends:")?;
            for d in BACKEND_REGISTRY {
                output.print(&format!(
                    "  {:<10} {:<12} {}",
                    d.package, d.display_name, d.client_type
                ))?;
                if !d.aliases.is_empty() {
                    output.detail(&format!("  {:<10} aliases: {}", "", d.aliases.join(", ")))?;
                }
            }
            output.print("")?;
            output.header("Transports:")?;
            for d in TRANSPORT_REGISTRY {
                output.print(&format!("  {:<10} {}", d.package, d.display_name))?;
                if !d.aliases.is_empty() {
                    output.detail(&format!("  {:<10} aliases: {}", "", d.aliases.join(", ")))?;
                }
            }
        }

        ListFormat::List => {
            for d in BACKEND_REGISTRY {
                output.print(&format!("repository/{}", d.package))?;
            }
            for d in TRANSPORT_REGISTRY {
                output.print(&format!("delivery/{}", d.package))?;
            }
        }

        // JSON goes out even in quiet mode so scripts can rely on it.
        ListFormat::Json => {
            let backends: Vec<_> = BACKEND_REGISTRY
                .iter()
                .map(|d| {
                    json!({
                        "kind": d.kind,
                        "name": d.display_name,
                        "aliases": d.aliases,
                        "client_import": d.client_import,
                        "client_type": d.client_type,
                    })
                })
                .collect();
            let transports: Vec<_> = TRANSPORT_REGISTRY
                .iter()
                .map(|d| {
                    json!({
                        "kind": d.kind,
                        "name": d.display_name,
                        "aliases": d.aliases,
                        "imports": d.imports,
                    })
                })
                .collect();
            output.json(&json!({ "backends": backends, "transports": transports }))?;
        }
    }

    Ok(())
}
