//! Implementation of the `strata generate` command.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use strata_adapters::find_contracts;
use strata_core::application::{ContractSource, ScaffoldRequest};

use crate::{
    cli::{GenerateArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute `strata generate`: one scaffold run per contract file.
#[instrument(skip_all, fields(contract = %args.contract.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let contracts = collect_contracts(&args.contract)?;
    if contracts.len() > 1 && args.stem.is_some() {
        return Err(CliError::InvalidInput {
            message: "--stem applies to a single contract file, not a directory".into(),
            source: None,
        });
    }

    let variants = super::resolve_variants(&args.layers, &config)?;
    let module = args.module.clone().or_else(|| config.generate.module.clone());
    let policy = super::unsupported_policy(args.allow_opaque_types, &config);
    let service = super::scaffold_service();

    for contract in contracts {
        let root = match &args.root {
            Some(root) => root.clone(),
            None => infer_root(&contract),
        };
        debug!(contract = %contract.display(), root = %root.display(), "Generating");

        let mut request = ScaffoldRequest::new(
            root,
            ContractSource::Existing {
                path: contract.clone(),
                stem: args.stem.clone(),
            },
        )
        .variants(variants.iter().copied())
        .dry_run(args.dry_run)
        .overwrite(args.force);
        request.module = module.clone();
        request.namespace = config.generate.namespace.clone();
        request.unsupported = policy;

        match service.scaffold(request) {
            Ok(report) => {
                super::print_report(&report, &output)?;
                if !report.dry_run && output.format() != OutputFormat::Json {
                    output.success(&format!(
                        "Generated {} layer(s) for {}",
                        report.files.len(),
                        report.model.entity()
                    ))?;
                }
            }
            Err(e) => {
                output.error(&format!("{}: {e}", contract.display()))?;
                return Err(e.into());
            }
        }
    }

    Ok(())
}

/// The contract itself, or every contract file directly inside a directory.
fn collect_contracts(path: &Path) -> CliResult<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let found = find_contracts(path, "go")?;
    if found.is_empty() {
        return Err(CliError::NoContracts {
            path: path.to_path_buf(),
        });
    }
    Ok(found)
}

/// Contracts live in `<root>/<namespace>/<stem>.go`, so the root is two
/// levels up from the file.
fn infer_root(contract: &Path) -> PathBuf {
    contract
        .parent()
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
