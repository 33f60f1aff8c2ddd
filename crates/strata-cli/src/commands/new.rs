//! Implementation of the `strata new` command.
//!
//! Responsibility: translate CLI arguments into a `ScaffoldRequest` with the
//! built-in seed contract, call the core scaffold service, and display
//! results. No business logic lives here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use strata_adapters::{go_mod, seed_contract};
use strata_core::application::{ContractSource, ScaffoldRequest};

use crate::{
    cli::{NewArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `strata new` command.
///
/// 1. Parse and validate the project name / output path
/// 2. Resolve module path and layers (flags, then config)
/// 3. Scaffold from the seed contract via `ScaffoldService`
/// 4. Print the report and next steps
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // 1. Resolve project path
    let (project_name, project_path) = resolve_project_path(&args.name)?;
    validate_project_name(&project_name)?;

    // 2. Module and layers
    let module = args.module.clone().unwrap_or_else(|| project_name.clone());
    let variants = super::resolve_variants(&args.layers, &config)?;
    let namespace = config.generate.namespace.clone();
    let (stem, source) = seed_contract(&args.entity, &namespace);

    debug!(
        %module,
        %stem,
        variants = variants.len(),
        "New project resolved"
    );

    let mut request = ScaffoldRequest::new(&project_path, ContractSource::Seed { stem, source })
        .module(module.clone())
        .seed_file("go.mod", go_mod(&module))
        .variants(variants)
        .dry_run(args.dry_run)
        .overwrite(args.force);
    request.namespace = namespace;

    // 3. Scaffold
    if !args.dry_run {
        output.header(&format!("Creating '{project_name}'..."))?;
    }
    info!(project = %project_name, path = %project_path.display(), "Scaffold started");

    let report = super::scaffold_service().scaffold(request)?;

    // 4. Report
    super::print_report(&report, &output)?;
    if report.dry_run || output.format() == OutputFormat::Json {
        return Ok(());
    }

    output.success(&format!("Project '{project_name}' created!"))?;
    if !output.is_quiet() {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", project_path.display()))?;
        output.print("  go mod tidy")?;
        output.print("  go build ./...")?;
    }

    Ok(())
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// Split `name` into the project name (last component) and the full path of
/// the project directory.
pub fn resolve_project_path(name: &str) -> CliResult<(String, PathBuf)> {
    let path = Path::new(name);

    let project_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidProjectName {
            name: name.into(),
            reason: "cannot extract valid project name".into(),
        })?
        .to_string();

    Ok((project_name, path.to_path_buf()))
}

fn validate_project_name(name: &str) -> CliResult<()> {
    let invalid = |reason: &str| CliError::InvalidProjectName {
        name: name.into(),
        reason: reason.into(),
    };

    if name.is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.starts_with('.') {
        return Err(invalid("name cannot start with '.'"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("name cannot contain path separators"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(invalid("name cannot contain whitespace"));
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name_resolves_to_relative_dir() {
        let (name, dir) = resolve_project_path("shop").unwrap();
        assert_eq!(name, "shop");
        assert_eq!(dir, PathBuf::from("shop"));
    }

    #[test]
    fn nested_path_keeps_full_path() {
        let sep = std::path::MAIN_SEPARATOR;
        let path = format!("services{sep}billing");

        let (name, dir) = resolve_project_path(&path).unwrap();
        assert_eq!(name, "billing");
        assert_eq!(dir, PathBuf::from("services").join("billing"));
    }

    #[test]
    fn parent_only_path_is_rejected() {
        assert!(resolve_project_path("..").is_err());
    }

    #[test]
    fn invalid_names() {
        for name in ["", ".hidden", "a/b", "a\\b", "my shop"] {
            assert!(
                matches!(
                    validate_project_name(name),
                    Err(CliError::InvalidProjectName { .. })
                ),
                "accepted: {name:?}"
            );
        }
    }

    #[test]
    fn valid_names_pass() {
        for name in ["shop", "order-service", "billing_api", "Api2"] {
            assert!(validate_project_name(name).is_ok(), "failed for: {name}");
        }
    }
}
