//! Command handlers.  Each submodule translates parsed arguments into core
//! requests and renders the result; helpers shared by `new` and `generate`
//! live here.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod inspect;
pub mod list;
pub mod new;

use serde_json::json;
use strata_adapters::{GoContractParser, LocalFilesystem};
use strata_core::{
    application::{ScaffoldReport, ScaffoldService},
    domain::{UnsupportedTypePolicy, Variant},
};

use crate::{
    cli::{LayerArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Scaffold service wired to the real filesystem and Go parser.
pub(crate) fn scaffold_service() -> ScaffoldService {
    ScaffoldService::new(
        Box::new(GoContractParser::new()),
        Box::new(LocalFilesystem::new()),
    )
}

/// Variants to synthesize: flags first, configuration for whatever the
/// flags leave empty.
pub(crate) fn resolve_variants(layers: &LayerArgs, config: &AppConfig) -> CliResult<Vec<Variant>> {
    let backends = if layers.backends.is_empty() {
        config.backends()?
    } else {
        layers.backends.clone()
    };
    let transports = if layers.transports.is_empty() {
        config.transports()?
    } else {
        layers.transports.clone()
    };

    let mut variants: Vec<Variant> = backends.into_iter().map(Variant::Persistence).collect();
    variants.extend(transports.into_iter().map(Variant::Transport));
    if config.generate.usecase && !layers.no_usecase {
        variants.push(Variant::Service);
    }

    if variants.is_empty() {
        return Err(CliError::NothingToGenerate);
    }
    Ok(variants)
}

pub(crate) fn unsupported_policy(allow_opaque: bool, config: &AppConfig) -> UnsupportedTypePolicy {
    if allow_opaque || config.generate.opaque_types {
        UnsupportedTypePolicy::Opaque
    } else {
        UnsupportedTypePolicy::Reject
    }
}

/// Print what a scaffold run wrote (or would write).
pub(crate) fn print_report(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        let files: Vec<_> = report
            .files
            .iter()
            .map(|f| {
                json!({
                    "path": f.path.as_str(),
                    "bytes": f.bytes,
                    "origin": f.origin.map(|v| v.to_string()),
                })
            })
            .collect();
        output.json(&json!({
            "root": report.root.display().to_string(),
            "module": report.module,
            "entity": report.model.entity(),
            "dry_run": report.dry_run,
            "files": files,
        }))?;
        return Ok(());
    }

    for skipped in &report.skipped {
        output.warning(&format!(
            "Ignored interface {} ({:?})",
            skipped.name, skipped.reason
        ))?;
    }

    let verb = if report.dry_run { "Would write" } else { "Wrote" };
    output.header(&format!(
        "{verb} {} file(s) under {}",
        report.files.len(),
        report.root.display()
    ))?;
    for file in &report.files {
        let origin = file
            .origin
            .map(|v| format!("  [{v}]"))
            .unwrap_or_default();
        output.detail(&format!("  {} ({} bytes){origin}", file.path, file.bytes))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::domain::{BackendKind, TransportKind};

    #[test]
    fn config_fills_empty_flags() {
        let variants = resolve_variants(&LayerArgs::default(), &AppConfig::default()).unwrap();
        assert_eq!(
            variants,
            vec![
                Variant::Persistence(BackendKind::Mysql),
                Variant::Transport(TransportKind::Http),
                Variant::Service,
            ]
        );
    }

    #[test]
    fn flags_replace_config() {
        let layers = LayerArgs {
            backends: vec![BackendKind::Mongodb],
            transports: vec![TransportKind::Fiber, TransportKind::Gin],
            no_usecase: true,
        };
        let variants = resolve_variants(&layers, &AppConfig::default()).unwrap();
        assert_eq!(
            variants,
            vec![
                Variant::Persistence(BackendKind::Mongodb),
                Variant::Transport(TransportKind::Fiber),
                Variant::Transport(TransportKind::Gin),
            ]
        );
    }

    #[test]
    fn everything_off_is_an_error() {
        let mut config = AppConfig::default();
        config.generate.backends.clear();
        config.generate.transports.clear();
        let layers = LayerArgs {
            no_usecase: true,
            ..LayerArgs::default()
        };
        assert!(matches!(
            resolve_variants(&layers, &config),
            Err(CliError::NothingToGenerate)
        ));
    }

    #[test]
    fn opaque_types_from_flag_or_config() {
        let mut config = AppConfig::default();
        assert_eq!(unsupported_policy(false, &config), UnsupportedTypePolicy::Reject);
        assert_eq!(unsupported_policy(true, &config), UnsupportedTypePolicy::Opaque);
        config.generate.opaque_types = true;
        assert_eq!(unsupported_policy(false, &config), UnsupportedTypePolicy::Opaque);
    }
}
