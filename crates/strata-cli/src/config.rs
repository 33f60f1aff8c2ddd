//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `STRATA__<SECTION>__<KEY>`, e.g.
//!    `STRATA__GENERATE__BACKENDS=mysql,mongodb`
//! 3. Config file (`--config`, else `strata.toml` in the working directory,
//!    else the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use strata_core::domain::{BackendKind, DEFAULT_NAMESPACE, TransportKind};

use crate::error::{CliError, CliResult};

/// File name of a project-local configuration.
pub const LOCAL_CONFIG_FILE: &str = "strata.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for `new` and `generate`.
    pub generate: GenerateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Module path used by `generate` when `go.mod` is absent.
    pub module: Option<String>,
    /// Directory and package of the contract.
    pub namespace: String,
    pub backends: Vec<String>,
    pub transports: Vec<String>,
    /// Generate the usecase implementation.
    pub usecase: bool,
    /// Keep unsupported types verbatim instead of failing.
    pub opaque_types: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            module: None,
            namespace: DEFAULT_NAMESPACE.into(),
            backends: vec![BackendKind::Mysql.as_str().into()],
            transports: vec![TransportKind::Http.as_str().into()],
            usecase: true,
            opaque_types: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// `config_file` is the path passed via `--config`; it must exist.  The
    /// implicit locations are optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::active_path(), false),
        };

        Self::builder(&path, required)?
            .add_source(
                Environment::with_prefix("STRATA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("generate.backends")
                    .with_list_parse_key("generate.transports"),
            )
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .with_context(|| format!("invalid configuration (file: {})", path.display()))
    }

    fn builder(
        path: &Path,
        required: bool,
    ) -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = Config::try_from(&Self::default())
            .context("failed to serialise built-in defaults")?;
        Ok(Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required)))
    }

    /// Path to the platform configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `strata.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "strata", "strata")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file `load(None)` reads: a local `strata.toml` wins over the
    /// platform file.
    pub fn active_path() -> PathBuf {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() { local } else { Self::config_path() }
    }

    /// Configured backends, parsed.
    pub fn backends(&self) -> CliResult<Vec<BackendKind>> {
        self.generate
            .backends
            .iter()
            .map(|s| s.parse().map_err(|e| config_value_error("generate.backends", e)))
            .collect()
    }

    /// Configured transports, parsed.
    pub fn transports(&self) -> CliResult<Vec<TransportKind>> {
        self.generate
            .transports
            .iter()
            .map(|s| s.parse().map_err(|e| config_value_error("generate.transports", e)))
            .collect()
    }
}

fn config_value_error(key: &str, e: strata_core::domain::DomainError) -> CliError {
    CliError::ConfigError {
        message: format!("{key}: {e}"),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.generate.namespace, "domain");
        assert_eq!(cfg.backends().unwrap(), vec![BackendKind::Mysql]);
        assert_eq!(cfg.transports().unwrap(), vec![TransportKind::Http]);
        assert!(cfg.generate.usecase);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[generate]\nbackends = [\"pg\", \"mongo\"]\nmodule = \"example.com/shop\"\n"
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(
            cfg.backends().unwrap(),
            vec![BackendKind::Postgres, BackendKind::Mongodb]
        );
        assert_eq!(cfg.generate.module.as_deref(), Some("example.com/shop"));
        // Untouched keys keep their defaults.
        assert_eq!(cfg.generate.transports, vec!["http"]);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let missing = PathBuf::from("/definitely/not/here/strata.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn unknown_backend_in_config() {
        let mut cfg = AppConfig::default();
        cfg.generate.backends = vec!["oracle".into()];
        assert!(matches!(cfg.backends(), Err(CliError::ConfigError { .. })));
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
