//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use strata_core::domain::{BackendKind, DomainError, TransportKind};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "strata",
    bin_name = "strata",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Layered Go service scaffolding from interface contracts",
    long_about = "Strata reads the usecase and repository interfaces of an entity's \
                  contract file and generates persistence adapters, transport handlers \
                  and a usecase implementation that satisfy them.",
    after_help = "EXAMPLES:\n\
        \x20 strata new shop --module github.com/acme/shop -b mysql -t gin\n\
        \x20 strata generate domain/article.go -b postgres,mongodb -t echo\n\
        \x20 strata inspect domain/article.go --format json\n\
        \x20 strata completions bash > /usr/share/bash-completion/completions/strata",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from the built-in seed contract.
    #[command(
        visible_alias = "n",
        about = "Create a new Go service project",
        after_help = "EXAMPLES:\n\
            \x20 strata new shop --module github.com/acme/shop\n\
            \x20 strata new blog --entity article -b postgres -t gin,echo\n\
            \x20 strata new api  --no-usecase --dry-run"
    )]
    New(NewArgs),

    /// Generate layers from an existing contract file.
    #[command(
        visible_alias = "g",
        about = "Generate layers from an existing contract",
        after_help = "EXAMPLES:\n\
            \x20 strata generate domain/article.go\n\
            \x20 strata generate domain/ -b mysql -t http\n\
            \x20 strata generate contracts/user.go --root . --stem user --force"
    )]
    Generate(GenerateArgs),

    /// Print the contract model extracted from a file.
    #[command(
        about = "Show the extracted contract model",
        after_help = "EXAMPLES:\n\
            \x20 strata inspect domain/article.go\n\
            \x20 strata inspect domain/article.go --format json"
    )]
    Inspect(InspectArgs),

    /// List supported backends and transports.
    #[command(
        visible_alias = "ls",
        about = "List supported backends and transports",
        after_help = "EXAMPLES:\n\
            \x20 strata list\n\
            \x20 strata list --format json"
    )]
    List(ListArgs),

    /// Initialise a Strata configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 strata init           # platform config directory\n\
            \x20 strata init --local   # ./strata.toml"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 strata completions bash > ~/.local/share/bash-completion/completions/strata\n\
            \x20 strata completions zsh  > ~/.zfunc/_strata\n\
            \x20 strata completions fish > ~/.config/fish/completions/strata.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Strata configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 strata config get generate.backends\n\
            \x20 strata config list\n\
            \x20 strata config path"
    )]
    Config(ConfigCommands),
}

// ── shared layer selection ────────────────────────────────────────────────────

/// Which layers to synthesize.  Empty lists fall back to configuration.
#[derive(Debug, Clone, Default, Args)]
pub struct LayerArgs {
    /// Persistence backends.
    #[arg(
        short = 'b',
        long = "backend",
        value_name = "BACKEND",
        value_delimiter = ',',
        value_parser = parse_backend,
        help = "Persistence backends (mysql, postgres, mongodb)"
    )]
    pub backends: Vec<BackendKind>,

    /// Transport protocols.
    #[arg(
        short = 't',
        long = "transport",
        value_name = "TRANSPORT",
        value_delimiter = ',',
        value_parser = parse_transport,
        help = "Transport handlers (http, gin, echo, fiber)"
    )]
    pub transports: Vec<TransportKind>,

    /// Skip the usecase implementation.
    #[arg(long = "no-usecase", help = "Do not generate the usecase layer")]
    pub no_usecase: bool,
}

fn parse_backend(value: &str) -> Result<BackendKind, String> {
    value.parse().map_err(variant_error)
}

fn parse_transport(value: &str) -> Result<TransportKind, String> {
    value.parse().map_err(variant_error)
}

fn variant_error(e: DomainError) -> String {
    match e.suggestions().first() {
        Some(hint) => format!("{e} ({hint})"),
        None => e.to_string(),
    }
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `strata new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name or path.  A plain name creates `./name`; a path like
    /// `../foo` places the project one level up.
    #[arg(value_name = "NAME", help = "Project name or path")]
    pub name: String,

    /// Go module path written to `go.mod`.
    #[arg(
        short = 'm',
        long = "module",
        value_name = "MODULE",
        help = "Go module path (default: the project name)"
    )]
    pub module: Option<String>,

    /// Entity the seed contract declares.
    #[arg(
        short = 'e',
        long = "entity",
        value_name = "ENTITY",
        default_value = "example",
        help = "Entity name for the seed contract"
    )]
    pub entity: String,

    #[command(flatten)]
    pub layers: LayerArgs,

    /// Write into an existing directory, replacing generated files.
    #[arg(long = "force", help = "Write into an existing directory")]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `strata generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Contract file, or a directory of contract files.
    #[arg(value_name = "CONTRACT", help = "Contract file or directory")]
    pub contract: PathBuf,

    /// Project root the layers are written under.
    #[arg(
        short = 'r',
        long = "root",
        value_name = "DIR",
        help = "Project root (default: parent of the contract's directory)"
    )]
    pub root: Option<PathBuf>,

    /// Expected entity stem.
    #[arg(
        short = 's',
        long = "stem",
        value_name = "STEM",
        help = "Entity stem (default: the contract file name)"
    )]
    pub stem: Option<String>,

    /// Go module path of the project.
    #[arg(
        short = 'm',
        long = "module",
        value_name = "MODULE",
        help = "Go module path (default: read from go.mod)"
    )]
    pub module: Option<String>,

    #[command(flatten)]
    pub layers: LayerArgs,

    /// Keep unsupported parameter types verbatim instead of failing.
    #[arg(
        long = "allow-opaque-types",
        help = "Keep unsupported types as written instead of failing"
    )]
    pub allow_opaque_types: bool,

    /// Replace generated files that already exist.
    #[arg(long = "force", help = "Overwrite existing generated files")]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── inspect ───────────────────────────────────────────────────────────────────

/// Arguments for `strata inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Contract file.
    #[arg(value_name = "CONTRACT", help = "Contract file")]
    pub contract: PathBuf,

    /// Expected entity stem.
    #[arg(short = 's', long = "stem", value_name = "STEM")]
    pub stem: Option<String>,

    /// Keep unsupported parameter types verbatim instead of failing.
    #[arg(long = "allow-opaque-types")]
    pub allow_opaque_types: bool,

    /// Output format (default: json with `--output-format json`, else text).
    #[arg(long = "format", value_enum)]
    pub format: Option<InspectFormat>,
}

/// Output format for the `inspect` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InspectFormat {
    /// Go-like method listing.
    Text,
    /// The contract model as JSON.
    Json,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `strata list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One `layer/kind` per line.
    List,
    /// JSON object.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `strata init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `strata.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `strata completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `strata config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generate.backends`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
