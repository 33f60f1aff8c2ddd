//! Terminal output for command results.
//!
//! Everything a command reports goes through [`OutputManager`], which owns
//! the quiet flag, colour decision and resolved format. Logs go to stderr
//! through `tracing`; this writes to stdout.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // The flag wins over `output.format`; Auto resolves by TTY.
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            other => other,
        };
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    fn emit(&self, line: String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(&line)
    }

    /// `symbol msg`, both painted with `paint` unless colour is off.
    fn marked(&self, symbol: &str, msg: &str, paint: fn(&str) -> String) -> String {
        if self.no_color {
            format!("{symbol} {msg}")
        } else {
            format!("{} {}", paint(symbol), paint(msg))
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.emit(msg.to_owned())
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.emit(self.marked("\u{2713}", msg, |s| s.green().to_string()))
    }

    /// Written even in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = self.marked("\u{2717}", msg, |s| s.red().to_string());
        self.term.write_line(&line)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.emit(self.marked("\u{26a0}", msg, |s| s.yellow().to_string()))
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.emit(line)
    }

    /// File listings and other secondary lines.
    pub fn detail(&self, text: &str) -> io::Result<()> {
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.dimmed().to_string()
        };
        self.emit(line)
    }

    /// Pretty JSON document.  Written even in quiet mode, since it is the
    /// command's result rather than commentary.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Never `Auto`.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
