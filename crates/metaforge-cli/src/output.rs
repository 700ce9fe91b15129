//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde_json::{Value, json};

use metaforge_core::domain::{Outcome, Severity};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = if args.output_format == OutputFormat::Auto {
            parse_format(&config.output.format).unwrap_or(OutputFormat::Auto)
        } else {
            args.output_format
        };

        // Auto → Human on a TTY, Plain when piped.
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
            // Only the human format is styled.
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet || self.is_json() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// One outcome line, styled by severity.
    pub fn outcome(&self, outcome: &Outcome) -> io::Result<()> {
        let msg = outcome.to_string();
        match outcome.severity() {
            Severity::Success => self.success(&msg),
            Severity::Info => self.info(&msg),
            Severity::Warning => self.warning(&msg),
        }
    }

    /// Every outcome, either as lines or as one JSON array.
    pub fn outcomes(&self, outcomes: &[Outcome]) -> io::Result<()> {
        if self.is_json() {
            let items: Vec<Value> = outcomes.iter().map(outcome_json).collect();
            return self.json(&Value::Array(items));
        }
        for outcome in outcomes {
            self.outcome(outcome)?;
        }
        Ok(())
    }

    /// Pretty-printed JSON on stdout. Written even in quiet mode, since the
    /// caller asked for machine-readable output.
    pub fn json(&self, value: &Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

fn parse_format(value: &str) -> Option<OutputFormat> {
    match value.to_ascii_lowercase().as_str() {
        "auto" => Some(OutputFormat::Auto),
        "human" => Some(OutputFormat::Human),
        "plain" => Some(OutputFormat::Plain),
        "json" => Some(OutputFormat::Json),
        _ => None,
    }
}

/// Machine-readable form of an outcome.
pub fn outcome_json(outcome: &Outcome) -> Value {
    let kind = match outcome {
        Outcome::Created { .. } => "created",
        Outcome::Updated { .. } => "updated",
        Outcome::AlreadyPresent { .. } => "already_present",
        Outcome::MissingResource { .. } => "missing_resource",
        Outcome::NoTargetSection { .. } => "no_target_section",
        Outcome::NotApplicable { .. } => "not_applicable",
    };
    let mut value = json!({
        "outcome": kind,
        "message": outcome.to_string(),
    });
    if let Some(path) = outcome.path() {
        value["path"] = json!(path.display().to_string());
    }
    value
}

// ── tests ─────────────────────────────────────────────────────────────────────
