//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "metaforge",
    bin_name = "metaforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Salesforce metadata and seed data from a blueprint",
    long_about = "Metaforge writes custom objects, fields, tabs and permission sets \
                  in source format, edits retrieved layouts and apps in place, \
                  and prepares record files for data import.",
    after_help = "EXAMPLES:\n\
        \x20 metaforge generate dreamhouse.toml\n\
        \x20 metaforge resolve Account Property\n\
        \x20 metaforge layout add-field Property Price\n\
        \x20 metaforge data dreamhouse.toml --object Offer --rows offers.json\n\
        \x20 metaforge assign Property_Manager --target-org dev",
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
    /// Apply a blueprint.
    #[command(
        visible_alias = "gen",
        about = "Generate metadata from a blueprint",
        after_help = "EXAMPLES:\n\
            \x20 metaforge generate dreamhouse.toml\n\
            \x20 metaforge generate blueprints/          # every *.toml inside\n\
            \x20 metaforge generate dreamhouse.toml --dry-run"
    )]
    Generate(GenerateArgs),

    /// Show the API names object names resolve to.
    #[command(
        about = "Resolve object names to API names",
        after_help = "EXAMPLES:\n\
            \x20 metaforge resolve Account Property Offer__c"
    )]
    Resolve(ResolveArgs),

    /// Edit an existing page layout.
    #[command(about = "Edit a retrieved page layout", subcommand)]
    Layout(LayoutCommands),

    /// Write a permission set from the fields on disk.
    #[command(
        about = "Write <Object>_Manager from the object's field files",
        after_help = "EXAMPLES:\n\
            \x20 metaforge permset Property"
    )]
    Permset(PermsetArgs),

    /// Prepare a data import file.
    #[command(
        about = "Write <Object>-data.json from JSON rows",
        after_help = "EXAMPLES:\n\
            \x20 metaforge data dreamhouse.toml --object Offer --rows offers.json"
    )]
    Data(DataArgs),

    /// Assign a permission set in a connected org.
    #[command(
        about = "Assign a permission set through the platform CLI",
        after_help = "EXAMPLES:\n\
            \x20 metaforge assign Property_Manager\n\
            \x20 metaforge assign Property_Manager --target-org dev"
    )]
    Assign(AssignArgs),

    /// Initialise a Metaforge configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 metaforge init           # metaforge.toml in the project\n\
            \x20 metaforge init --global  # user configuration"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 metaforge completions bash > ~/.local/share/bash-completion/completions/metaforge\n\
            \x20 metaforge completions zsh  > ~/.zfunc/_metaforge\n\
            \x20 metaforge completions fish > ~/.config/fish/completions/metaforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Metaforge configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 metaforge config get platform.program\n\
            \x20 metaforge config list\n\
            \x20 metaforge config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Blueprint file, or a directory of `*.toml` blueprints.
    #[arg(value_name = "BLUEPRINT")]
    pub blueprint: PathBuf,

    /// Validate and list what would be written without writing.
    #[arg(long = "dry-run", help = "Validate only, write nothing")]
    pub dry_run: bool,
}

// ── resolve ───────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Object names as written in a blueprint.
    #[arg(value_name = "NAME", required = true, num_args = 1..)]
    pub names: Vec<String>,
}

// ── layout ────────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum LayoutCommands {
    /// Add a field to the first two-column section.
    AddField {
        /// Object the layout belongs to.
        #[arg(value_name = "OBJECT")]
        object: String,
        /// Custom field name (`__c` is appended when missing). Standard
        /// fields such as Phone cannot be added this way.
        #[arg(value_name = "FIELD")]
        field: String,
        /// Layout name (default: the object name without suffix).
        #[arg(short = 'l', long = "layout", value_name = "LAYOUT")]
        layout: Option<String>,
    },
    /// Add a related list for a child object.
    AddRelatedList {
        /// Parent object the layout belongs to.
        #[arg(value_name = "OBJECT")]
        object: String,
        /// Child object.
        #[arg(value_name = "CHILD")]
        child: String,
        /// Lookup or master-detail field on the child pointing at OBJECT.
        #[arg(value_name = "LOOKUP_FIELD")]
        lookup_field: String,
        /// Layout name (default: the object name without suffix).
        #[arg(short = 'l', long = "layout", value_name = "LAYOUT")]
        layout: Option<String>,
    },
}

// ── permset ───────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PermsetArgs {
    #[arg(value_name = "OBJECT")]
    pub object: String,
}

// ── data ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DataArgs {
    /// Blueprint declaring the object (for its name field and required fields).
    #[arg(value_name = "BLUEPRINT")]
    pub blueprint: PathBuf,

    /// Object the rows belong to.
    #[arg(short = 'o', long = "object", value_name = "OBJECT")]
    pub object: String,

    /// JSON file with an array of rows.
    #[arg(short = 'r', long = "rows", value_name = "FILE")]
    pub rows: PathBuf,
}

// ── assign ────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AssignArgs {
    /// Permission set API name, e.g. `Property_Manager`.
    #[arg(value_name = "PERMSET")]
    pub permission_set: String,

    /// Org alias or username (default: `platform.target_org`, then the CLI default).
    #[arg(short = 'o', long = "target-org", value_name = "ORG")]
    pub target_org: Option<String>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `metaforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the user configuration directory instead of the project.
    #[arg(long = "global", help = "Create user-wide configuration")]
    pub global: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `metaforge completions`.
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

/// Subcommands for `metaforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `platform.program`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
