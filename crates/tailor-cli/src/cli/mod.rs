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
    name    = "tailor",
    bin_name = "tailor",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{2702} Brand-aware template resolution and validation",
    long_about = "Tailor resolves placeholder markers in project templates \
                  against business data, reskins the result through a named \
                  theme, and validates the output.",
    after_help = "EXAMPLES:\n\
        \x20 tailor process --builtin --data brand.json --out ./site\n\
        \x20 tailor process --template landing.json --theme cozy --json > artifact.json\n\
        \x20 tailor check --template landing.json --data brand.json\n\
        \x20 tailor themes --css cozy > theme.css",
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
    /// Process a template into a resolved project artifact.
    #[command(
        visible_alias = "p",
        about = "Process a template against business data",
        after_help = "EXAMPLES:\n\
            \x20 tailor process --builtin --out ./site\n\
            \x20 tailor process --template landing.json --data brand.json --theme cozy\n\
            \x20 tailor process --builtin --json | jq .validation.score"
    )]
    Process(ProcessArgs),

    /// Validate a template's resolved output without writing anything.
    #[command(
        about = "Run the pipeline and report validation only",
        after_help = "Exit code is non-zero when validation fails.\n\
            EXAMPLES:\n\
            \x20 tailor check --template landing.json --data brand.json"
    )]
    Check(CheckArgs),

    /// List registered themes.
    #[command(
        about = "List themes or dump one as CSS variables",
        after_help = "EXAMPLES:\n\
            \x20 tailor themes\n\
            \x20 tailor themes --css cozy > theme.css"
    )]
    Themes(ThemesArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 tailor completions bash > ~/.local/share/bash-completion/completions/tailor\n\
            \x20 tailor completions zsh  > ~/.zfunc/_tailor"
    )]
    Completions(CompletionsArgs),
}

// ── process ───────────────────────────────────────────────────────────────────

/// Arguments for `tailor process`.
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Template document to process.
    #[arg(
        short = 't',
        long = "template",
        value_name = "FILE",
        conflicts_with = "builtin",
        help = "Template JSON file"
    )]
    pub template: Option<PathBuf>,

    /// Use the built-in landing-page template instead of a file.
    #[arg(long = "builtin", help = "Use the built-in landing template")]
    pub builtin: bool,

    /// Business-data document.
    #[arg(
        short = 'd',
        long = "data",
        value_name = "FILE",
        help = "User data JSON file"
    )]
    pub data: Option<PathBuf>,

    /// Theme override (takes precedence over the data file).
    #[arg(long = "theme", value_name = "NAME", help = "Theme to apply")]
    pub theme: Option<String>,

    /// Write the resolved files and manifest to a directory.
    #[arg(
        short = 'o',
        long = "out",
        value_name = "DIR",
        help = "Output directory for the artifact"
    )]
    pub out: Option<PathBuf>,

    /// Print the full artifact as JSON to stdout.
    #[arg(long = "json", help = "Emit the artifact as JSON")]
    pub json: bool,

    /// Overwrite an existing output directory.
    #[arg(long = "force", help = "Overwrite existing output directory")]
    pub force: bool,

    /// Enable outbound content generation (requires TAILOR_AI_API_KEY).
    #[arg(long = "ai", help = "Enable AI content generation")]
    pub ai: bool,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `tailor check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Template document to check.
    #[arg(
        short = 't',
        long = "template",
        value_name = "FILE",
        conflicts_with = "builtin",
        help = "Template JSON file"
    )]
    pub template: Option<PathBuf>,

    /// Use the built-in landing-page template.
    #[arg(long = "builtin", help = "Use the built-in landing template")]
    pub builtin: bool,

    /// Business-data document.
    #[arg(short = 'd', long = "data", value_name = "FILE", help = "User data JSON file")]
    pub data: Option<PathBuf>,

    /// Theme override.
    #[arg(long = "theme", value_name = "NAME", help = "Theme to apply")]
    pub theme: Option<String>,
}

// ── themes ────────────────────────────────────────────────────────────────────

/// Arguments for `tailor themes`.
#[derive(Debug, Args)]
pub struct ThemesArgs {
    /// Dump one theme as a `:root` CSS custom-property block.
    #[arg(long = "css", value_name = "NAME", help = "Print a theme as CSS variables")]
    pub css: Option<String>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `tailor completions`.
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

// ── tests ─────────────────────────────────────────────────────────────────────
