use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
}

#[derive(Parser)]
#[command(name = "docstub")]
#[command(about = "Generate doc-comment skeletons for the function definition below the cursor")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show what would be done without writing files
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a doc comment for the definition below a cursor position
    Generate(GenerateArgs),

    /// Initialize a docstub.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Source file to inspect
    pub file: PathBuf,

    /// 1-based line holding the cursor; the definition starts on the next line
    #[arg(short, long)]
    pub line: usize,

    /// 1-based character column of the cursor (default: end of line)
    #[arg(short, long)]
    pub column: Option<usize>,

    /// Override the language otherwise derived from the file extension
    #[arg(long)]
    pub lang: Option<String>,

    /// Print the template with editable-field markers instead of plain text
    #[arg(long, conflicts_with = "json")]
    pub raw: bool,

    /// Emit a JSON report instead of text
    #[arg(long)]
    pub json: bool,

    /// Insert the comment into the file in place
    #[arg(short, long)]
    pub write: bool,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
