use anyhow::Result;
use clap::Parser;
use docstub::cli::{AppContext, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // DOCSTUB_LOG wins over -v
    let default_level = match cli.verbose {
        0 => "docstub=warn",
        1 => "docstub=debug",
        _ => "docstub=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("DOCSTUB_LOG").unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::Generate(args) => docstub::generate_run(args, &ctx),
        Commands::Init(args) => docstub::infra::config::init(args, &ctx),
        Commands::Completions(args) => docstub::completion::run(args, &ctx),
    }
}
