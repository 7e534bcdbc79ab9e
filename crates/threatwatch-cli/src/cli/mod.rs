//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Config;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // `config` reads the file itself, so a broken file can still be repaired
    let config = if matches!(cli.command, Commands::Config(_)) {
        Config::default()
    } else {
        Config::load()?
    };

    // Create context for commands
    let ctx = commands::Context {
        output_format: cli.output.or(config.output_format).unwrap_or(OutputFormat::Pretty),
        timeout_secs: cli.timeout.or(config.timeout_secs),
        default_url: config.default_url,
        verbose: cli.verbose,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Fetch(args) => commands::fetch::execute(ctx, args).await,
        Commands::Analyze(args) => commands::analyze::execute(ctx, args).await,
        Commands::Shell => commands::shell::execute(ctx).await,
        Commands::Config(args) => commands::config::execute(ctx, args),
    }
}

/// Install the log subscriber; `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
