//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use crate::output::OutputFormat;

/// Fetch a JSON threat feed and flag high-risk records
///
/// A feed is a JSON object whose `data` key holds a list of records.
/// Records with a numeric `severity` of 7 or more are reported as high risk.
#[derive(Parser, Debug)]
#[command(name = "threatwatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Request timeout in seconds
    #[arg(long, env = "THREATWATCH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch threat data from a feed URL
    Fetch(FeedArgs),

    /// Fetch threat data and list the high-risk records
    Analyze(FeedArgs),

    /// Start interactive shell mode
    Shell,

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Fetch / analyze commands
// ============================================================================

#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Feed URL (falls back to THREATWATCH_URL, then the configured default_url)
    #[arg(env = "THREATWATCH_URL")]
    pub url: Option<String>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (default_url, output_format, timeout_secs)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_with_global_flags() {
        let cli = Cli::try_parse_from([
            "threatwatch",
            "analyze",
            "https://feeds.example.net/t.json",
            "-o",
            "json",
            "--timeout",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.timeout, Some(5));
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.url.as_deref(), Some("https://feeds.example.net/t.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
