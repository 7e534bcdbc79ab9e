//! `threatwatch fetch` - Fetch threat data from a feed.

use anyhow::Result;
use colored::Colorize;
use threatwatch::analysis;

use super::{fetch_into, Context, FETCH_SUCCEEDED};
use crate::cli::args::FeedArgs;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: FeedArgs) -> Result<()> {
    let url = ctx.resolve_url(args.url)?;
    let mut intel = ctx.intel()?;

    fetch_into(&mut intel, &url).await?;
    let threats = intel.threats();

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(threats)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(threats)?);
        }
        OutputFormat::Csv => {
            print!("{}", crate::output::records_csv(threats.records())?);
        }
        OutputFormat::Pretty => {
            println!("{}", FETCH_SUCCEEDED.green().bold());
            println!("  {} {}", "Source:".bold(), url.cyan());
            println!("  {} {}", "Records:".bold(), threats.len());

            // Severity breakdown is informational; malformed records only warn here
            match analysis::summarize(threats.records()) {
                Ok(summary) => {
                    println!("  {} {}", "High risk:".bold(), summary.high_risk.to_string().red());
                    if summary.missing_severity > 0 {
                        println!(
                            "  {} {}",
                            "Without severity:".bold(),
                            summary.missing_severity.to_string().dimmed()
                        );
                    }
                }
                Err(err) => println!("  {} {}", "Warning:".yellow().bold(), err),
            }

            if ctx.verbose && !threats.is_empty() {
                println!();
                println!("{}", crate::output::records_table(threats.records()));
            }
        }
    }

    Ok(())
}
