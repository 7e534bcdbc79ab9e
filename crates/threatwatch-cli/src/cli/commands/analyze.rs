//! `threatwatch analyze` - Fetch a feed and list its high-risk records.

use anyhow::Result;
use colored::Colorize;
use threatwatch::{ThreatRecord, HIGH_RISK_THRESHOLD};

use super::{fetch_into, Context};
use crate::cli::args::FeedArgs;
use crate::output::{print_records, records_table};

pub async fn execute(ctx: Context, args: FeedArgs) -> Result<()> {
    let url = ctx.resolve_url(args.url)?;
    let mut intel = ctx.intel()?;

    fetch_into(&mut intel, &url).await?;
    let flagged = intel.analyze()?;

    if !print_records(&flagged, ctx.output_format)? {
        print_findings(&flagged);
    }

    Ok(())
}

/// Pretty report shared with the interactive shell.
pub(crate) fn print_findings(flagged: &[ThreatRecord]) {
    if flagged.is_empty() {
        println!("{}", "No high risk threats found.".green());
        return;
    }

    println!(
        "{} {} (severity >= {})",
        "High risk threats identified:".red().bold(),
        flagged.len(),
        HIGH_RISK_THRESHOLD
    );
    println!("{}", records_table(flagged));
}
