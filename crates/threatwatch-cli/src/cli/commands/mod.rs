//! Command implementations.

pub mod analyze;
pub mod config;
pub mod fetch;
pub mod shell;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use threatwatch::{ClientConfig, FeedClient, ThreatIntel};

use crate::output::OutputFormat;

/// Shown when no feed URL was given anywhere.
pub const MISSING_URL: &str = "Please enter a URL.";

/// Shown when the feed could not be reached.
pub const FETCH_FAILED: &str = "Failed to fetch threat data.";

/// Shown after a successful fetch.
pub const FETCH_SUCCEEDED: &str = "Threat data fetched successfully.";

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format
    pub output_format: OutputFormat,

    /// Request timeout override in seconds
    pub timeout_secs: Option<u64>,

    /// Feed URL used when a command is given none
    pub default_url: Option<String>,

    /// Verbose output
    pub verbose: bool,
}

impl Context {
    /// Pick the URL to fetch, falling back to the configured default.
    ///
    /// A blank URL counts as missing; any other URL is passed through as given.
    pub fn resolve_url(&self, url: Option<String>) -> anyhow::Result<String> {
        url.filter(|u| !u.trim().is_empty())
            .or_else(|| self.default_url.clone())
            .ok_or_else(|| anyhow::anyhow!(MISSING_URL))
    }

    /// Create a feed client honoring the configured timeout.
    pub fn client(&self) -> anyhow::Result<FeedClient> {
        let config = ClientConfig::new().timeout_secs(self.timeout_secs.unwrap_or(0));
        Ok(FeedClient::builder().config(config).build()?)
    }

    /// Create an empty threat holder backed by a fresh client.
    pub fn intel(&self) -> anyhow::Result<ThreatIntel> {
        Ok(ThreatIntel::new(self.client()?))
    }
}

/// Fetch `url` into `intel` behind a spinner, failing if the feed is unreachable.
pub(crate) async fn fetch_into(intel: &mut ThreatIntel, url: &str) -> anyhow::Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Fetching {url}"));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let fetched = intel.fetch(url).await;
    spinner.finish_and_clear();

    if fetched? {
        Ok(())
    } else {
        anyhow::bail!(FETCH_FAILED)
    }
}
