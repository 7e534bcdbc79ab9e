//! The held threat set and the fetch / analyze operations over it.

use crate::client::{FeedClient, FeedSource};
use crate::task::FetchCompleted;
use threatwatch_core::analysis::{self, RiskSummary};
use threatwatch_core::{Result, ThreatRecord, ThreatSet};
use tracing::info;

/// Owns the current [`ThreatSet`] and the source it is fetched from.
///
/// The set starts empty, is replaced wholesale by each successful fetch and
/// is left untouched by every failed one.
#[derive(Debug)]
pub struct ThreatIntel<S = FeedClient> {
    source: S,
    threats: ThreatSet,
}

impl<S> ThreatIntel<S> {
    /// Create a holder with an empty threat set
    pub const fn new(source: S) -> Self {
        Self {
            source,
            threats: ThreatSet::empty(),
        }
    }

    /// The feed source used by [`ThreatIntel::fetch`]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The currently held threat set
    pub const fn threats(&self) -> &ThreatSet {
        &self.threats
    }

    /// Fold a completed fetch of `url` into the held set.
    ///
    /// Returns `Ok(true)` when the set was replaced and `Ok(false)` when the
    /// feed could not be reached. Malformed responses are returned as errors
    /// and also leave the set unchanged.
    pub fn apply(&mut self, url: &str, result: Result<Vec<ThreatRecord>>) -> Result<bool> {
        match result {
            Ok(records) => {
                info!(url = %url, records = records.len(), "fetched threat data");
                self.threats = ThreatSet::from_feed(url, records);
                Ok(true)
            }
            Err(err) if err.is_transport() => {
                info!(url = %url, error = %err, "failed to fetch threat data");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Fold a message posted by a background fetch into the held set
    pub fn apply_completed(&mut self, completed: FetchCompleted) -> Result<bool> {
        self.apply(&completed.url, completed.result)
    }

    /// The held records at or above the high-risk threshold, in order.
    ///
    /// Calling this repeatedly without a fetch in between yields the same
    /// result.
    pub fn analyze(&self) -> Result<Vec<ThreatRecord>> {
        analysis::high_risk(self.threats.records())
    }

    /// Counts over the held records
    pub fn summary(&self) -> Result<RiskSummary> {
        analysis::summarize(self.threats.records())
    }
}

impl<S: FeedSource> ThreatIntel<S> {
    /// Fetch `url` and replace the held set with its records.
    ///
    /// The call waits for the network round trip; interactive callers should
    /// prefer [`spawn_fetch`](crate::spawn_fetch) and [`ThreatIntel::apply_completed`].
    pub async fn fetch(&mut self, url: &str) -> Result<bool> {
        let result = self.source.get_feed(url).await;
        self.apply(url, result)
    }
}
