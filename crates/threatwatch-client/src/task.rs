//! Background fetching for interactive callers.

use crate::client::FeedSource;
use threatwatch_core::{Result, ThreatRecord};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

/// Message posted when a background fetch finishes
#[derive(Debug)]
pub struct FetchCompleted {
    /// URL that was fetched
    pub url: String,
    /// Records on success, or the error that ended the fetch
    pub result: Result<Vec<ThreatRecord>>,
}

/// Run a fetch of `url` on a tokio task and post the outcome to `sender`.
///
/// The held set is not touched here; the receiver applies the message with
/// [`ThreatIntel::apply_completed`](crate::ThreatIntel::apply_completed).
pub fn spawn_fetch<S>(
    source: S,
    url: impl Into<String>,
    sender: UnboundedSender<FetchCompleted>,
) -> JoinHandle<()>
where
    S: FeedSource + 'static,
{
    let url = url.into();

    tokio::spawn(async move {
        debug!(url = %url, "background fetch started");
        let result = source.get_feed(&url).await;

        if sender.send(FetchCompleted { url, result }).is_err() {
            debug!("fetch receiver dropped, discarding result");
        }
    })
}
