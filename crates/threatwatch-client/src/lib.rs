//! HTTP fetcher and in-memory threat set for threatwatch.
//!
//! [`FeedClient`] performs the network round trip, [`ThreatIntel`] owns the
//! currently held [`ThreatSet`](threatwatch_core::ThreatSet) and decides what a
//! fetch outcome means for it, and [`spawn_fetch`] moves the round trip onto a
//! background task for interactive callers.

#![doc(html_root_url = "https://docs.rs/threatwatch-client/0.1.0")]

mod client;
mod config;
mod intel;
mod task;

pub use client::{FeedClient, FeedClientBuilder, FeedSource};
pub use config::*;
pub use intel::ThreatIntel;
pub use task::{spawn_fetch, FetchCompleted};
pub use threatwatch_core::{Result, ThreatError};
