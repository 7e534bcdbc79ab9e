//! Fetch JSON threat feeds and flag high-severity records.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use threatwatch::{FeedClient, ThreatIntel};
//!
//! #[tokio::main]
//! async fn main() -> threatwatch::Result<()> {
//!     let mut intel = ThreatIntel::new(FeedClient::new()?);
//!
//!     if intel.fetch("https://feeds.example.net/threats.json").await? {
//!         for threat in intel.analyze()? {
//!             println!("high risk: {threat}");
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/threatwatch/0.1.0")]

// Re-export core types
pub use threatwatch_core::*;

// Re-export client
pub use threatwatch_client::{
    spawn_fetch, ClientConfig, FeedClient, FeedClientBuilder, FeedSource, FetchCompleted,
    ThreatIntel,
};

// Re-export runtime for convenience
pub use serde_json;
pub use tokio;
