//! Core types for threatwatch.
//!
//! This crate provides the foundation shared by the fetcher and the CLI:
//!
//! - **Types**: [`ThreatRecord`] and [`ThreatSet`], the opaque records pulled from a feed
//! - **Analysis**: the fixed high-risk severity filter
//! - **Errors**: [`ThreatError`] and the crate-wide [`Result`] alias
//!
//! # Example
//!
//! ```rust,ignore
//! use threatwatch_core::{analysis, ThreatRecord, Result};
//!
//! fn flag(records: &[ThreatRecord]) -> Result<()> {
//!     for threat in analysis::high_risk(records)? {
//!         println!("{threat}");
//!     }
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/threatwatch-core/0.1.0")]

pub mod analysis;
mod error;
pub mod types;

pub use analysis::{RiskSummary, HIGH_RISK_THRESHOLD};
pub use error::{Result, ThreatError};
pub use types::*;
