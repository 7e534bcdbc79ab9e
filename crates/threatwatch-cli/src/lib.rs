//! # threatwatch-cli
//!
//! Command-line interface for threatwatch.
//!
//! ## Features
//!
//! - **One-shot commands**: `fetch` a feed, `analyze` it for high-risk records
//! - **Interactive shell**: fetch in the background, analyze the held set on demand
//! - **Multiple output formats**: Pretty tables, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
