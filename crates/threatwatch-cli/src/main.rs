//! threatwatch - fetch a JSON threat feed and flag high-risk records.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    threatwatch_cli::run().await
}
