use anyhow::Result;
use newsletter_senders::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
