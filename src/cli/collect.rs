use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::AppConfig;
use crate::google::gmail::GmailClient;
use crate::google::oauth::resolve_access_token;
use crate::newsletter::{DateRange, ResultMapping, collect_sender_metadata};

pub async fn run(start: &str, end: &str, output: Option<&Path>) -> Result<()> {
    let range = DateRange::parse(start, end)?;
    let config = AppConfig::default();
    let access_token = resolve_access_token(&config).await?;
    let client = GmailClient::from_config(&config, &access_token);

    let results = collect_sender_metadata(&client, &config, &range).await?;
    write_results(&results, output)?;

    Ok(())
}

/// Write results as pretty JSON to `output`, or stdout when there is no path
pub fn write_results(results: &ResultMapping, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write results to {}", path.display()))?;
            tracing::info!("Wrote {} results to {}", results.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
