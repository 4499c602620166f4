use anyhow::Result;

use crate::core::AppConfig;
use crate::google::gmail::GmailClient;
use crate::google::oauth::resolve_access_token;
use crate::newsletter::{DateRange, Paginator};

pub async fn run(start: &str, end: &str) -> Result<()> {
    let range = DateRange::parse(start, end)?;
    let config = AppConfig::default();
    let access_token = resolve_access_token(&config).await?;
    let client = GmailClient::from_config(&config, &access_token);

    let refs = Paginator::new(&client)
        .with_label(&config.gmail_label_id)
        .with_page_size(config.gmail_page_size)
        .collect(&range)
        .await?;
    for message_ref in refs {
        println!("{}", message_ref);
    }

    Ok(())
}
