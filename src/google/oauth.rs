//! OAuth helpers for getting a Gmail access token without a browser.
//! The refresh token is expected to come from a consent flow run
//! elsewhere.

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Deserialize;

use crate::core::AppConfig;

#[derive(Debug, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
}

/// Exchange a refresh token for a fresh access token
pub async fn refresh_access_token(
    token_url: &str,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> Result<OAuthToken> {
    let params = [
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("refresh_token", refresh_token),
        ("grant_type", "refresh_token"),
    ];
    let res = Client::new().post(token_url).form(&params).send().await?;
    let status = res.status();
    if !status.is_success() {
        let text = res.text().await.unwrap_or_default();
        anyhow::bail!("Token refresh failed: {} ({})", status, text);
    }
    let text = res.text().await.context("Failed to read token response")?;
    let token: OAuthToken = serde_json::from_str(&text)?;
    Ok(token)
}

/// Use the configured access token if there is one, otherwise refresh
/// one with the configured client credentials.
pub async fn resolve_access_token(config: &AppConfig) -> Result<String> {
    if let Some(token) = &config.gmail_access_token {
        return Ok(token.clone());
    }

    let (Some(client_id), Some(client_secret), Some(refresh_token)) = (
        &config.gmail_client_id,
        &config.gmail_client_secret,
        &config.gmail_refresh_token,
    ) else {
        return Err(anyhow!(
            "Set NEWSLETTER_GMAIL_ACCESS_TOKEN or NEWSLETTER_GMAIL_CLIENT_ID, NEWSLETTER_GMAIL_CLIENT_SECRET and NEWSLETTER_GMAIL_REFRESH_TOKEN in your environment"
        ));
    };

    tracing::debug!("Refreshing Gmail access token");
    let token = refresh_access_token(
        &config.oauth_token_url,
        client_id,
        client_secret,
        refresh_token,
    )
    .await?;
    Ok(token.access_token)
}
