//! Gmail API client for listing inbox messages and fetching them in
//! full. Only the fields needed to pull sender metadata out of a
//! message are modeled, everything else in the response is ignored.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::core::AppConfig;

/// Message and list structures from Gmail API documentation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MessageResponse {
    pub id: String,
    #[serde(rename = "threadId")]
    pub thread_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListMessagesResponse {
    pub messages: Option<Vec<MessageResponse>>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
    #[serde(rename = "resultSizeEstimate")]
    pub result_size_estimate: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "threadId")]
    pub thread_id: Option<String>,
    pub snippet: Option<String>,
    pub payload: Option<MessagePayload>,
    #[serde(rename = "labelIds")]
    pub label_ids: Option<Vec<String>>,
    // Epoch millis, serialized by Gmail as a string
    #[serde(rename = "internalDate")]
    pub internal_date: Option<String>,
    #[serde(rename = "sizeEstimate")]
    pub size_estimate: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePayload {
    pub headers: Option<Vec<MessageHeader>>,
    #[serde(rename = "mimeType")]
    pub mimetype: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

/// Value of the first header whose name is exactly `name`
pub fn find_header<'a>(message: &'a Message, name: &str) -> Option<&'a str> {
    message
        .payload
        .as_ref()?
        .headers
        .as_ref()?
        .iter()
        .find(|h| h.name == name)
        .map(|h| h.value.as_str())
}

/// Parameters for one call to `users.messages.list`
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub label_id: String,
    pub max_results: u32,
    pub q: String,
    pub page_token: Option<String>,
}

/// The two message operations the collector needs from a mail
/// provider. `GmailClient` talks to the real API, tests swap in an
/// in-memory mailbox.
#[async_trait]
pub trait MailApi: Send + Sync {
    /// Fetch one page of message references
    async fn list_messages(&self, query: &ListQuery) -> Result<ListMessagesResponse>;

    /// Fetch a full message. `None` means the API answered without
    /// any message data.
    async fn get_message(&self, id: &str) -> Result<Option<Message>>;
}

pub struct GmailClient {
    client: Client,
    base_url: String,
    user_id: String,
    access_token: String,
}

impl GmailClient {
    pub fn new(base_url: &str, user_id: &str, access_token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: user_id.to_string(),
            access_token: access_token.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig, access_token: &str) -> Self {
        Self::new(&config.gmail_api_url, &config.gmail_user_id, access_token)
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/gmail/v1/users/{}/messages",
            self.base_url,
            urlencoding::encode(&self.user_id)
        )
    }

    fn list_url(&self, query: &ListQuery) -> String {
        let mut url = format!(
            "{}?labelIds={}&maxResults={}&q={}",
            self.messages_url(),
            urlencoding::encode(&query.label_id),
            query.max_results,
            urlencoding::encode(&query.q)
        );
        if let Some(token) = &query.page_token {
            url.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
        }
        url
    }

    fn message_url(&self, id: &str) -> String {
        format!(
            "{}/{}?format=full",
            self.messages_url(),
            urlencoding::encode(id)
        )
    }
}

#[async_trait]
impl MailApi for GmailClient {
    /// List messages matching a label and search query
    /// curl: GET /gmail/v1/users/me/messages?labelIds=INBOX&maxResults=500&q=...
    async fn list_messages(&self, query: &ListQuery) -> Result<ListMessagesResponse> {
        let url = self.list_url(query);
        let res = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            anyhow::bail!("Message list failed: {} ({})", status, text);
        }
        let text = res
            .text()
            .await
            .context("Failed to read message list body")?;
        let page: ListMessagesResponse = serde_json::from_str(&text)?;
        Ok(page)
    }

    /// Fetch a single message in full format
    /// curl: GET /gmail/v1/users/me/messages/{id}?format=full
    async fn get_message(&self, id: &str) -> Result<Option<Message>> {
        let url = self.message_url(id);
        let res = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            let text = res.text().await.unwrap_or_default();
            if status == StatusCode::NOT_FOUND {
                anyhow::bail!("Message {} not found ({})", id, text);
            }
            anyhow::bail!("Message fetch failed: {} ({})", status, text);
        }
        // Only a literal `null` body means there is no message data
        let text = res
            .text()
            .await
            .with_context(|| format!("Failed to read body of message {}", id))?;
        let message: Option<Message> = serde_json::from_str(&text)?;
        Ok(message)
    }
}
