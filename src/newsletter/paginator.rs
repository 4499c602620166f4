use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::DateRange;
use crate::core::config::{MAX_PAGE_SIZE, clamp_page_size};
use crate::google::gmail::{ListQuery, MailApi};

/// Provider-assigned message ID, treated as opaque
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageRef(pub String);

impl MessageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageRef {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Walks every page of the message list for a date range
pub struct Paginator<'a, A: MailApi + ?Sized> {
    api: &'a A,
    label_id: String,
    page_size: u32,
}

impl<'a, A: MailApi + ?Sized> Paginator<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            label_id: String::from("INBOX"),
            page_size: MAX_PAGE_SIZE,
        }
    }

    pub fn with_label(mut self, label_id: &str) -> Self {
        self.label_id = label_id.to_string();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = clamp_page_size(page_size);
        self
    }

    /// Collect the IDs of every message in the range, in the order the
    /// API returns them. Stops at the first page without a continuation
    /// token.
    pub async fn collect(&self, range: &DateRange) -> Result<Vec<MessageRef>> {
        let q = range.to_query();
        let mut refs = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0;

        tracing::info!("Listing {} messages between {}", self.label_id, range);

        loop {
            let query = ListQuery {
                label_id: self.label_id.clone(),
                max_results: self.page_size,
                q: q.clone(),
                page_token: page_token.take(),
            };
            let page = self.api.list_messages(&query).await?;
            pages += 1;

            let messages = page.messages.unwrap_or_default();
            tracing::debug!("Page {} returned {} messages", pages, messages.len());
            refs.extend(messages.into_iter().map(|m| MessageRef(m.id)));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::info!("Found {} messages across {} pages", refs.len(), pages);
        Ok(refs)
    }
}
