//! In-memory mailbox for exercising the collector without HTTP

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::google::gmail::{
    ListMessagesResponse, ListQuery, MailApi, Message, MessageHeader, MessagePayload,
    MessageResponse,
};

#[derive(Default)]
pub struct FakeMailbox {
    /// Pages keyed by the token that requests them, `None` for the first
    pages: HashMap<Option<String>, (Vec<&'static str>, Option<&'static str>)>,
    messages: HashMap<String, Option<Message>>,
    failing: Vec<String>,
    pub list_calls: Mutex<Vec<ListQuery>>,
    pub get_calls: Mutex<Vec<String>>,
}

impl FakeMailbox {
    pub fn with_page(
        mut self,
        token: Option<&str>,
        ids: Vec<&'static str>,
        next: Option<&'static str>,
    ) -> Self {
        self.pages.insert(token.map(String::from), (ids, next));
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.insert(message.id.clone(), Some(message));
        self
    }

    pub fn with_null_message(mut self, id: &str) -> Self {
        self.messages.insert(id.to_string(), None);
        self
    }

    pub fn with_failure(mut self, id: &str) -> Self {
        self.failing.push(id.to_string());
        self
    }
}

#[async_trait]
impl MailApi for FakeMailbox {
    async fn list_messages(&self, query: &ListQuery) -> Result<ListMessagesResponse> {
        self.list_calls.lock().unwrap().push(query.clone());
        let (ids, next) = self
            .pages
            .get(&query.page_token)
            .ok_or_else(|| anyhow!("Unknown page token {:?}", query.page_token))?;
        let messages = if ids.is_empty() {
            None
        } else {
            Some(
                ids.iter()
                    .map(|id| MessageResponse {
                        id: id.to_string(),
                        thread_id: Some(format!("thr_{}", id)),
                    })
                    .collect(),
            )
        };
        Ok(ListMessagesResponse {
            messages,
            next_page_token: next.map(String::from),
            result_size_estimate: None,
        })
    }

    async fn get_message(&self, id: &str) -> Result<Option<Message>> {
        self.get_calls.lock().unwrap().push(id.to_string());
        if self.failing.iter().any(|f| f == id) {
            return Err(anyhow!("Message fetch failed: 429 Too Many Requests"));
        }
        self.messages
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow!("Message {} not found", id))
    }
}

pub fn message(
    id: &str,
    from: Option<&str>,
    internal_date: Option<&str>,
    size_estimate: Option<u64>,
) -> Message {
    let mut headers = vec![MessageHeader {
        name: "Subject".to_string(),
        value: format!("Issue {}", id),
    }];
    if let Some(from) = from {
        headers.push(MessageHeader {
            name: "From".to_string(),
            value: from.to_string(),
        });
    }
    Message {
        id: id.to_string(),
        thread_id: Some(format!("thr_{}", id)),
        snippet: None,
        payload: Some(MessagePayload {
            headers: Some(headers),
            mimetype: Some("text/html".to_string()),
        }),
        label_ids: Some(vec!["INBOX".to_string()]),
        internal_date: internal_date.map(String::from),
        size_estimate,
    }
}
