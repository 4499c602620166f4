use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{MessageRef, RegexSenderParser, SenderParser};
use crate::google::gmail::{MailApi, Message, find_header};

/// How often to log progress while extracting
const PROGRESS_EVERY: usize = 100;

/// Sender metadata for one message. Every field is optional since the
/// API may return a message without any of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMetadata {
    pub sender_name: Option<String>,
    pub sender_address: Option<String>,
    /// Epoch millis as returned by the API
    pub send_timestamp: Option<String>,
    pub size_estimate: Option<u64>,
}

impl MessageMetadata {
    pub fn from_message(message: &Message, parser: &dyn SenderParser) -> Self {
        let sender = find_header(message, "From").and_then(|value| parser.parse(value));
        let (sender_name, sender_address) = match sender {
            Some(s) => (s.name, Some(s.address)),
            None => (None, None),
        };

        Self {
            sender_name,
            sender_address,
            send_timestamp: message.internal_date.clone(),
            size_estimate: message.size_estimate,
        }
    }
}

/// Metadata for every processed message keyed by message ID
pub type ResultMapping = BTreeMap<MessageRef, MessageMetadata>;

/// Fetches messages one at a time and pulls out their sender metadata
pub struct MetadataExtractor<'a, A: MailApi + ?Sized> {
    api: &'a A,
    parser: Box<dyn SenderParser>,
}

impl<'a, A: MailApi + ?Sized> MetadataExtractor<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            parser: Box::new(RegexSenderParser),
        }
    }

    pub fn with_parser(mut self, parser: impl SenderParser + 'static) -> Self {
        self.parser = Box::new(parser);
        self
    }

    pub async fn extract(&self, message_ref: &MessageRef) -> Result<MessageMetadata> {
        let Some(message) = self.api.get_message(message_ref.as_str()).await? else {
            tracing::warn!("No data returned for message {}", message_ref);
            return Ok(MessageMetadata::default());
        };

        let metadata = MessageMetadata::from_message(&message, self.parser.as_ref());
        if metadata.sender_address.is_none() {
            tracing::debug!(
                "No parseable sender for message {}: {:?}",
                message_ref,
                find_header(&message, "From")
            );
        }
        Ok(metadata)
    }

    /// Extract metadata for each message in order. The first failed
    /// fetch aborts the whole run.
    pub async fn extract_all(&self, refs: &[MessageRef]) -> Result<ResultMapping> {
        let total = refs.len();
        let mut results = ResultMapping::new();

        for (i, message_ref) in refs.iter().enumerate() {
            let metadata = self.extract(message_ref).await?;
            results.insert(message_ref.clone(), metadata);

            let done = i + 1;
            if done % PROGRESS_EVERY == 0 || done == total {
                tracing::info!("Processed {}/{} messages", done, total);
            }
        }

        Ok(results)
    }
}
