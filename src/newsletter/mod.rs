//! Collect sender metadata from newsletters sitting in a mailbox.
//!
//! [`Paginator`] walks the message list for a [`DateRange`] and
//! [`MetadataExtractor`] fetches each message to pull out who sent it,
//! when and how big it was.

use anyhow::Result;

use crate::core::AppConfig;
use crate::google::gmail::MailApi;

pub mod date_range;
pub mod metadata;
pub mod paginator;
pub mod sender;

#[cfg(test)]
pub(crate) mod fake;

pub use date_range::DateRange;
pub use metadata::{MessageMetadata, MetadataExtractor, ResultMapping};
pub use paginator::{MessageRef, Paginator};
pub use sender::{RegexSenderParser, Sender, SenderParser};

/// List every message in the range and extract its sender metadata
pub async fn collect_sender_metadata<A: MailApi + ?Sized>(
    api: &A,
    config: &AppConfig,
    range: &DateRange,
) -> Result<ResultMapping> {
    let refs = Paginator::new(api)
        .with_label(&config.gmail_label_id)
        .with_page_size(config.gmail_page_size)
        .collect(range)
        .await?;
    MetadataExtractor::new(api).extract_all(&refs).await
}
