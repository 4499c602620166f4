//! Parsing of "From" header values into a display name and address.
//!
//! This only understands the common `Display Name <address>` shape. It
//! does not handle multiple comma separated addresses, RFC 2047 encoded
//! names or quoted names containing angle brackets, which is why it sits
//! behind [`SenderParser`] where a stricter parser can replace it.

use std::sync::LazyLock;

use regex::Regex;

/// Leading text up to the first `<` is the display name, the text
/// between `<` and `>` is the address.
static SENDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^<]*)<([^>]+)>").expect("Invalid sender regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub name: Option<String>,
    pub address: String,
}

pub trait SenderParser: Send + Sync {
    /// Returns `None` when the value isn't in a shape the parser
    /// recognizes.
    fn parse(&self, value: &str) -> Option<Sender>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RegexSenderParser;

impl SenderParser for RegexSenderParser {
    fn parse(&self, value: &str) -> Option<Sender> {
        let caps = SENDER_RE.captures(value)?;
        let name = caps
            .get(1)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(String::from);
        let address = caps.get(2)?.as_str().to_string();
        Some(Sender { name, address })
    }
}
