//! Test utilities for integration tests
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;

use newsletter_senders::core::AppConfig;

/// Config pointing the Gmail client at a mock server
pub fn test_config(api_url: &str) -> AppConfig {
    AppConfig {
        gmail_api_url: api_url.to_string(),
        gmail_user_id: String::from("me"),
        gmail_label_id: String::from("INBOX"),
        gmail_page_size: 500,
        gmail_access_token: Some(String::from("test_token")),
        gmail_client_id: None,
        gmail_client_secret: None,
        gmail_refresh_token: None,
        oauth_token_url: format!("{}/token", api_url),
    }
}

/// Mock one page of `users.messages.list`. The first page is matched by
/// the absence of a page token since it is always the last parameter.
pub async fn mock_list_page(
    server: &mut ServerGuard,
    page_token: Option<&str>,
    ids: &[&str],
    next_page_token: Option<&str>,
) -> Mock {
    let query = match page_token {
        Some(token) => Matcher::Regex(format!("&pageToken={}$", token)),
        None => Matcher::Regex(r"^labelIds=INBOX&maxResults=500&q=[^&]+$".to_string()),
    };
    let messages: Vec<_> = ids
        .iter()
        .map(|id| json!({"id": id, "threadId": format!("thr_{}", id)}))
        .collect();
    let body = json!({
        "messages": messages,
        "nextPageToken": next_page_token,
        "resultSizeEstimate": ids.len(),
    });
    server
        .mock("GET", "/gmail/v1/users/me/messages")
        .match_header("authorization", "Bearer test_token")
        .match_query(query)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(1)
        .create_async()
        .await
}

/// Mock `users.messages.get` returning `body` verbatim
pub async fn mock_message(server: &mut ServerGuard, id: &str, status: usize, body: &str) -> Mock {
    server
        .mock("GET", format!("/gmail/v1/users/me/messages/{}", id).as_str())
        .match_query(Matcher::UrlEncoded("format".into(), "full".into()))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

/// Full-format message JSON with an optional From header
pub fn message_json(id: &str, from: Option<&str>, internal_date: &str, size: u64) -> String {
    let mut headers = vec![json!({"name": "Subject", "value": format!("Issue {}", id)})];
    if let Some(from) = from {
        headers.push(json!({"name": "From", "value": from}));
    }
    json!({
        "id": id,
        "threadId": format!("thr_{}", id),
        "labelIds": ["INBOX", "CATEGORY_UPDATES"],
        "snippet": "Read this week's issue online",
        "sizeEstimate": size,
        "internalDate": internal_date,
        "payload": {
            "mimeType": "multipart/alternative",
            "headers": headers,
        }
    })
    .to_string()
}
