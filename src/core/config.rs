use std::env;

/// Gmail caps `maxResults` on the messages list endpoint at 500
pub const MAX_PAGE_SIZE: u32 = 500;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub gmail_api_url: String,
    pub gmail_user_id: String,
    pub gmail_label_id: String,
    pub gmail_page_size: u32,
    pub gmail_access_token: Option<String>,
    pub gmail_client_id: Option<String>,
    pub gmail_client_secret: Option<String>,
    pub gmail_refresh_token: Option<String>,
    pub oauth_token_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let gmail_api_url = env::var("NEWSLETTER_GMAIL_API_URL")
            .unwrap_or_else(|_| "https://gmail.googleapis.com".to_string());
        let gmail_user_id = env::var("NEWSLETTER_GMAIL_USER_ID").unwrap_or_else(|_| "me".to_string());
        let gmail_label_id =
            env::var("NEWSLETTER_GMAIL_LABEL_ID").unwrap_or_else(|_| "INBOX".to_string());
        let gmail_page_size = env::var("NEWSLETTER_GMAIL_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .map(clamp_page_size)
            .unwrap_or(MAX_PAGE_SIZE);
        let oauth_token_url = env::var("NEWSLETTER_OAUTH_TOKEN_URL")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string());

        Self {
            gmail_api_url: gmail_api_url.trim_end_matches('/').to_string(),
            gmail_user_id,
            gmail_label_id,
            gmail_page_size,
            gmail_access_token: non_empty_var("NEWSLETTER_GMAIL_ACCESS_TOKEN"),
            gmail_client_id: non_empty_var("NEWSLETTER_GMAIL_CLIENT_ID"),
            gmail_client_secret: non_empty_var("NEWSLETTER_GMAIL_CLIENT_SECRET"),
            gmail_refresh_token: non_empty_var("NEWSLETTER_GMAIL_REFRESH_TOKEN"),
            oauth_token_url,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub fn clamp_page_size(size: u32) -> u32 {
    size.clamp(1, MAX_PAGE_SIZE)
}
