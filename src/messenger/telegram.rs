// =============================================================================
// Telegram Delivery — Bot API sendMessage
// =============================================================================
//
// Credentials come from the environment (TELEGRAM_BOT_TOKEN and
// TELEGRAM_CHAT_ID). The message body is truncated to stay well under the
// API's 4096-character ceiling. The token is part of the request URL, so it
// is never logged and the client's Debug impl redacts it.
// =============================================================================

use anyhow::{Context, Result};
use tracing::{debug, instrument};

/// Character budget for one message, kept under Telegram's 4096 limit.
const MAX_MESSAGE_CHARS: usize = 3900;

/// Telegram Bot API client for a single chat.
#[derive(Clone)]
pub struct TelegramMessenger {
    token: String,
    chat_id: String,
    base_url: String,
    client: reqwest::Client,
}

impl TelegramMessenger {
    /// Build a messenger from `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("TELEGRAM_BOT_TOKEN")
            .context("TELEGRAM_BOT_TOKEN is not set")?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID")
            .context("TELEGRAM_CHAT_ID is not set")?;
        Ok(Self::new(token, chat_id))
    }

    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build reqwest client");

        Self {
            token: token.into(),
            chat_id: chat_id.into(),
            base_url: "https://api.telegram.org".to_string(),
            client,
        }
    }

    /// Send `body` as a Markdown message, truncated to the API budget.
    #[instrument(skip(self, body), name = "telegram::send")]
    pub async fn send(&self, body: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let payload = serde_json::json!({
            "chat_id": self.chat_id,
            "text": truncate_chars(body, MAX_MESSAGE_CHARS),
            "disable_web_page_preview": true,
            "parse_mode": "Markdown",
        });

        let resp = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .context("POST sendMessage request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("Telegram error {status}: {text}");
        }

        debug!(chars = body.chars().count(), "telegram message sent");
        Ok(())
    }
}

/// Truncate to at most `max` characters without splitting a code point.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

impl std::fmt::Debug for TelegramMessenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramMessenger")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_string_unchanged() {
        assert_eq!(truncate_chars("hello", 3900), "hello");
    }

    #[test]
    fn truncate_long_string_to_budget() {
        let long = "x".repeat(5000);
        assert_eq!(truncate_chars(&long, 3900).chars().count(), 3900);
    }

    #[test]
    fn truncate_respects_multibyte_boundaries() {
        let emojis = "📊".repeat(10);
        let cut = truncate_chars(&emojis, 4);
        assert_eq!(cut.chars().count(), 4);
        assert!(cut.chars().all(|c| c == '📊'));
    }

    #[test]
    fn debug_redacts_token() {
        let m = TelegramMessenger::new("secret-token", "12345");
        let dbg = format!("{m:?}");
        assert!(!dbg.contains("secret-token"));
        assert!(dbg.contains("<redacted>"));
    }
}
