//! Telegram Bot API notifier

use std::sync::Arc;

use async_trait::async_trait;

use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Default Telegram Bot API base URL
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Sends messages through a Telegram bot
pub struct TelegramNotifier {
    send_message_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier").finish_non_exhaustive()
    }
}

impl TelegramNotifier {
    pub fn new(api_base: &str, bot_token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created TelegramNotifier via {}", api_base);
        Self {
            send_message_url: format!(
                "{}/bot{}/sendMessage",
                api_base.trim_end_matches('/'),
                bot_token
            ),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn deliver(&self, chat_id: &str, text: &str) -> crate::Result<()> {
        let params = [("chat_id", chat_id), ("text", text)];

        tracing::debug!("Sending Telegram message to chat {}", chat_id);

        let response = self.http.post_form(&self.send_message_url, &params).await?;

        if response.status != 200 {
            return Err(crate::HomeworkBotError::Notifier(format!(
                "Telegram API returned status {}: {}",
                response.status, response.body
            )));
        }

        tracing::debug!("Telegram message sent successfully");
        Ok(())
    }
}
