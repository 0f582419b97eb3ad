//! Notifier trait for delivering text messages

use async_trait::async_trait;

/// Trait for delivering a text message to a chat
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Deliver `text` to `chat_id`
    async fn deliver(&self, chat_id: &str, text: &str) -> crate::Result<()>;
}
