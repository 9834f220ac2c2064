//! Sink trait for delivering notification posts

#[cfg(test)]
use mockall::automock;

use crate::report::error::DeliveryError;

/// Identifier of a delivered message, used to reply in its thread
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single chat message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Post {
    pub text: String,
    /// Replaces the display name of the app
    pub username: Option<String>,
    pub icon_emoji: Option<String>,
    /// Parent message when posting a threaded reply
    pub thread_ts: Option<MessageId>,
}

impl Post {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Destination for notification posts
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one post
    ///
    /// # Returns
    /// * `Ok(MessageId)` - Id of the delivered message
    /// * `Err(DeliveryError)` - If the destination refused or could not be reached
    async fn post(&self, post: &Post) -> Result<MessageId, DeliveryError>;
}
