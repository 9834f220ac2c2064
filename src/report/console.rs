//! Sink printing posts to stdout, for dry runs

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::report::error::DeliveryError;
use crate::report::sink::{MessageId, NotificationSink, Post};

#[derive(Debug, Default)]
pub struct ConsoleSink {
    next_id: AtomicU64,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Render a post as it would roughly appear in the channel
fn render(post: &Post) -> String {
    let mut header = String::new();
    if let Some(icon) = &post.icon_emoji {
        header.push_str(icon);
        header.push(' ');
    }
    if let Some(username) = &post.username {
        header.push_str(username);
    }

    let body = if header.is_empty() {
        post.text.clone()
    } else if post.text.trim().is_empty() {
        header
    } else {
        format!("{}\n{}", header, post.text)
    };

    match &post.thread_ts {
        Some(_) => body
            .lines()
            .map(|line| format!("    | {}", line))
            .collect::<Vec<_>>()
            .join("\n"),
        None => body,
    }
}

#[async_trait]
impl NotificationSink for ConsoleSink {
    async fn post(&self, post: &Post) -> Result<MessageId, DeliveryError> {
        println!("{}", render(post));
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(MessageId(id.to_string()))
    }
}
