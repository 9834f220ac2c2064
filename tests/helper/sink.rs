//! Sink test utilities

use std::sync::Mutex;

use async_trait::async_trait;

use pin_report::report::error::DeliveryError;
use pin_report::report::sink::{MessageId, NotificationSink, Post};

/// Sink remembering every post; optionally fails from the n-th post on
#[derive(Default)]
pub struct RecordingSink {
    posts: Mutex<Vec<Post>>,
    fail_from: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_from(index: usize) -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            fail_from: Some(index),
        }
    }

    pub fn posts(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.posts().into_iter().map(|p| p.text).collect()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn post(&self, post: &Post) -> Result<MessageId, DeliveryError> {
        let mut posts = self.posts.lock().unwrap();
        if self.fail_from == Some(posts.len()) {
            return Err(DeliveryError::Rejected("rate_limited".to_string()));
        }
        posts.push(post.clone());
        Ok(MessageId(format!("ts-{}", posts.len())))
    }
}
