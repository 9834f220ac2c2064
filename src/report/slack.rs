//! Slack Web API sink (`chat.postMessage`)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::SlackConfig;
use crate::report::error::DeliveryError;
use crate::report::sink::{MessageId, NotificationSink, Post};

/// Posts messages to a Slack channel as an installed app
pub struct SlackSink {
    client: Client,
    config: SlackConfig,
}

impl SlackSink {
    pub fn new(config: SlackConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

/// Form body of `chat.postMessage`
#[derive(Debug, Serialize)]
struct PostMessageForm<'a> {
    channel: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_emoji: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_ts: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    ts: Option<String>,
    error: Option<String>,
}

#[async_trait]
impl NotificationSink for SlackSink {
    async fn post(&self, post: &Post) -> Result<MessageId, DeliveryError> {
        let form = PostMessageForm {
            channel: &self.config.channel,
            text: &post.text,
            token: self.config.token.as_deref(),
            username: post.username.as_deref(),
            icon_emoji: post.icon_emoji.as_deref(),
            thread_ts: post.thread_ts.as_ref().map(MessageId::as_str),
        };
        debug!("Posting to #{}: {:?}", self.config.channel, post);

        let response = self
            .client
            .post(&self.config.api_url)
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DeliveryError::InvalidResponse(format!(
                "Slack API returned status {}",
                response.status()
            )));
        }

        let body: PostMessageResponse = response
            .json()
            .await
            .map_err(|e| DeliveryError::InvalidResponse(e.to_string()))?;

        if !body.ok {
            return Err(DeliveryError::Rejected(
                body.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        let ts = body.ts.ok_or_else(|| {
            DeliveryError::InvalidResponse("response has no message ts".to_string())
        })?;

        info!("Posted message {} to #{}", ts, self.config.channel);

        if self.config.post_delay_ms > 0 {
            sleep(Duration::from_millis(self.config.post_delay_ms)).await;
        }

        Ok(MessageId(ts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn config(api_url: String) -> SlackConfig {
        SlackConfig {
            channel: "deps".to_string(),
            api_url,
            token: Some("xoxb-test".to_string()),
            post_delay_ms: 0,
        }
    }

    #[tokio::test]
    async fn post_sends_form_and_returns_ts() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat.postMessage")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("channel".to_string(), "deps".to_string()),
                Matcher::UrlEncoded("token".to_string(), "xoxb-test".to_string()),
                Matcher::UrlEncoded("text".to_string(), " ".to_string()),
                Matcher::UrlEncoded(
                    "username".to_string(),
                    "requests | 1.9.0 ➪ 2.0.0".to_string(),
                ),
                Matcher::UrlEncoded("icon_emoji".to_string(), ":arrow_up:".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": true, "channel": "C123", "ts": "1700000000.000100"}"#)
            .create_async()
            .await;

        let sink = SlackSink::new(config(format!("{}/api/chat.postMessage", server.url())));
        let post = Post {
            text: " ".to_string(),
            username: Some("requests | 1.9.0 ➪ 2.0.0".to_string()),
            icon_emoji: Some(":arrow_up:".to_string()),
            thread_ts: None,
        };

        let id = sink.post(&post).await.unwrap();

        mock.assert_async().await;
        assert_eq!(id, MessageId("1700000000.000100".to_string()));
    }

    #[tokio::test]
    async fn post_sends_thread_ts_for_replies() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat.postMessage")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("text".to_string(), "svc-a\nsvc-b".to_string()),
                Matcher::UrlEncoded("thread_ts".to_string(), "1700000000.000100".to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"ok": true, "ts": "1700000000.000200"}"#)
            .create_async()
            .await;

        let sink = SlackSink::new(config(format!("{}/api/chat.postMessage", server.url())));
        let post = Post {
            thread_ts: Some(MessageId("1700000000.000100".to_string())),
            ..Post::text("svc-a\nsvc-b")
        };

        let id = sink.post(&post).await.unwrap();

        mock.assert_async().await;
        assert_eq!(id.as_str(), "1700000000.000200");
    }

    #[tokio::test]
    async fn post_returns_rejected_when_not_ok() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat.postMessage")
            .with_status(200)
            .with_body(r#"{"ok": false, "error": "invalid_auth"}"#)
            .create_async()
            .await;

        let sink = SlackSink::new(config(format!("{}/api/chat.postMessage", server.url())));
        let result = sink.post(&Post::text("hello")).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(DeliveryError::Rejected(e)) if e == "invalid_auth"));
    }

    #[tokio::test]
    async fn post_returns_invalid_response_for_server_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat.postMessage")
            .with_status(500)
            .create_async()
            .await;

        let sink = SlackSink::new(config(format!("{}/api/chat.postMessage", server.url())));
        let result = sink.post(&Post::text("hello")).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(DeliveryError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn post_handles_network_error() {
        let sink = SlackSink::new(config("http://invalid.localhost.test:99999".to_string()));
        let result = sink.post(&Post::text("hello")).await;

        assert!(matches!(result, Err(DeliveryError::Network(_))));
    }
}
