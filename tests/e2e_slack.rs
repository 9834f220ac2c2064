//! PyPI + Slack E2E tests against mock servers

use std::sync::Arc;

use mockito::{Matcher, Server};

use pin_report::config::SlackConfig;
use pin_report::diff::{DiffParser, ProjectChange};
use pin_report::report::SlackSink;
use pin_report::run::{RunError, publish};
use pin_report::version::registries::PypiRegistry;

fn slack_config(server: &Server) -> SlackConfig {
    SlackConfig {
        channel: "deps".to_string(),
        api_url: format!("{}/api/chat.postMessage", server.url()),
        token: Some("xoxb-test".to_string()),
        post_delay_ms: 0,
    }
}

#[tokio::test]
async fn publishes_major_upgrade_thread_to_slack() {
    let mut pypi = Server::new_async().await;
    let pypi_mock = pypi
        .mock("GET", "/pypi/django/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"info": {"name": "Django", "version": "4.0.0"}}"#)
        .expect(1)
        .create_async()
        .await;

    let mut slack = Server::new_async().await;
    let border_mock = slack
        .mock("POST", "/api/chat.postMessage")
        .match_body(Matcher::UrlEncoded(
            "text".to_string(),
            "---------------------------------".to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"ok": true, "ts": "100.1"}"#)
        .expect(2)
        .create_async()
        .await;
    let header_mock = slack
        .mock("POST", "/api/chat.postMessage")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("username".to_string(), "Django | 3.2.9 ➪ 4.0.0".to_string()),
            Matcher::UrlEncoded("icon_emoji".to_string(), ":arrow_up:".to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"ok": true, "ts": "100.2"}"#)
        .create_async()
        .await;
    let reply_mock = slack
        .mock("POST", "/api/chat.postMessage")
        .match_body(Matcher::UrlEncoded(
            "thread_ts".to_string(),
            "100.2".to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"ok": true, "ts": "100.3"}"#)
        .expect(2)
        .create_async()
        .await;

    let parser = DiffParser::new(Arc::new(PypiRegistry::new(pypi.url())));
    let lines = ["-django==3.2.9", "+django==4.0.0"];
    let changes = vec![ProjectChange {
        project: "svc-a".to_string(),
        changes: parser.parse(&lines, "svc-a").await.unwrap(),
    }];

    let ids = publish(&changes, &SlackSink::new(slack_config(&slack)))
        .await
        .unwrap();

    pypi_mock.assert_async().await;
    border_mock.assert_async().await;
    header_mock.assert_async().await;
    reply_mock.assert_async().await;
    assert_eq!(ids.len(), 5);
}

#[tokio::test]
async fn rejected_post_fails_the_run() {
    let mut slack = Server::new_async().await;
    let mock = slack
        .mock("POST", "/api/chat.postMessage")
        .with_status(200)
        .with_body(r#"{"ok": false, "error": "not_in_channel"}"#)
        .expect(1)
        .create_async()
        .await;

    let result = publish(&[], &SlackSink::new(slack_config(&slack))).await;

    mock.assert_async().await;
    assert!(matches!(result, Err(RunError::Delivery(_))));
}
