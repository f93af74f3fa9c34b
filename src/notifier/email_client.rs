//! HTTP email API client
//!
//! Sends emails through a Postmark-compatible REST API.

use crate::notifier::{Mailer, NotifyError, OutgoingEmail};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

const SERVER_TOKEN_HEADER: &str = "X-Postmark-Server-Token";

/// Client for a Postmark-compatible email API
#[derive(Debug, Clone)]
pub struct EmailClient {
    http_client: reqwest::Client,
    base_url: String,
    api_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

impl EmailClient {
    /// Create a client
    ///
    /// # Arguments
    /// * `base_url` - API root, without the `/email` path
    /// * `api_token` - Server token sent with every request
    /// * `timeout` - Upper bound on a single send
    pub fn new(base_url: String, api_token: String, timeout: Duration) -> Result<Self, NotifyError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(NotifyError::ClientBuild)?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }
}

#[async_trait]
impl Mailer for EmailClient {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), NotifyError> {
        let url = format!("{}/email", self.base_url);
        let request_body = SendEmailRequest {
            from: &email.from,
            to: &email.to,
            subject: &email.subject,
            text_body: &email.text_body,
            reply_to: email.reply_to.as_deref(),
        };

        tracing::debug!(
            url = %url,
            to = %email.to,
            subject = %email.subject,
            "Calling email API"
        );

        let response = self
            .http_client
            .post(&url)
            .header(SERVER_TOKEN_HEADER, &self.api_token)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status.as_u16(),
                error_body = %body,
                "Email API returned error status"
            );

            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(to = %email.to, "Email accepted by API");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn email(reply_to: Option<&str>) -> OutgoingEmail {
        OutgoingEmail {
            from: "noreply@example.com".to_string(),
            to: "owner@example.com".to_string(),
            subject: "New message from Ada".to_string(),
            text_body: "Hello".to_string(),
            reply_to: reply_to.map(str::to_string),
        }
    }

    fn client(base_url: &str) -> EmailClient {
        EmailClient::new(
            base_url.to_string(),
            "test-token".to_string(),
            Duration::from_secs(2),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_send_posts_expected_payload() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/email")
            .match_header("x-postmark-server-token", "test-token")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "From": "noreply@example.com",
                "To": "owner@example.com",
                "Subject": "New message from Ada",
                "TextBody": "Hello",
                "ReplyTo": "ada@example.com"
            })))
            .with_status(200)
            .with_body(r#"{"ErrorCode": 0, "Message": "OK"}"#)
            .create_async()
            .await;

        let result = client(&server.url()).send(&email(Some("ada@example.com"))).await;

        mock.assert_async().await;
        assert!(result.is_ok(), "send failed: {:?}", result);
    }

    #[tokio::test]
    async fn test_send_omits_missing_reply_to() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/email")
            .match_body(Matcher::Json(json!({
                "From": "noreply@example.com",
                "To": "owner@example.com",
                "Subject": "New message from Ada",
                "TextBody": "Hello"
            })))
            .with_status(200)
            .create_async()
            .await;

        let base_url = format!("{}/", server.url());
        let result = client(&base_url).send(&email(None)).await;

        mock.assert_async().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_send_error_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/email")
            .with_status(500)
            .with_body("upstream failure")
            .create_async()
            .await;

        let result = client(&server.url()).send(&email(None)).await;

        mock.assert_async().await;
        match result {
            Err(NotifyError::Rejected { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream failure");
            }
            other => panic!("Expected Rejected error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_unreachable_server() {
        // nothing listens on port 9 (discard) on a test machine
        let result = client("http://127.0.0.1:9").send(&email(None)).await;
        assert!(matches!(result, Err(NotifyError::Transport(_))));
    }
}
