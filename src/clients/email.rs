use async_trait::async_trait;
use serde::Serialize;
use tracing::instrument;

use super::{build_http_client, upstream_error};
use crate::config::EmailConfig;
use crate::errors::ServiceError;
use crate::tracing::with_metrics;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), ServiceError>;
}

/// Sends mail through a Resend-compatible `POST /emails` API.
#[derive(Clone)]
pub struct ResendEmailSender {
    client: reqwest::Client,
    config: EmailConfig,
}

#[derive(Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

impl ResendEmailSender {
    pub fn new(config: EmailConfig) -> Result<Self, ServiceError> {
        Ok(Self {
            client: build_http_client(config.timeout_secs)?,
            config,
        })
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    #[instrument(skip(self, message), fields(recipients = message.to.len()))]
    async fn send(&self, message: &EmailMessage) -> Result<(), ServiceError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| upstream_error("email", "no API key configured"))?;

        let body = SendEmailBody {
            from: &self.config.from_address,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
        };

        with_metrics("email.send", || async {
            let response = self
                .client
                .post(&self.config.api_url)
                .bearer_auth(api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| upstream_error("email", e))?;

            if response.status().is_success() {
                Ok(())
            } else {
                Err(upstream_error(
                    "email",
                    format!("provider returned {}", response.status()),
                ))
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn posts_message_with_configured_sender() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(body_partial_json(serde_json::json!({
                "from": "Telar <noreply@telar.co>",
                "to": ["buyer@example.com"],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "em_1"})))
            .expect(1)
            .mount(&server)
            .await;

        let sender = ResendEmailSender::new(EmailConfig {
            api_url: format!("{}/emails", server.uri()),
            api_key: Some("re_test".into()),
            ..Default::default()
        })
        .unwrap();

        sender
            .send(&EmailMessage {
                to: vec!["buyer@example.com".into()],
                subject: "Hola".into(),
                html: "<p>hola</p>".into(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn provider_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let sender = ResendEmailSender::new(EmailConfig {
            api_url: server.uri(),
            api_key: Some("re_test".into()),
            ..Default::default()
        })
        .unwrap();

        let err = sender
            .send(&EmailMessage {
                to: vec!["x@example.com".into()],
                subject: "s".into(),
                html: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ExternalServiceError(_)));
    }
}
