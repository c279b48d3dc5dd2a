//! HTTP transactional-email provider backend.
//!
//! Posts messages as JSON to the provider endpoint configured via
//! `EMAIL_API_URL`, authenticating with a bearer API key. Attachment bytes
//! travel base64-encoded, as transactional providers expect.

use async_trait::async_trait;
use base64::prelude::*;
use serde::Serialize;

use crate::core::config::HttpApiConfig;
use crate::modules::email::gateway::{EmailError, EmailGateway};
use crate::modules::email::message::EmailMessage;

pub struct HttpApiMailer {
    client: reqwest::Client,
    config: HttpApiConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<ApiAttachment<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiAttachment<'a> {
    filename: &'a str,
    content: String,
    content_type: &'a str,
}

impl HttpApiMailer {
    pub fn new(config: HttpApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn required(&self) -> Result<(&str, &str), EmailError> {
        let mut missing = Vec::new();
        if self.config.base_url.is_none() {
            missing.push("EMAIL_API_URL");
        }
        if self.config.api_key.is_none() {
            missing.push("EMAIL_API_KEY");
        }
        if !missing.is_empty() {
            return Err(EmailError::Configuration(format!(
                "missing {}",
                missing.join(", ")
            )));
        }

        Ok((
            self.config.base_url.as_deref().unwrap(),
            self.config.api_key.as_deref().unwrap(),
        ))
    }
}

#[async_trait]
impl EmailGateway for HttpApiMailer {
    fn verify(&self) -> Result<(), EmailError> {
        self.required().map(|_| ())
    }

    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        let (base_url, api_key) = self.required()?;

        let payload = ApiPayload {
            from: &message.from,
            to: &message.to,
            subject: &message.subject,
            text: &message.text_body,
            html: &message.html_body,
            attachments: message
                .attachments
                .iter()
                .map(|a| ApiAttachment {
                    filename: &a.filename,
                    content: BASE64_STANDARD.encode(&a.content),
                    content_type: &a.content_type,
                })
                .collect(),
        };

        let response = self
            .client
            .post(base_url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| EmailError::Send(format!("provider request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Send(format!(
                "provider returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        tracing::info!(to = %message.to, subject = %message.subject, "Email sent via HTTP provider");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_reports_missing_provider_config() {
        let mailer = HttpApiMailer::new(HttpApiConfig {
            base_url: None,
            api_key: None,
        });

        let err = mailer.verify().unwrap_err();
        match err {
            EmailError::Configuration(msg) => {
                assert!(msg.contains("EMAIL_API_URL"));
                assert!(msg.contains("EMAIL_API_KEY"));
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_passes_with_full_config() {
        let mailer = HttpApiMailer::new(HttpApiConfig {
            base_url: Some("https://api.mail.example/emails".to_string()),
            api_key: Some("key".to_string()),
        });

        assert!(mailer.verify().is_ok());
    }
}
