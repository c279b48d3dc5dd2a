//! SMTP email backend using the `lettre` crate.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::core::config::SmtpConfig;
use crate::modules::email::gateway::{EmailError, EmailGateway};
use crate::modules::email::message::EmailMessage;

/// SMTP transport over TLS (implicit TLS, port 465 by default).
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Credentials and host, present or a configuration error naming what is
    /// missing.
    fn required(&self) -> Result<(&str, &str, &str), EmailError> {
        let mut missing = Vec::new();
        if self.config.host.is_none() {
            missing.push("SMTP_HOST");
        }
        if self.config.username.is_none() {
            missing.push("SMTP_USER");
        }
        if self.config.password.is_none() {
            missing.push("SMTP_PASS");
        }
        if !missing.is_empty() {
            return Err(EmailError::Configuration(format!(
                "missing {}",
                missing.join(", ")
            )));
        }

        Ok((
            self.config.host.as_deref().unwrap(),
            self.config.username.as_deref().unwrap(),
            self.config.password.as_deref().unwrap(),
        ))
    }

    fn build_message(message: &EmailMessage) -> Result<Message, EmailError> {
        let from: Mailbox = message
            .from
            .parse()
            .map_err(|e| EmailError::Send(format!("invalid from address: {}", e)))?;
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| EmailError::Send(format!("invalid recipient address: {}", e)))?;

        let alternative = MultiPart::alternative()
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_PLAIN)
                    .body(message.text_body.clone()),
            )
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(message.html_body.clone()),
            );

        let builder = Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject.clone());

        if message.attachments.is_empty() {
            return builder
                .multipart(alternative)
                .map_err(|e| EmailError::Send(format!("failed to build email: {}", e)));
        }

        let mut mixed = MultiPart::mixed().multipart(alternative);
        for attachment in &message.attachments {
            let content_type = ContentType::parse(&attachment.content_type).map_err(|e| {
                EmailError::Send(format!(
                    "invalid attachment content type '{}': {}",
                    attachment.content_type, e
                ))
            })?;
            mixed = mixed.singlepart(
                Attachment::new(attachment.filename.clone())
                    .body(attachment.content.clone(), content_type),
            );
        }

        builder
            .multipart(mixed)
            .map_err(|e| EmailError::Send(format!("failed to build email: {}", e)))
    }
}

#[async_trait]
impl EmailGateway for SmtpMailer {
    fn verify(&self) -> Result<(), EmailError> {
        self.required().map(|_| ())
    }

    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        let (host, username, password) = self.required()?;

        let email = Self::build_message(&message)?;

        let credentials = Credentials::new(username.to_string(), password.to_string());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .map_err(|e| EmailError::Send(format!("failed to create SMTP transport: {}", e)))?
            .port(self.config.port)
            .credentials(credentials)
            .build();

        mailer
            .send(email)
            .await
            .map_err(|e| EmailError::Send(e.to_string()))?;

        tracing::info!(to = %message.to, subject = %message.subject, "Email sent via SMTP");

        Ok(())
    }
}
