use async_trait::async_trait;
use thiserror::Error;

use crate::modules::email::message::EmailMessage;

/// Errors from the email gateway.
///
/// `Configuration` means the transport can never work as configured (missing
/// credentials, bad endpoint); `Send` means this particular attempt failed.
/// Callers can tell the two apart, but nothing in the system retries: every
/// message gets exactly one attempt.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("email transport is not configured: {0}")]
    Configuration(String),

    #[error("failed to send email: {0}")]
    Send(String),
}

/// Uniform send contract over the active email backend.
///
/// The submission pipeline holds an `Arc<dyn EmailGateway>` and never
/// branches on which transport is behind it.
#[async_trait]
pub trait EmailGateway: Send + Sync {
    /// Check transport configuration without sending anything.
    fn verify(&self) -> Result<(), EmailError>;

    /// Send one message. One attempt, no retries.
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError>;
}
