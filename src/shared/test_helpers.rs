#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::core::config::RecipientsConfig;
#[cfg(test)]
use crate::modules::email::{EmailError, EmailGateway, EmailMessage};
#[cfg(test)]
use crate::modules::storage::RecipientStore;

/// In-memory gateway that records every send attempt. Attempts addressed to
/// `fail_for` are recorded and then fail, so tests can break exactly one of
/// the two pipeline sends.
#[cfg(test)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
    fail_for: Option<String>,
}

#[cfg(test)]
impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_for: None,
        }
    }

    pub fn failing_for(address: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_for: Some(address.into()),
        }
    }

    /// Every attempted message, in send order.
    pub fn attempts(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl EmailGateway for RecordingMailer {
    fn verify(&self) -> Result<(), EmailError> {
        Ok(())
    }

    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        let to = message.to.clone();
        self.sent.lock().unwrap().push(message);

        if self.fail_for.as_deref() == Some(to.as_str()) {
            return Err(EmailError::Send(format!("injected failure for {}", to)));
        }

        Ok(())
    }
}

/// Store backed by a fresh temp directory, so tests never share state.
#[cfg(test)]
pub fn temp_recipient_store(env_fallbacks: HashMap<u8, String>) -> RecipientStore {
    let dir = std::env::temp_dir().join(format!("report-portal-test-{}", Uuid::new_v4()));
    RecipientStore::new(&RecipientsConfig {
        path: dir.join("report_emails.json"),
        org_file_prefix: "SAL".to_string(),
        env_fallbacks,
    })
}
