use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{
    ConfigResponseDto, UpdateConfigDto, UpdateConfigResponseDto,
};
use crate::features::reports::models::report_type;
use crate::modules::email::{templates, EmailError, EmailGateway, EmailMessage};
use crate::modules::storage::RecipientStore;
use crate::shared::service_year::current_service_year;

/// Report id used by the test-email probe
const TEST_EMAIL_REPORT_ID: u8 = 1;

/// Service for admin configuration operations
pub struct AdminConfigService {
    store: Arc<RecipientStore>,
    mailer: Arc<dyn EmailGateway>,
    from_email: String,
}

impl AdminConfigService {
    pub fn new(
        store: Arc<RecipientStore>,
        mailer: Arc<dyn EmailGateway>,
        from_email: String,
    ) -> Self {
        Self {
            store,
            mailer,
            from_email,
        }
    }

    /// Read the current configuration document
    pub async fn config(&self) -> Result<ConfigResponseDto> {
        Ok(self.store.document().await?.into())
    }

    /// Apply a configuration update.
    ///
    /// Email validation is all-or-nothing inside the store; nothing is
    /// written when any supplied value is malformed.
    pub async fn update(&self, dto: UpdateConfigDto) -> Result<UpdateConfigResponseDto> {
        let entries = dto
            .report_emails
            .into_iter()
            .map(|(id, entry)| (id, entry.into()))
            .collect();
        let actor = dto.updated_by.unwrap_or_default();

        let (document, changed_fields) = self.store.update(entries, &actor).await?;

        Ok(UpdateConfigResponseDto {
            report_emails: document
                .report_emails
                .into_iter()
                .map(|(id, entry)| (id, entry.into()))
                .collect(),
            last_updated: document.last_updated,
            updated_by: document.updated_by,
            changed_fields,
        })
    }

    /// Send a canned notification through the active transport so an admin
    /// can confirm email delivery works end to end.
    pub async fn send_test_email(&self) -> Result<()> {
        let Some(report) = report_type(TEST_EMAIL_REPORT_ID) else {
            return Err(AppError::Internal(
                "Report directory is missing the test report id".to_string(),
            ));
        };

        let recipient = self.store.recipient(report.id).await.ok_or_else(|| {
            AppError::Configuration(format!(
                "No recipient email configured for report id {}",
                report.id
            ))
        })?;

        let ctx = templates::SubmissionEmailContext {
            report_code: report.code.to_string(),
            report_name: report.full_name.to_string(),
            user_name: "Test User".to_string(),
            user_title: "Test Title".to_string(),
            user_email: "test@example.com".to_string(),
            squadron_number: "123".to_string(),
            district_number: "4".to_string(),
            file_name: "test.pdf".to_string(),
            submitted_at: chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
            service_year: current_service_year(),
        };
        let (text_body, html_body) = templates::render_notification(&ctx)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let message = EmailMessage {
            from: self.from_email.clone(),
            to: recipient.clone(),
            subject: format!("[TEST] {}", templates::notification_subject(report.code)),
            text_body,
            html_body,
            attachments: Vec::new(),
        };

        self.mailer.send(message).await.map_err(|e| match e {
            EmailError::Configuration(msg) => AppError::Configuration(msg),
            EmailError::Send(msg) => AppError::EmailDispatch(msg),
        })?;

        tracing::info!(to = %recipient, "Test email sent");

        Ok(())
    }
}
