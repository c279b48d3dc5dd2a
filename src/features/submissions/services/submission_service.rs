use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::core::error::AppError;
use crate::features::reports::models::{
    is_extension_allowed, is_mime_type_allowed, report_type, ReportType,
};
use crate::features::submissions::dtos::{SubmissionFile, SubmissionForm};
use crate::modules::email::{
    templates, EmailAttachment, EmailGateway, EmailMessage,
};
use crate::modules::storage::RecipientStore;
use crate::shared::constants::{FILENAME_DATE_FORMAT, MAX_FILE_SIZE};
use crate::shared::service_year::current_service_year;
use crate::shared::validation::{is_valid_district, EMAIL_REGEX, SQUADRON_NUMBER_REGEX};

/// Everything that can go wrong with a submission.
///
/// All variants except a confirmation-side `EmailDispatchFailed` are fatal to
/// the request; the confirmation failure is handled inside `submit` and never
/// escapes.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Unknown report id: {0}")]
    InvalidReportId(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for field: {0}")]
    InvalidFormat(&'static str),

    #[error("File size exceeds 10MB limit")]
    FileTooLarge,

    #[error("Invalid file type. Allowed types: .xlsx, .xls, .docx, .doc, .pdf")]
    UnsupportedFileType,

    #[error("No recipient email configured for report id {0}")]
    RecipientNotConfigured(u8),

    #[error("Failed to send notification email: {0}")]
    EmailDispatchFailed(String),
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::InvalidReportId(_)
            | SubmissionError::MissingField(_)
            | SubmissionError::InvalidFormat(_)
            | SubmissionError::FileTooLarge
            | SubmissionError::UnsupportedFileType => AppError::BadRequest(err.to_string()),
            SubmissionError::RecipientNotConfigured(_) => AppError::Configuration(err.to_string()),
            SubmissionError::EmailDispatchFailed(_) => AppError::EmailDispatch(err.to_string()),
        }
    }
}

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub file_name: String,
}

/// Orchestrates the submission pipeline: validate, derive the filename,
/// resolve the recipient, send the notification (fatal on failure) and the
/// confirmation (logged on failure).
pub struct SubmissionService {
    store: Arc<RecipientStore>,
    mailer: Arc<dyn EmailGateway>,
    from_email: String,
    org_file_prefix: String,
}

impl SubmissionService {
    pub fn new(
        store: Arc<RecipientStore>,
        mailer: Arc<dyn EmailGateway>,
        from_email: String,
        org_file_prefix: String,
    ) -> Self {
        Self {
            store,
            mailer,
            from_email,
            org_file_prefix,
        }
    }

    pub async fn submit(
        &self,
        report_id: &str,
        form: SubmissionForm,
        file: SubmissionFile,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        // Reject unknown report ids before any further work
        let report = report_id
            .parse::<u8>()
            .ok()
            .and_then(report_type)
            .ok_or_else(|| SubmissionError::InvalidReportId(report_id.to_string()))?;

        Self::validate_form(&form)?;
        let extension = Self::validate_file(&file)?;

        let file_name = self.derive_file_name(
            report,
            &form.squadron_number,
            &extension,
            Utc::now().date_naive(),
        );

        let recipient = self
            .store
            .recipient(report.id)
            .await
            .ok_or(SubmissionError::RecipientNotConfigured(report.id))?;

        let ctx = templates::SubmissionEmailContext {
            report_code: report.code.to_string(),
            report_name: report.full_name.to_string(),
            user_name: form.user_name.clone(),
            user_title: form.user_title.clone(),
            user_email: form.user_email.clone(),
            squadron_number: form.squadron_number.clone(),
            district_number: form.district_number.clone(),
            file_name: file_name.clone(),
            submitted_at: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
            service_year: current_service_year(),
        };

        // Notification first; the recipient copy is the record of truth and
        // gates the whole submission.
        let (text_body, html_body) = templates::render_notification(&ctx)
            .map_err(|e| SubmissionError::EmailDispatchFailed(e.to_string()))?;
        let notification = EmailMessage {
            from: self.from_email.clone(),
            to: recipient.clone(),
            subject: templates::notification_subject(report.code),
            text_body,
            html_body,
            attachments: vec![EmailAttachment {
                filename: file_name.clone(),
                content: file.data,
                content_type: file.content_type,
            }],
        };
        self.mailer
            .send(notification)
            .await
            .map_err(|e| SubmissionError::EmailDispatchFailed(e.to_string()))?;

        info!(
            report = report.code,
            squadron = %form.squadron_number,
            recipient = %recipient,
            file = %file_name,
            "Report submission forwarded"
        );

        // Confirmation is a courtesy; a failure here must not fail the
        // submission.
        match templates::render_confirmation(&ctx) {
            Ok((text_body, html_body)) => {
                let confirmation = EmailMessage {
                    from: self.from_email.clone(),
                    to: form.user_email.clone(),
                    subject: templates::confirmation_subject(report.code),
                    text_body,
                    html_body,
                    attachments: Vec::new(),
                };
                if let Err(e) = self.mailer.send(confirmation).await {
                    warn!(to = %form.user_email, "Confirmation email failed: {}", e);
                }
            }
            Err(e) => warn!("Confirmation email not rendered: {}", e),
        }

        Ok(SubmissionOutcome { file_name })
    }

    fn validate_form(form: &SubmissionForm) -> Result<(), SubmissionError> {
        for (name, value) in [
            ("userName", &form.user_name),
            ("userEmail", &form.user_email),
            ("userTitle", &form.user_title),
            ("squadronNumber", &form.squadron_number),
            ("districtNumber", &form.district_number),
        ] {
            if value.trim().is_empty() {
                return Err(SubmissionError::MissingField(name));
            }
        }

        if !EMAIL_REGEX.is_match(&form.user_email) {
            return Err(SubmissionError::InvalidFormat("userEmail"));
        }
        if !SQUADRON_NUMBER_REGEX.is_match(&form.squadron_number) {
            return Err(SubmissionError::InvalidFormat("squadronNumber"));
        }
        let district_valid = form
            .district_number
            .parse::<u8>()
            .map(is_valid_district)
            .unwrap_or(false);
        if !district_valid {
            return Err(SubmissionError::InvalidFormat("districtNumber"));
        }

        Ok(())
    }

    /// Check extension AND declared content type against the allow-lists and
    /// the size cap. Returns the validated extension, lowercased.
    fn validate_file(file: &SubmissionFile) -> Result<String, SubmissionError> {
        let extension = file
            .original_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .ok_or(SubmissionError::UnsupportedFileType)?;

        // Both checks matter: a client can spoof the content type or the
        // extension independently.
        if !is_extension_allowed(&extension) || !is_mime_type_allowed(&file.content_type) {
            return Err(SubmissionError::UnsupportedFileType);
        }

        if file.data.len() > MAX_FILE_SIZE {
            return Err(SubmissionError::FileTooLarge);
        }

        Ok(extension)
    }

    fn derive_file_name(
        &self,
        report: &ReportType,
        squadron_number: &str,
        extension: &str,
        date: NaiveDate,
    ) -> String {
        format!(
            "{}-SQ{}-{}-{}.{}",
            self.org_file_prefix,
            squadron_number,
            report.file_token(),
            date.format(FILENAME_DATE_FORMAT),
            extension
        )
    }
}
