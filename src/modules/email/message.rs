/// File attached to an outbound email
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
    pub content_type: String,
}

/// Transport-agnostic outbound email.
///
/// Built twice per successful submission: the notification to the configured
/// recipient (with the uploaded file attached) and the confirmation back to
/// the submitter (no attachment).
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
    pub attachments: Vec<EmailAttachment>,
}
