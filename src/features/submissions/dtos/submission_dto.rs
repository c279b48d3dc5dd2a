use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upload request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadReportDto {
    /// Submitter name
    #[schema(example = "Pat Example")]
    pub user_name: String,
    /// Submitter email (receives the confirmation)
    #[schema(example = "pat@example.org")]
    pub user_email: String,
    /// Submitter title
    #[schema(example = "Adjutant")]
    pub user_title: String,
    /// Squadron number, digits only
    #[schema(example = "42")]
    pub squadron_number: String,
    /// District number (1-17, excluding 10)
    #[schema(example = "5")]
    pub district_number: String,
    /// The report file to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Text fields of a report submission, as posted by the upload form
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub user_name: String,
    pub user_email: String,
    pub user_title: String,
    pub squadron_number: String,
    pub district_number: String,
}

/// The uploaded file part
#[derive(Debug, Clone)]
pub struct SubmissionFile {
    pub data: Vec<u8>,
    pub original_name: String,
    pub content_type: String,
}

/// Success response for a report submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponseDto {
    pub success: bool,
    /// Server-derived canonical filename
    pub file_name: String,
}
