use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::ReportType;
use crate::shared::constants::MAX_FILE_SIZE;

/// Response DTO for one report directory entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportTypeResponseDto {
    /// Stable report identifier (1-10)
    pub id: u8,
    /// Short code (e.g. "NCSR")
    pub code: String,
    /// Display name for the upload form
    pub full_name: String,
    /// Accepted file extensions
    pub allowed_extensions: Vec<String>,
    /// Upload size cap in bytes
    pub max_file_size_bytes: usize,
}

impl From<&ReportType> for ReportTypeResponseDto {
    fn from(report: &ReportType) -> Self {
        Self {
            id: report.id,
            code: report.code.to_string(),
            full_name: report.full_name.to_string(),
            allowed_extensions: crate::features::reports::models::ALLOWED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            max_file_size_bytes: MAX_FILE_SIZE,
        }
    }
}
