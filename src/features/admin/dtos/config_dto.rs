use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::storage::{RecipientDocument, ReportEmailEntry};

/// One recipient entry as it appears on the wire.
///
/// Email format is validated by the store (all-or-nothing across the whole
/// update); the DTO only requires the display names to be present.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportEmailEntryDto {
    /// Short report code (e.g. "NCSR")
    #[validate(length(min = 1, message = "reportName is required"))]
    pub report_name: String,
    /// Report display name
    #[validate(length(min = 1, message = "fullName is required"))]
    pub full_name: String,
    /// Recipient email; empty until configured
    #[serde(default)]
    pub email: String,
}

/// Response DTO mirroring the persisted configuration document
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponseDto {
    pub report_emails: BTreeMap<u8, ReportEmailEntryDto>,
    pub last_updated: DateTime<Utc>,
    pub updated_by: String,
}

/// Request DTO for a full or partial configuration update
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigDto {
    pub report_emails: BTreeMap<u8, ReportEmailEntryDto>,
    #[serde(default)]
    pub updated_by: Option<String>,
}

/// Response DTO for a configuration update: the persisted snapshot plus the
/// number of fields whose value actually changed
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigResponseDto {
    pub report_emails: BTreeMap<u8, ReportEmailEntryDto>,
    pub last_updated: DateTime<Utc>,
    pub updated_by: String,
    pub changed_fields: usize,
}

impl From<ReportEmailEntryDto> for ReportEmailEntry {
    fn from(dto: ReportEmailEntryDto) -> Self {
        Self {
            report_name: dto.report_name,
            full_name: dto.full_name,
            email: dto.email,
        }
    }
}

impl From<ReportEmailEntry> for ReportEmailEntryDto {
    fn from(entry: ReportEmailEntry) -> Self {
        Self {
            report_name: entry.report_name,
            full_name: entry.full_name,
            email: entry.email,
        }
    }
}

impl From<RecipientDocument> for ConfigResponseDto {
    fn from(document: RecipientDocument) -> Self {
        Self {
            report_emails: document
                .report_emails
                .into_iter()
                .map(|(id, entry)| (id, entry.into()))
                .collect(),
            last_updated: document.last_updated,
            updated_by: document.updated_by,
        }
    }
}
