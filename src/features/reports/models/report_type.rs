//! The report directory: one record per report form a squadron may submit.
//!
//! Every part of the pipeline (validation, filename derivation, recipient
//! resolution, seeding) consults this single table.

use std::collections::BTreeMap;

use crate::modules::storage::ReportEmailEntry;

/// One of the ten fixed report forms, keyed by a stable id (1..=10)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportType {
    pub id: u8,
    /// Short code shown in email subjects and the admin UI (e.g. "VA&R")
    pub code: &'static str,
    pub full_name: &'static str,
}

pub const REPORT_TYPES: [ReportType; 10] = [
    ReportType {
        id: 1,
        code: "NCSR",
        full_name: "National Consolidated Squadron Report",
    },
    ReportType {
        id: 2,
        code: "DCSR",
        full_name: "Detachment Consolidated Squadron Report",
    },
    ReportType {
        id: 3,
        code: "VA&R",
        full_name: "Veterans Affairs & Rehabilitation",
    },
    ReportType {
        id: 4,
        code: "VAVS-VOY",
        full_name: "VAVS Volunteer of the Year",
    },
    ReportType {
        id: 5,
        code: "AMERICANISM",
        full_name: "Americanism",
    },
    ReportType {
        id: 6,
        code: "C&Y",
        full_name: "Children & Youth",
    },
    ReportType {
        id: 7,
        code: "SIR",
        full_name: "Squadron Information Report",
    },
    ReportType {
        id: 8,
        code: "SDR",
        full_name: "Annual Squadron Data Report",
    },
    ReportType {
        id: 9,
        code: "SOC",
        full_name: "Squadron Officer Change",
    },
    ReportType {
        id: 10,
        code: "DOR",
        full_name: "District Officers Report",
    },
];

/// Look up a report type by id.
pub fn report_type(id: u8) -> Option<&'static ReportType> {
    REPORT_TYPES.iter().find(|r| r.id == id)
}

impl ReportType {
    /// Filename-safe token for the short code ("VA&R" -> "VAR").
    pub fn file_token(&self) -> String {
        self.code
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect()
    }
}

/// File extensions accepted for report uploads
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["xlsx", "xls", "docx", "doc", "pdf"];

/// MIME types accepted for report uploads. Extension and declared content
/// type are checked independently; a client can spoof either one.
pub const ALLOWED_MIME_TYPES: [&str; 5] = [
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
    "application/pdf",
];

pub fn is_extension_allowed(extension: &str) -> bool {
    let extension = extension.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&extension.as_str())
}

pub fn is_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&content_type)
}

/// Seed entries for the recipient configuration store: every report type
/// with its directory names and an empty email.
pub fn default_recipient_entries() -> BTreeMap<u8, ReportEmailEntry> {
    REPORT_TYPES
        .iter()
        .map(|r| {
            (
                r.id,
                ReportEmailEntry {
                    report_name: r.code.to_string(),
                    full_name: r.full_name.to_string(),
                    email: String::new(),
                },
            )
        })
        .collect()
}
