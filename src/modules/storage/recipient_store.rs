//! File-backed recipient configuration store.
//!
//! Persists the report-id → recipient mapping as a single JSON document.
//! Writes go to a temp file first and are moved into place with a rename, so
//! a reader never observes a half-written document. Writers are serialized
//! with a mutex; concurrency is last-write-wins.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::core::config::RecipientsConfig;
use crate::core::error::{AppError, Result};
use crate::shared::constants::DEFAULT_UPDATED_BY;
use crate::shared::validation::EMAIL_REGEX;

/// One entry per report type in the persisted document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEmailEntry {
    pub report_name: String,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
}

/// The persisted configuration document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientDocument {
    pub report_emails: BTreeMap<u8, ReportEmailEntry>,
    pub last_updated: DateTime<Utc>,
    pub updated_by: String,
}

/// One line in the companion audit log, written per field that actually
/// changed value on an admin update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AuditEntry<'a> {
    report_id: u8,
    field: &'static str,
    old: &'a str,
    new: &'a str,
    actor: &'a str,
    at: DateTime<Utc>,
}

pub struct RecipientStore {
    path: PathBuf,
    audit_path: PathBuf,
    env_fallbacks: HashMap<u8, String>,
    write_lock: Mutex<()>,
}

impl RecipientStore {
    pub fn new(config: &RecipientsConfig) -> Self {
        let mut audit_name = config
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report_emails".to_string());
        audit_name.push_str(".audit.jsonl");
        let audit_path = config.path.with_file_name(audit_name);

        Self {
            path: config.path.clone(),
            audit_path,
            env_fallbacks: config.env_fallbacks.clone(),
            write_lock: Mutex::new(()),
        }
    }

    /// Create the document with the given entries if none exists yet.
    pub async fn ensure_seeded(&self, defaults: BTreeMap<u8, ReportEmailEntry>) -> Result<()> {
        if tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to probe config store: {}", e)))?
        {
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;
        let document = RecipientDocument {
            report_emails: defaults,
            last_updated: Utc::now(),
            updated_by: "System".to_string(),
        };
        self.write_atomic(&document).await?;

        tracing::info!(path = %self.path.display(), "Seeded recipient configuration store");

        Ok(())
    }

    /// Read the full document.
    pub async fn document(&self) -> Result<RecipientDocument> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to read config store {}: {}",
                self.path.display(),
                e
            ))
        })?;

        serde_json::from_str(&raw)
            .map_err(|e| AppError::Internal(format!("Failed to parse config store: {}", e)))
    }

    /// Resolve the recipient email for a report id.
    ///
    /// Precedence: persisted non-empty email, then the `EMAIL_<id>`
    /// environment fallback (trailing `# comment` stripped). A store read
    /// failure also falls back to the environment value.
    pub async fn recipient(&self, report_id: u8) -> Option<String> {
        match self.document().await {
            Ok(document) => {
                if let Some(entry) = document.report_emails.get(&report_id) {
                    if !entry.email.trim().is_empty() {
                        return Some(entry.email.trim().to_string());
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Falling back to environment recipients: {}", e);
            }
        }

        self.env_fallbacks
            .get(&report_id)
            .map(|raw| strip_env_comment(raw).to_string())
            .filter(|email| !email.is_empty())
    }

    /// Apply a full or partial mapping of report id → entry.
    ///
    /// Every supplied email is validated before anything is written; a single
    /// bad value rejects the whole update. Returns the persisted snapshot and
    /// the number of fields whose value actually changed.
    pub async fn update(
        &self,
        entries: BTreeMap<u8, ReportEmailEntry>,
        actor: &str,
    ) -> Result<(RecipientDocument, usize)> {
        // All-or-nothing validation before any write
        for (report_id, entry) in &entries {
            let email = entry.email.trim();
            if !email.is_empty() && !EMAIL_REGEX.is_match(email) {
                return Err(AppError::Validation(format!(
                    "Invalid email format for {}",
                    report_id
                )));
            }
        }

        let _guard = self.write_lock.lock().await;

        let mut document = self.document().await?;

        for report_id in entries.keys() {
            if !document.report_emails.contains_key(report_id) {
                return Err(AppError::Validation(format!(
                    "Unknown report id {}",
                    report_id
                )));
            }
        }

        let actor = {
            let trimmed = actor.trim();
            if trimmed.is_empty() {
                DEFAULT_UPDATED_BY
            } else {
                trimmed
            }
        };
        let now = Utc::now();

        let mut audit_lines = Vec::new();
        let mut changed = 0usize;
        for (report_id, new_entry) in entries {
            // Ids were validated against the document above
            let Some(current) = document.report_emails.get(&report_id) else {
                continue;
            };

            for (field, old, new) in [
                (
                    "reportName",
                    current.report_name.as_str(),
                    new_entry.report_name.as_str(),
                ),
                (
                    "fullName",
                    current.full_name.as_str(),
                    new_entry.full_name.as_str(),
                ),
                ("email", current.email.as_str(), new_entry.email.as_str()),
            ] {
                if old != new {
                    changed += 1;
                    let entry = AuditEntry {
                        report_id,
                        field,
                        old,
                        new,
                        actor,
                        at: now,
                    };
                    audit_lines.push(serde_json::to_string(&entry).map_err(|e| {
                        AppError::Internal(format!("Failed to serialize audit entry: {}", e))
                    })?);
                }
            }

            document.report_emails.insert(report_id, new_entry);
        }

        document.last_updated = now;
        document.updated_by = actor.to_string();

        self.write_atomic(&document).await?;
        self.append_audit(&audit_lines).await?;

        tracing::info!(actor = %actor, changed, "Recipient configuration updated");

        Ok((document, changed))
    }

    /// Write the document to a sibling temp file, then rename into place.
    async fn write_atomic(&self, document: &RecipientDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::Internal(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let payload = serde_json::to_string_pretty(document)
            .map_err(|e| AppError::Internal(format!("Failed to serialize config: {}", e)))?;

        let mut tmp_name = self
            .path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report_emails.json".to_string());
        tmp_name.push_str(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        tokio::fs::write(&tmp_path, payload)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write config store: {}", e)))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to replace config store: {}", e)))?;

        Ok(())
    }

    async fn append_audit(&self, lines: &[String]) -> Result<()> {
        if lines.is_empty() {
            return Ok(());
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.audit_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to open audit log: {}", e)))?;

        let mut buffer = lines.join("\n");
        buffer.push('\n');
        file.write_all(buffer.as_bytes())
            .await
            .map_err(|e| AppError::Internal(format!("Failed to append audit log: {}", e)))?;

        Ok(())
    }
}

/// Environment fallback values may carry a trailing comment, e.g.
/// `EMAIL_3=var@example.org # VA&R chairman`.
fn strip_env_comment(raw: &str) -> &str {
    raw.split('#').next().unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::shared::test_helpers::temp_recipient_store as temp_store;

    fn seed_entries() -> BTreeMap<u8, ReportEmailEntry> {
        let mut entries = BTreeMap::new();
        entries.insert(
            1,
            ReportEmailEntry {
                report_name: "NCSR".to_string(),
                full_name: "National Consolidated Squadron Report".to_string(),
                email: String::new(),
            },
        );
        entries.insert(
            3,
            ReportEmailEntry {
                report_name: "VA&R".to_string(),
                full_name: "Veterans Affairs & Rehabilitation".to_string(),
                email: String::new(),
            },
        );
        entries
    }

    #[test]
    fn test_strip_env_comment() {
        assert_eq!(strip_env_comment("x@y.com # note"), "x@y.com");
        assert_eq!(strip_env_comment("x@y.com"), "x@y.com");
        assert_eq!(strip_env_comment("  x@y.com  "), "x@y.com");
        assert_eq!(strip_env_comment("# only a comment"), "");
    }

    #[tokio::test]
    async fn test_seed_and_read_document() {
        let store = temp_store(HashMap::new());
        store.ensure_seeded(seed_entries()).await.unwrap();

        let document = store.document().await.unwrap();
        assert_eq!(document.report_emails.len(), 2);
        assert_eq!(document.updated_by, "System");
        assert_eq!(document.report_emails[&3].report_name, "VA&R");
        assert!(document.report_emails[&3].email.is_empty());

        // Seeding again must not overwrite
        store.ensure_seeded(BTreeMap::new()).await.unwrap();
        assert_eq!(store.document().await.unwrap().report_emails.len(), 2);
    }

    #[tokio::test]
    async fn test_recipient_prefers_persisted_email() {
        let mut fallbacks = HashMap::new();
        fallbacks.insert(3, "fallback@example.org".to_string());
        let store = temp_store(fallbacks);
        store.ensure_seeded(seed_entries()).await.unwrap();

        let mut entries = BTreeMap::new();
        entries.insert(
            3,
            ReportEmailEntry {
                report_name: "VA&R".to_string(),
                full_name: "Veterans Affairs & Rehabilitation".to_string(),
                email: "chairman@example.org".to_string(),
            },
        );
        store.update(entries, "Admin").await.unwrap();

        assert_eq!(
            store.recipient(3).await,
            Some("chairman@example.org".to_string())
        );
    }

    #[tokio::test]
    async fn test_recipient_env_fallback_strips_comment() {
        let mut fallbacks = HashMap::new();
        fallbacks.insert(3, "x@y.com # note".to_string());
        let store = temp_store(fallbacks);
        store.ensure_seeded(seed_entries()).await.unwrap();

        assert_eq!(store.recipient(3).await, Some("x@y.com".to_string()));
    }

    #[tokio::test]
    async fn test_recipient_absent_when_unconfigured() {
        let store = temp_store(HashMap::new());
        store.ensure_seeded(seed_entries()).await.unwrap();

        assert_eq!(store.recipient(1).await, None);
    }

    #[tokio::test]
    async fn test_update_rejects_bad_email_without_writing() {
        let store = temp_store(HashMap::new());
        store.ensure_seeded(seed_entries()).await.unwrap();

        let mut entries = BTreeMap::new();
        entries.insert(
            1,
            ReportEmailEntry {
                report_name: "NCSR".to_string(),
                full_name: "National Consolidated Squadron Report".to_string(),
                email: "good@example.org".to_string(),
            },
        );
        entries.insert(
            3,
            ReportEmailEntry {
                report_name: "VA&R".to_string(),
                full_name: "Veterans Affairs & Rehabilitation".to_string(),
                email: "not-an-email".to_string(),
            },
        );

        let err = store.update(entries, "Admin").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // All-or-nothing: the valid entry must not have been applied either
        let document = store.document().await.unwrap();
        assert!(document.report_emails[&1].email.is_empty());
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_report_id() {
        let store = temp_store(HashMap::new());
        store.ensure_seeded(seed_entries()).await.unwrap();

        let mut entries = BTreeMap::new();
        entries.insert(
            9,
            ReportEmailEntry {
                report_name: "SOC".to_string(),
                full_name: "Squadron Officer Change".to_string(),
                email: String::new(),
            },
        );

        let err = store.update(entries, "Admin").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_counts_changes_and_is_idempotent() {
        let store = temp_store(HashMap::new());
        store.ensure_seeded(seed_entries()).await.unwrap();

        let mut entries = BTreeMap::new();
        entries.insert(
            3,
            ReportEmailEntry {
                report_name: "VA&R".to_string(),
                full_name: "Veterans Affairs & Rehabilitation".to_string(),
                email: "chairman@example.org".to_string(),
            },
        );

        let (document, changed) = store.update(entries.clone(), "").await.unwrap();
        assert_eq!(changed, 1);
        assert_eq!(document.updated_by, "Admin");
        let first_stamp = document.last_updated;

        let audit = tokio::fs::read_to_string(&store.audit_path).await.unwrap();
        assert_eq!(audit.lines().count(), 1);
        assert!(audit.contains("chairman@example.org"));

        // Same payload again: stamp moves, nothing counts as changed, no new
        // audit lines
        let (document, changed) = store.update(entries, "Clerk").await.unwrap();
        assert_eq!(changed, 0);
        assert_eq!(document.updated_by, "Clerk");
        assert!(document.last_updated >= first_stamp);
        assert_eq!(
            document.report_emails[&3].email,
            "chairman@example.org".to_string()
        );

        let audit = tokio::fs::read_to_string(&store.audit_path).await.unwrap();
        assert_eq!(audit.lines().count(), 1);
    }
}
