//! Storage module for the recipient configuration store
//!
//! File-backed JSON document with atomic replace semantics and a companion
//! JSONL audit log.

mod recipient_store;

pub use recipient_store::{RecipientDocument, RecipientStore, ReportEmailEntry};
