mod submission_service;

pub use submission_service::{SubmissionError, SubmissionOutcome, SubmissionService};
