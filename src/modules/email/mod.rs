//! Email module
//!
//! Provides the transport-agnostic email gateway used by the submission
//! pipeline and the admin test-email endpoint. Exactly one backend (SMTP or
//! HTTP provider API) is constructed at startup from configuration.

mod gateway;
mod http_api;
mod message;
mod smtp;
pub mod templates;

pub use gateway::{EmailError, EmailGateway};
pub use http_api::HttpApiMailer;
pub use message::{EmailAttachment, EmailMessage};
pub use smtp::SmtpMailer;
