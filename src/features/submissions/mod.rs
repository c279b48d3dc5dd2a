//! Report submission feature.
//!
//! The portal's main endpoint: accepts a multipart report upload, validates
//! it against the report directory, derives the canonical filename, and
//! dispatches the notification and confirmation emails.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/upload/{id}` | No | Submit a report file |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::SubmissionService;
