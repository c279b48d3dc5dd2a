//! Report directory feature.
//!
//! Holds the static table of the ten report types a squadron may submit and
//! a public listing endpoint the upload form renders from.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/reports` | No | List the report directory |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;

pub use routes::routes;
