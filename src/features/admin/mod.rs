//! Admin configuration feature.
//!
//! Bearer-token protected endpoints for reading and updating the
//! report-recipient mapping, plus a test-email probe for the active
//! transport.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/admin/config` | Bearer | Read recipient configuration |
//! | POST | `/api/admin/config` | Bearer | Update recipient configuration |
//! | POST | `/api/admin/test-email` | Bearer | Send a test email |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::AdminConfigService;
