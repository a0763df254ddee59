//! HTTP surface for a [`folio_store::DocumentStore`].
//!
//! Routes:
//!
//! | Method | Path | Purpose |
//! |---|---|---|
//! | GET | `/documents` | list all documents |
//! | POST | `/documents` | multipart upload (`file` field) |
//! | GET | `/documents/{id}` | metadata for one document |
//! | DELETE | `/documents/{id}` | delete one document |
//! | GET | `/content/{id}` | stream content, honoring `Range` |
//! | GET | `/health` | liveness probe |
//!
//! Every response carries an `x-request-id` header, every request is
//! traced, and errors come back as a JSON body with `name`, `message`,
//! `code`, and `className` fields.

pub mod app;
pub mod content;
pub mod documents;
mod error;
mod state;

pub use app::{ApiApp, ApiConfig};
pub use error::ApiError;
pub use state::ApiState;
