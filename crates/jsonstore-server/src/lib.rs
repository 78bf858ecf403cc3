//! HTTP server for JsonStore.
//!
//! Exposes the document store over a small JSON REST API:
//!
//! | Route | Operation |
//! |---|---|
//! | `GET /configs` | list every document |
//! | `GET /configs/search?<path>=<value>` | search by path expression |
//! | `GET /configs/:name` | fetch one document |
//! | `POST /configs` | create or replace |
//! | `PUT`/`PATCH /configs/:name` | replace |
//! | `DELETE /configs/:name` | delete |
//! | `GET /health` | liveness |
//!
//! Every request is traced, bounded by the configured timeout, and shielded
//! by panic recovery.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorBody, ServerError, ServerResult};
pub use handler::{AppState, HealthResponse};
pub use router::build_router;
pub use server::JsonStoreServer;
