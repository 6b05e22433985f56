//! Health metrics ingestion API library.
//!
//! Exposes config, state, error handling, the ingestion pipeline, and the
//! router builder so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod ingest;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
