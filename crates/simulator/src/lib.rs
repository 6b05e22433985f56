//! `vitals-simulator` library crate.
//!
//! Generates synthetic device readings and pushes them to the ingestion
//! API. The binary entrypoint lives in `main.rs`.

pub mod config;
pub mod generator;
pub mod sender;
