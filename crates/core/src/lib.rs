//! Domain logic for the device vitals service.
//!
//! Everything in this crate is pure: no database access, no network I/O.
//! The `db` and `api` crates build on these types.

pub mod error;
pub mod metric_kind;
pub mod search;
pub mod thresholds;
pub mod types;
pub mod validation;
