//! JSON-serializable types for the CLV service, plus the blocking client
//! used by the TUI (feature `client`).

#[cfg(feature = "client")]
pub mod client;
pub mod schema;

pub use schema::{ApiError, ClvRequest, ClvSummary};
