//! Read-only ledger queries.
//!
//! # Data Flow
//! ```text
//! NodeConfig (base URL, timeout)
//!     → client.rs (GET/POST with timeout, 404 → None)
//!     → tables.rs (resource → embedded handle → table item)
//!     → types.rs (wire types, LedgerError)
//! ```
//!
//! # Design Decisions
//! - No caching: every lookup is a round trip
//! - Absence is `Option::None`, any other non-2xx is `LedgerError::Remote`
//! - Status and body are kept verbatim on every failure

pub mod client;
pub mod tables;
pub mod types;

pub use client::LedgerClient;
pub use types::{LedgerError, LedgerResult, Resource, TokenId, TransactionStatus};
