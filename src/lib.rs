//! Client pipeline for a ledger node's REST API.
//!
//! Accounts, read-side queries (resources, tables, balances), and the
//! build → sign → submit → confirm transaction pipeline.

pub mod actions;
pub mod config;
pub mod faucet;
pub mod identity;
pub mod ledger;
pub mod observability;
pub mod transaction;

pub use config::schema::ClientConfig;
pub use faucet::FaucetClient;
pub use identity::{Account, AccountAddress};
pub use ledger::{LedgerClient, LedgerError, LedgerResult};
pub use transaction::TransactionPipeline;
