//! Transaction pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! Payload (from actions/ or the caller)
//!     → pipeline.rs build        (GET /accounts/{sender} for sequence number)
//!     → pipeline.rs sign         (POST /transactions/signing_message, ed25519 sign)
//!     → pipeline.rs submit       (POST /transactions, expect 202)
//!     → pipeline.rs wait         (GET /transactions/{hash} until not pending)
//! ```
//!
//! # States
//! `Building → SigningMessageRequested → Signed → Submitted → {Confirmed | TimedOut | Rejected}`
//!
//! # Design Decisions
//! - Gas, expiration window and polling bounds come from config
//! - Only the pending check is retried; submission never is
//! - A timeout means "not confirmed yet", not "failed"

pub mod pipeline;
pub mod types;

pub use pipeline::{sign_with_message, TransactionPipeline};
pub use types::{
    ConfirmedTransaction, Payload, ScriptFunction, SignatureBlock, SignedTransaction,
    TransactionRequest, TransactionState,
};
