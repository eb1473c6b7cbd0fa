//! Domain actions built on the transaction pipeline.
//!
//! # Data Flow
//! ```text
//! CoinClient / TokenClient / MessageClient
//!     → payload builder (hex-encoded bytes, decimal numbers, 0x addresses)
//!     → TransactionPipeline (submit_payload / execute)
//!     → LedgerClient reads for balances, tokens and messages
//! ```
//!
//! Each client holds a pipeline clone rather than extending the ledger client.

pub mod coin;
pub mod message;
pub mod token;

pub use coin::CoinClient;
pub use message::MessageClient;
pub use token::TokenClient;
