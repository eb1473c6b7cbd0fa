//! Account identity subsystem.
//!
//! # Data Flow
//! ```text
//! seed (random, caller-supplied, or LEDGER_PRIVATE_KEY)
//!     → account.rs (ed25519 keypair)
//!     → address.rs (sha3_256(public_key || 0x00), 32 bytes)
//!     → encoding.rs (hex forms used on the wire)
//! ```
//!
//! # Security Constraints
//! - Seed bytes never appear in logs or Debug output
//! - Accounts are owned by the caller; there is no registry

pub mod account;
pub mod address;
pub mod encoding;

pub use account::{Account, IdentityError, IdentityResult};
pub use address::AccountAddress;
