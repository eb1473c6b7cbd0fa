//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → sections handed to LedgerClient, TransactionPipeline, logging
//! ```
//!
//! # Design Decisions
//! - Config is passed explicitly at construction; there are no module-level endpoints
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ClientConfig, GasConfig, NodeConfig, ObservabilityConfig, PollingConfig};
