//! Coin transfers and balances.

use crate::identity::{Account, AccountAddress};
use crate::ledger::types::LedgerResult;
use crate::transaction::{Payload, ScriptFunction, TransactionPipeline};

pub const TRANSFER_FUNCTION: &str = "0x1::TestCoin::transfer";

/// Payload moving `amount` coins to `recipient`.
pub fn transfer_payload(recipient: &AccountAddress, amount: u64) -> Payload {
    ScriptFunction::new(TRANSFER_FUNCTION)
        .address_arg(recipient)
        .u64_arg(amount)
        .build()
}

/// Coin operations over a shared pipeline.
#[derive(Debug, Clone)]
pub struct CoinClient {
    pipeline: TransactionPipeline,
}

impl CoinClient {
    pub fn new(pipeline: TransactionPipeline) -> Self {
        Self { pipeline }
    }

    /// Submit a transfer and return its hash without waiting.
    pub async fn transfer(&self, from: &Account, recipient: &AccountAddress, amount: u64) -> LedgerResult<String> {
        tracing::info!(from = %from.address(), to = %recipient, amount, "Transferring coins");
        self.pipeline
            .submit_payload(from, transfer_payload(recipient, amount))
            .await
    }

    pub async fn balance(&self, address: &AccountAddress) -> LedgerResult<Option<u64>> {
        self.pipeline.ledger().balance(address).await
    }
}
