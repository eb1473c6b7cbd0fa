//! Faucet funding for test networks.
//!
//! The faucet mints coins into an account and answers with the hashes of the
//! minting transactions, which are then confirmed through the pipeline.

use crate::identity::AccountAddress;
use crate::ledger::types::LedgerResult;
use crate::transaction::TransactionPipeline;

/// Client for the faucet's `/mint` endpoint.
#[derive(Debug, Clone)]
pub struct FaucetClient {
    url: String,
    pipeline: TransactionPipeline,
}

impl FaucetClient {
    pub fn new(faucet_url: &str, pipeline: TransactionPipeline) -> Self {
        Self {
            url: faucet_url.trim_end_matches('/').to_string(),
            pipeline,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Mint `amount` into `address` and wait for every minting transaction.
    pub async fn fund_account(&self, address: &AccountAddress, amount: u64) -> LedgerResult<Vec<String>> {
        let url = format!("{}/mint", self.url);
        let query = [("amount", amount.to_string()), ("address", address.to_hex())];
        let raw = self.pipeline.ledger().post_absolute("faucet_mint", &url, &query).await?;
        if raw.status != 200 {
            return Err(raw.into_remote_error());
        }

        let hashes: Vec<String> = raw.json()?;
        tracing::info!(address = %address, amount, transactions = hashes.len(), "Faucet minted");

        for hash in &hashes {
            self.pipeline.wait_for_transaction(hash).await.map_err(|e| {
                tracing::warn!(hash = %hash, error = %e, "Faucet transaction not confirmed");
                e
            })?;
        }
        Ok(hashes)
    }
}
