//! Module publishing and the `Message` example module.

use serde_json::Value;

use crate::identity::{Account, AccountAddress};
use crate::ledger::types::LedgerResult;
use crate::transaction::{Payload, ScriptFunction, TransactionPipeline};

pub fn set_message_payload(contract: &AccountAddress, message: &str) -> Payload {
    ScriptFunction::new(format!("{}::Message::set_message", contract.to_hex_literal()))
        .bytes_arg(message)
        .build()
}

/// Client for a published `Message` module.
#[derive(Debug, Clone)]
pub struct MessageClient {
    pipeline: TransactionPipeline,
}

impl MessageClient {
    pub fn new(pipeline: TransactionPipeline) -> Self {
        Self { pipeline }
    }

    /// Publish compiled module bytecode under `account`. Returns the hash.
    pub async fn publish_module(&self, account: &Account, bytecode: &[u8]) -> LedgerResult<String> {
        tracing::info!(account = %account.address(), size = bytecode.len(), "Publishing module");
        self.pipeline
            .submit_payload(account, Payload::module_bundle(&[bytecode]))
            .await
    }

    /// Message stored under `address`, or `None` if it has never set one.
    pub async fn get_message(
        &self,
        contract: &AccountAddress,
        address: &AccountAddress,
    ) -> LedgerResult<Option<String>> {
        let resource_type = format!("{}::Message::MessageHolder", contract.to_hex_literal());
        let resource = self
            .pipeline
            .ledger()
            .account_resource(address, &resource_type)
            .await?;
        Ok(resource.and_then(|r| r.data.get("message").and_then(Value::as_str).map(str::to_string)))
    }

    /// Set the caller's message. Returns the hash.
    pub async fn set_message(
        &self,
        contract: &AccountAddress,
        account: &Account,
        message: &str,
    ) -> LedgerResult<String> {
        self.pipeline
            .submit_payload(account, set_message_payload(contract, message))
            .await
    }
}
