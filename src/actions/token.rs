//! Token collections, minting and transfer offers.

use serde_json::Value;

use crate::identity::{Account, AccountAddress};
use crate::ledger::types::{LedgerResult, TokenId};
use crate::transaction::{ConfirmedTransaction, Payload, ScriptFunction, TransactionPipeline};

pub fn create_collection_payload(name: &str, description: &str, uri: &str) -> Payload {
    ScriptFunction::new("0x1::Token::create_unlimited_collection_script")
        .bytes_arg(name)
        .bytes_arg(description)
        .bytes_arg(uri)
        .build()
}

pub fn create_token_payload(
    collection: &str,
    name: &str,
    description: &str,
    supply: u64,
    uri: &str,
) -> Payload {
    ScriptFunction::new("0x1::Token::create_unlimited_token_script")
        .bytes_arg(collection)
        .bytes_arg(name)
        .bytes_arg(description)
        .bool_arg(true)
        .u64_arg(supply)
        .bytes_arg(uri)
        .build()
}

pub fn offer_token_payload(
    receiver: &AccountAddress,
    creator: &AccountAddress,
    collection: &str,
    name: &str,
    amount: u64,
) -> Payload {
    ScriptFunction::new("0x1::TokenTransfers::offer_script")
        .address_arg(receiver)
        .address_arg(creator)
        .bytes_arg(collection)
        .bytes_arg(name)
        .u64_arg(amount)
        .build()
}

pub fn claim_token_payload(
    sender: &AccountAddress,
    creator: &AccountAddress,
    collection: &str,
    name: &str,
) -> Payload {
    ScriptFunction::new("0x1::TokenTransfers::claim_script")
        .address_arg(sender)
        .address_arg(creator)
        .bytes_arg(collection)
        .bytes_arg(name)
        .build()
}

pub fn cancel_offer_payload(
    receiver: &AccountAddress,
    creator: &AccountAddress,
    token_creation_num: u64,
) -> Payload {
    ScriptFunction::new("0x1::TokenTransfers::cancel_offer_script")
        .address_arg(receiver)
        .address_arg(creator)
        .u64_arg(token_creation_num)
        .build()
}

/// Token operations. Every write waits for confirmation.
#[derive(Debug, Clone)]
pub struct TokenClient {
    pipeline: TransactionPipeline,
}

impl TokenClient {
    pub fn new(pipeline: TransactionPipeline) -> Self {
        Self { pipeline }
    }

    pub async fn create_collection(
        &self,
        account: &Account,
        name: &str,
        description: &str,
        uri: &str,
    ) -> LedgerResult<ConfirmedTransaction> {
        self.pipeline
            .execute(account, create_collection_payload(name, description, uri))
            .await
    }

    pub async fn create_token(
        &self,
        account: &Account,
        collection: &str,
        name: &str,
        description: &str,
        supply: u64,
        uri: &str,
    ) -> LedgerResult<ConfirmedTransaction> {
        let payload = create_token_payload(collection, name, description, supply, uri);
        self.pipeline.execute(account, payload).await
    }

    pub async fn offer_token(
        &self,
        account: &Account,
        receiver: &AccountAddress,
        creator: &AccountAddress,
        collection: &str,
        name: &str,
        amount: u64,
    ) -> LedgerResult<ConfirmedTransaction> {
        let payload = offer_token_payload(receiver, creator, collection, name, amount);
        self.pipeline.execute(account, payload).await
    }

    pub async fn claim_token(
        &self,
        account: &Account,
        sender: &AccountAddress,
        creator: &AccountAddress,
        collection: &str,
        name: &str,
    ) -> LedgerResult<ConfirmedTransaction> {
        let payload = claim_token_payload(sender, creator, collection, name);
        self.pipeline.execute(account, payload).await
    }

    pub async fn cancel_token_offer(
        &self,
        account: &Account,
        receiver: &AccountAddress,
        creator: &AccountAddress,
        token_creation_num: u64,
    ) -> LedgerResult<ConfirmedTransaction> {
        let payload = cancel_offer_payload(receiver, creator, token_creation_num);
        self.pipeline.execute(account, payload).await
    }

    pub async fn token_balance(
        &self,
        owner: &AccountAddress,
        creator: &AccountAddress,
        collection: &str,
        name: &str,
    ) -> LedgerResult<u64> {
        let token_id = TokenId::new(creator, collection, name);
        self.pipeline.ledger().token_balance(owner, &token_id).await
    }

    pub async fn token_data(
        &self,
        creator: &AccountAddress,
        collection: &str,
        name: &str,
    ) -> LedgerResult<Option<Value>> {
        let token_id = TokenId::new(creator, collection, name);
        self.pipeline.ledger().token_data(&token_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn arguments(payload: Payload) -> Vec<Value> {
        match payload {
            Payload::ScriptFunctionPayload { arguments, .. } => arguments,
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_create_token_arguments() {
        let args = arguments(create_token_payload("c", "t", "d", 1, "u"));
        assert_eq!(
            args,
            vec![json!("63"), json!("74"), json!("64"), json!(true), json!("1"), json!("75")]
        );
    }

    #[test]
    fn test_offer_arguments_prefix_addresses() {
        let receiver = AccountAddress::new([1; 32]);
        let creator = AccountAddress::new([2; 32]);
        let args = arguments(offer_token_payload(&receiver, &creator, "col", "tok", 1));
        assert_eq!(args[0], json!(receiver.to_hex_literal()));
        assert_eq!(args[1], json!(creator.to_hex_literal()));
        assert_eq!(args[2], json!("636f6c"));
        assert_eq!(args[4], json!("1"));
    }

    #[test]
    fn test_cancel_offer_arguments() {
        let a = AccountAddress::new([1; 32]);
        let args = arguments(cancel_offer_payload(&a, &a, 7));
        assert_eq!(args.len(), 3);
        assert_eq!(args[2], json!("7"));
    }
}
