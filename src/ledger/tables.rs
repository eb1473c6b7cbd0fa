//! Derived reads over resources and their embedded tables.
//!
//! Each lookup fetches the owning resource, pulls the table handle out of it,
//! then queries the table. An absent resource or item is reported as "no
//! value", never synthesized into a remote error.

use serde_json::Value;

use crate::identity::AccountAddress;
use crate::ledger::client::LedgerClient;
use crate::ledger::types::{parse_u64, LedgerError, LedgerResult, TokenId};

pub const COIN_BALANCE_RESOURCE: &str = "0x1::TestCoin::Balance";
pub const TOKEN_STORE_RESOURCE: &str = "0x1::Token::TokenStore";
pub const COLLECTIONS_RESOURCE: &str = "0x1::Token::Collections";
pub const TOKEN_ID_TYPE: &str = "0x1::Token::TokenId";
pub const TOKEN_TYPE: &str = "0x1::Token::Token";
pub const TOKEN_DATA_TYPE: &str = "0x1::Token::TokenData";

impl LedgerClient {
    /// Coin balance of an account, or `None` if it holds no balance resource.
    pub async fn balance(&self, address: &AccountAddress) -> LedgerResult<Option<u64>> {
        let Some(resource) = self.account_resource(address, COIN_BALANCE_RESOURCE).await? else {
            return Ok(None);
        };
        let value = resource
            .data
            .pointer("/coin/value")
            .and_then(parse_u64)
            .ok_or_else(|| LedgerError::Decode(format!("balance resource has no coin value: {}", resource.data)))?;
        Ok(Some(value))
    }

    /// Amount of a token held by `owner`. Zero when the owner has no token
    /// store or the store has no entry for the token.
    pub async fn token_balance(&self, owner: &AccountAddress, token_id: &TokenId) -> LedgerResult<u64> {
        let Some(store) = self.account_resource(owner, TOKEN_STORE_RESOURCE).await? else {
            tracing::debug!(owner = %owner, "No token store");
            return Ok(0);
        };
        let handle = store.table_handle("tokens")?;

        let Some(token) = self.table_item(&handle, TOKEN_ID_TYPE, TOKEN_TYPE, token_id).await? else {
            return Ok(0);
        };
        token
            .get("value")
            .and_then(parse_u64)
            .ok_or_else(|| LedgerError::Decode(format!("token has no value: {}", token)))
    }

    /// Token metadata from the creator's collections table, or `None` if
    /// either the collections resource or the token entry is absent.
    pub async fn token_data(&self, token_id: &TokenId) -> LedgerResult<Option<Value>> {
        let creator: AccountAddress = token_id.creator.parse()?;
        let Some(collections) = self.account_resource(&creator, COLLECTIONS_RESOURCE).await? else {
            return Ok(None);
        };
        let handle = collections.table_handle("token_data")?;
        self.table_item(&handle, TOKEN_ID_TYPE, TOKEN_DATA_TYPE, token_id).await
    }
}
