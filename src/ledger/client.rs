//! Ledger REST client with timeouts and status classification.
//!
//! # Responsibilities
//! - Read account metadata, resources and table items
//! - Query transaction status by hash
//! - Bound every request with the configured timeout
//! - Keep 404 (absent) distinct from every other failure

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::time::timeout;

use crate::config::NodeConfig;
use crate::identity::AccountAddress;
use crate::ledger::types::{
    AccountData, LedgerError, LedgerResult, Resource, TableItemRequest, TransactionStatus,
};
use crate::observability::metrics;

/// Status code and body of a completed request.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn json<T: DeserializeOwned>(&self) -> LedgerResult<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| LedgerError::Decode(format!("{}: {}", e, self.body)))
    }

    pub fn into_remote_error(self) -> LedgerError {
        LedgerError::Remote {
            status: self.status,
            body: self.body,
        }
    }
}

/// Read-side client for the ledger's REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct LedgerClient {
    http: reqwest::Client,
    base_url: String,
    timeout_duration: Duration,
}

impl LedgerClient {
    /// Create a new client for the configured node.
    pub fn new(config: &NodeConfig) -> LedgerResult<Self> {
        let parsed: url::Url = config.base_url.parse().map_err(|e| {
            LedgerError::Config(format!("Invalid node URL '{}': {}", config.base_url, e))
        })?;

        tracing::debug!(base_url = %parsed, "Ledger client initialized");

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_duration: Duration::from_secs(config.request_timeout_secs),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request under the client timeout and capture status and body.
    async fn send(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> LedgerResult<RawResponse> {
        let fut = async {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>(RawResponse { status, body })
        };

        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(raw)) => {
                metrics::record_request(operation, raw.status);
                tracing::debug!(operation, status = raw.status, "Ledger response");
                Ok(raw)
            }
            Ok(Err(e)) => {
                metrics::record_request_failure(operation, "error");
                tracing::warn!(operation, error = %e, "Ledger request failed");
                Err(LedgerError::Http(e))
            }
            Err(_) => {
                metrics::record_request_failure(operation, "timeout");
                tracing::warn!(operation, "Ledger request timed out");
                Err(LedgerError::Timeout(self.timeout_duration.as_secs()))
            }
        }
    }

    pub(crate) async fn get(&self, operation: &'static str, path: &str) -> LedgerResult<RawResponse> {
        self.send(operation, self.http.get(self.url(path))).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> LedgerResult<RawResponse> {
        self.send(operation, self.http.post(self.url(path)).json(body))
            .await
    }

    /// POST with no body to an absolute URL (faucet lives on another host).
    pub(crate) async fn post_absolute(
        &self,
        operation: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> LedgerResult<RawResponse> {
        self.send(operation, self.http.post(url).query(query)).await
    }

    /// Fetch account metadata, including the current sequence number.
    pub async fn account(&self, address: &AccountAddress) -> LedgerResult<AccountData> {
        let raw = self.get("account", &format!("/accounts/{}", address)).await?;
        match raw.status {
            200 => raw.json(),
            404 => Err(LedgerError::NotFound(format!("account {}: {}", address, raw.body))),
            _ => Err(raw.into_remote_error()),
        }
    }

    /// Current sequence number of an account.
    pub async fn sequence_number(&self, address: &AccountAddress) -> LedgerResult<u64> {
        self.account(address).await?.sequence_number()
    }

    /// Fetch a typed resource, or `None` if the account does not hold it.
    pub async fn account_resource(
        &self,
        address: &AccountAddress,
        resource_type: &str,
    ) -> LedgerResult<Option<Resource>> {
        let path = format!("/accounts/{}/resource/{}", address, resource_type);
        let raw = self.get("account_resource", &path).await?;
        match raw.status {
            200 => raw.json().map(Some),
            404 => Ok(None),
            _ => Err(raw.into_remote_error()),
        }
    }

    /// Look up `key` in the table named by `handle`, or `None` if absent.
    pub async fn table_item<K: Serialize>(
        &self,
        handle: &str,
        key_type: &str,
        value_type: &str,
        key: &K,
    ) -> LedgerResult<Option<Value>> {
        let body = TableItemRequest {
            key_type,
            value_type,
            key,
        };
        let raw = self
            .post_json("table_item", &format!("/tables/{}/item", handle), &body)
            .await?;
        match raw.status {
            200 => raw.json().map(Some),
            404 => Ok(None),
            _ => Err(raw.into_remote_error()),
        }
    }

    /// Query a transaction by hash. An unknown hash is reported, not an error.
    pub async fn transaction_status(&self, hash: &str) -> LedgerResult<TransactionStatus> {
        let raw = self
            .get("transaction_status", &format!("/transactions/{}", hash))
            .await?;
        match raw.status {
            200 => raw.json().map(TransactionStatus::from_body),
            404 => Ok(TransactionStatus::NotFound),
            _ => Err(raw.into_remote_error()),
        }
    }
}

impl std::fmt::Debug for LedgerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerClient")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
