//! Ledger wire types and error definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::identity::{AccountAddress, IdentityError};

/// Errors that can occur while talking to the ledger.
///
/// Remote variants keep the HTTP status and response body verbatim. Write-path
/// variants also keep the serialized request so the call can be replayed by hand.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ledger does not know the requested account.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unexpected non-success status from a read.
    #[error("Remote error {status}: {body}")]
    Remote { status: u16, body: String },

    /// Could not read the sender's sequence number.
    #[error("Sequence number fetch failed ({status}): {body}")]
    SequenceFetchFailed { status: u16, body: String },

    /// The signing-message endpoint refused the request.
    #[error("Signing message request failed ({status}): {body} - {request}")]
    SigningMessageFailed {
        status: u16,
        body: String,
        request: String,
    },

    /// The ledger did not accept the signed transaction.
    #[error("Transaction rejected ({status}): {body} - {request}")]
    SubmissionRejected {
        status: u16,
        body: String,
        request: String,
    },

    /// The signing account is not the request's sender.
    #[error("Signer {signer} does not match transaction sender {sender}")]
    SignerMismatch { sender: String, signer: String },

    /// The transaction was still pending after the polling cap. It may still land.
    #[error("Waiting for transaction {hash} timed out after {attempts} attempts")]
    ConfirmationTimeout { hash: String, attempts: u32 },

    /// A single request exceeded its deadline.
    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    /// Transport failure (connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl LedgerError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            LedgerError::Remote { status, .. }
            | LedgerError::SequenceFetchFailed { status, .. }
            | LedgerError::SigningMessageFailed { status, .. }
            | LedgerError::SubmissionRejected { status, .. } => Some(*status),
            LedgerError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Account metadata returned by `GET /accounts/{address}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountData {
    /// Decimal string on the wire.
    pub sequence_number: String,
}

impl AccountData {
    pub fn sequence_number(&self) -> LedgerResult<u64> {
        self.sequence_number.parse().map_err(|_| {
            LedgerError::Decode(format!(
                "sequence_number '{}' is not an integer",
                self.sequence_number
            ))
        })
    }
}

/// A typed resource stored under an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type", default)]
    pub resource_type: String,

    pub data: Value,
}

impl Resource {
    /// Table handle embedded at `data.<field>.handle`.
    pub fn table_handle(&self, field: &str) -> LedgerResult<String> {
        self.data
            .get(field)
            .and_then(|f| f.get("handle"))
            .and_then(handle_as_string)
            .ok_or_else(|| {
                LedgerError::Decode(format!(
                    "resource {} has no table handle at '{}'",
                    self.resource_type, field
                ))
            })
    }
}

fn handle_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Body of `POST /tables/{handle}/item`.
#[derive(Debug, Clone, Serialize)]
pub struct TableItemRequest<'a, K: Serialize> {
    pub key_type: &'a str,
    pub value_type: &'a str,
    pub key: &'a K,
}

/// Identifies a token by creator, collection and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenId {
    /// Creator address, hex without prefix.
    pub creator: String,
    pub collection: String,
    pub name: String,
}

impl TokenId {
    pub fn new(creator: &AccountAddress, collection: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            creator: creator.to_hex(),
            collection: collection.into(),
            name: name.into(),
        }
    }
}

/// Status of a transaction as seen by the ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionStatus {
    /// The ledger has not seen the hash yet.
    NotFound,
    /// Accepted, not yet executed.
    Pending,
    /// Any non-pending transaction body.
    Committed(Value),
}

impl TransactionStatus {
    pub(crate) fn from_body(body: Value) -> Self {
        if body.get("type").and_then(Value::as_str) == Some(PENDING_TRANSACTION_TYPE) {
            TransactionStatus::Pending
        } else {
            TransactionStatus::Committed(body)
        }
    }
}

/// `type` value the ledger uses for accepted but unexecuted transactions.
pub const PENDING_TRANSACTION_TYPE: &str = "pending_transaction";

/// Parse a u64 that the ledger may render as a JSON string or number.
pub fn parse_u64(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = LedgerError::ConfirmationTimeout {
            hash: "0xabc".into(),
            attempts: 10,
        };
        assert_eq!(
            err.to_string(),
            "Waiting for transaction 0xabc timed out after 10 attempts"
        );

        let err = LedgerError::SubmissionRejected {
            status: 400,
            body: "bad sequence".into(),
            request: "{\"sequence_number\":\"5\"}".into(),
        };
        assert!(err.to_string().contains("bad sequence"));
        assert!(err.to_string().contains("sequence_number"));
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_transaction_status_from_body() {
        let pending = TransactionStatus::from_body(json!({"type": "pending_transaction"}));
        assert_eq!(pending, TransactionStatus::Pending);

        let done = TransactionStatus::from_body(json!({"type": "user_transaction", "success": true}));
        assert!(matches!(done, TransactionStatus::Committed(_)));
    }

    #[test]
    fn test_table_handle() {
        let resource: Resource = serde_json::from_value(json!({
            "type": "0x1::Token::TokenStore",
            "data": {"tokens": {"handle": "1234"}}
        }))
        .unwrap();
        assert_eq!(resource.table_handle("tokens").unwrap(), "1234");
        assert!(matches!(resource.table_handle("missing"), Err(LedgerError::Decode(_))));
    }

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64(&json!("42")), Some(42));
        assert_eq!(parse_u64(&json!(42)), Some(42));
        assert_eq!(parse_u64(&json!("x")), None);
        assert_eq!(parse_u64(&json!(null)), None);
    }

    #[test]
    fn test_token_id_uses_unprefixed_creator() {
        let creator = AccountAddress::new([2; 32]);
        let id = TokenId::new(&creator, "col", "tok");
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(json["creator"], "02".repeat(32));
        assert_eq!(json["collection"], "col");
    }

    #[test]
    fn test_account_sequence_number() {
        let data: AccountData =
            serde_json::from_value(json!({"sequence_number": "5", "authentication_key": "0x00"})).unwrap();
        assert_eq!(data.sequence_number().unwrap(), 5);
        let bad = AccountData { sequence_number: "five".into() };
        assert!(bad.sequence_number().is_err());
    }
}
