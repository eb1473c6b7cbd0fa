//! Transaction request, payload and signature types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identity::account::verify_signature;
use crate::identity::encoding::{decode_hex, hex_encode_utf8, to_hex_literal};
use crate::identity::AccountAddress;

/// Signature scheme tag for single ed25519 signatures.
pub const ED25519_SIGNATURE_TYPE: &str = "ed25519_signature";

/// Pipeline states, attached to log events as a transaction advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Building,
    SigningMessageRequested,
    Signed,
    Submitted,
    Confirmed,
    TimedOut,
    Rejected,
}

impl TransactionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionState::Building => "building",
            TransactionState::SigningMessageRequested => "signing_message_requested",
            TransactionState::Signed => "signed",
            TransactionState::Submitted => "submitted",
            TransactionState::Confirmed => "confirmed",
            TransactionState::TimedOut => "timed_out",
            TransactionState::Rejected => "rejected",
        }
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instruction body of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    /// Call a published script function.
    ScriptFunctionPayload {
        function: String,
        type_arguments: Vec<String>,
        arguments: Vec<Value>,
    },
    /// Publish one or more modules.
    ModuleBundlePayload { modules: Vec<ModuleBytecode> },
}

impl Payload {
    /// Module bundle from raw bytecode blobs.
    pub fn module_bundle<B: AsRef<[u8]>>(modules: &[B]) -> Self {
        Payload::ModuleBundlePayload {
            modules: modules
                .iter()
                .map(|m| ModuleBytecode {
                    bytecode: to_hex_literal(m.as_ref()),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleBytecode {
    /// `0x`-prefixed hex.
    pub bytecode: String,
}

/// Builder for script function payloads.
///
/// Byte-string arguments are hex without prefix, numbers are decimal strings,
/// addresses carry `0x`.
#[derive(Debug, Clone)]
pub struct ScriptFunction {
    function: String,
    type_arguments: Vec<String>,
    arguments: Vec<Value>,
}

impl ScriptFunction {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            type_arguments: Vec::new(),
            arguments: Vec::new(),
        }
    }

    pub fn type_arg(mut self, type_tag: impl Into<String>) -> Self {
        self.type_arguments.push(type_tag.into());
        self
    }

    pub fn bytes_arg(mut self, text: &str) -> Self {
        self.arguments.push(Value::String(hex_encode_utf8(text)));
        self
    }

    pub fn u64_arg(mut self, value: u64) -> Self {
        self.arguments.push(Value::String(value.to_string()));
        self
    }

    pub fn bool_arg(mut self, value: bool) -> Self {
        self.arguments.push(Value::Bool(value));
        self
    }

    pub fn address_arg(mut self, address: &AccountAddress) -> Self {
        self.arguments.push(Value::String(address.to_hex_literal()));
        self
    }

    pub fn build(self) -> Payload {
        Payload::ScriptFunctionPayload {
            function: self.function,
            type_arguments: self.type_arguments,
            arguments: self.arguments,
        }
    }
}

/// An unsigned transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Serialized with `0x`.
    pub sender: AccountAddress,
    #[serde(with = "u64_string")]
    pub sequence_number: u64,
    #[serde(with = "u64_string")]
    pub max_gas_amount: u64,
    #[serde(with = "u64_string")]
    pub gas_unit_price: u64,
    #[serde(with = "u64_string")]
    pub expiration_timestamp_secs: u64,
    pub payload: Payload,
}

/// `{type, public_key, signature}` attached to a signed transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureBlock {
    #[serde(rename = "type")]
    pub scheme: String,
    /// `0x`-prefixed hex.
    pub public_key: String,
    /// `0x`-prefixed hex.
    pub signature: String,
}

/// A request plus its signature. Not modifiable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    request: TransactionRequest,
    signature: SignatureBlock,
}

impl SignedTransaction {
    pub(crate) fn new(request: TransactionRequest, signature: SignatureBlock) -> Self {
        Self { request, signature }
    }

    pub fn request(&self) -> &TransactionRequest {
        &self.request
    }

    pub fn signature(&self) -> &SignatureBlock {
        &self.signature
    }

    /// Check the attached signature over `message` with the attached public key.
    pub fn verify(&self, message: &[u8]) -> bool {
        let (Ok(public_key), Ok(signature)) = (
            decode_hex(&self.signature.public_key),
            decode_hex(&self.signature.signature),
        ) else {
            return false;
        };
        verify_signature(&public_key, message, &signature)
    }
}

/// Response body of an accepted submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedTransaction {
    pub hash: String,
}

/// Body of `POST /transactions/signing_message`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SigningMessage {
    pub message: String,
}

/// A transaction the ledger reports as no longer pending.
#[derive(Debug, Clone)]
pub struct ConfirmedTransaction {
    pub hash: String,
    /// Status queries made before the non-pending answer.
    pub attempts: u32,
    pub transaction: Value,
}

impl ConfirmedTransaction {
    /// Execution success flag, when the ledger reports one.
    pub fn success(&self) -> Option<bool> {
        self.transaction.get("success").and_then(Value::as_bool)
    }

    pub fn vm_status(&self) -> Option<&str> {
        self.transaction.get("vm_status").and_then(Value::as_str)
    }
}

/// Serde adapter for u64 values the ledger carries as decimal strings.
mod u64_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
