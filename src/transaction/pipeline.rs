//! Transaction building, signing, submission and confirmation.
//!
//! # Responsibilities
//! - Build requests from the sender's current sequence number
//! - Fetch the canonical signing message and sign it
//! - Submit and classify the ledger's answer
//! - Poll for confirmation with a fixed interval and attempt cap
//!
//! Each call is a sequential chain of remote requests. Concurrent submissions
//! from the same account race on the sequence number read; callers must keep
//! one outstanding transaction per account or accept the ledger's rejection.

use std::time::Duration;

use serde::Serialize;
use tokio::time::sleep;

use crate::config::{ClientConfig, GasConfig, PollingConfig};
use crate::identity::encoding::{decode_hex, to_hex_literal};
use crate::identity::{Account, AccountAddress};
use crate::ledger::client::LedgerClient;
use crate::ledger::types::{LedgerError, LedgerResult, TransactionStatus};
use crate::observability::metrics;
use crate::transaction::types::{
    ConfirmedTransaction, Payload, SignatureBlock, SignedTransaction, SigningMessage,
    SubmittedTransaction, TransactionRequest, TransactionState, ED25519_SIGNATURE_TYPE,
};

/// Write-side pipeline over a [`LedgerClient`].
#[derive(Debug, Clone)]
pub struct TransactionPipeline {
    ledger: LedgerClient,
    gas: GasConfig,
    polling: PollingConfig,
}

impl TransactionPipeline {
    /// `polling.max_attempts` is raised to 1 if zero: every wait queries at least once.
    pub fn new(ledger: LedgerClient, gas: GasConfig, mut polling: PollingConfig) -> Self {
        polling.max_attempts = polling.max_attempts.max(1);
        Self {
            ledger,
            gas,
            polling,
        }
    }

    /// Build a pipeline and its ledger client from a full config.
    pub fn from_config(config: &ClientConfig) -> LedgerResult<Self> {
        let ledger = LedgerClient::new(&config.node)?;
        Ok(Self::new(ledger, config.gas.clone(), config.polling.clone()))
    }

    pub fn ledger(&self) -> &LedgerClient {
        &self.ledger
    }

    pub fn gas(&self) -> &GasConfig {
        &self.gas
    }

    /// Build an unsigned request using the sender's sequence number as of now.
    pub async fn build(
        &self,
        sender: &AccountAddress,
        payload: Payload,
    ) -> LedgerResult<TransactionRequest> {
        tracing::debug!(sender = %sender, state = %TransactionState::Building, "Building transaction");

        let sequence_number = match self.ledger.sequence_number(sender).await {
            Ok(n) => n,
            Err(LedgerError::NotFound(body)) => {
                return Err(LedgerError::SequenceFetchFailed { status: 404, body })
            }
            Err(LedgerError::Remote { status, body }) => {
                return Err(LedgerError::SequenceFetchFailed { status, body })
            }
            Err(e) => return Err(e),
        };

        Ok(self.build_with_sequence_number(sender, sequence_number, payload))
    }

    /// Build an unsigned request with a known sequence number.
    pub fn build_with_sequence_number(
        &self,
        sender: &AccountAddress,
        sequence_number: u64,
        payload: Payload,
    ) -> TransactionRequest {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        TransactionRequest {
            sender: *sender,
            sequence_number,
            max_gas_amount: self.gas.max_gas_amount,
            gas_unit_price: self.gas.gas_unit_price,
            expiration_timestamp_secs: now + self.gas.expiration_window_secs,
            payload,
        }
    }

    /// Ask the ledger for the canonical bytes to sign for `request`.
    pub async fn signing_message(&self, request: &TransactionRequest) -> LedgerResult<Vec<u8>> {
        tracing::debug!(
            sender = %request.sender,
            sequence_number = request.sequence_number,
            state = %TransactionState::SigningMessageRequested,
            "Requesting signing message"
        );

        let raw = self
            .ledger
            .post_json("signing_message", "/transactions/signing_message", request)
            .await?;
        if raw.status != 200 {
            return Err(LedgerError::SigningMessageFailed {
                status: raw.status,
                body: raw.body,
                request: request_json(request),
            });
        }

        let message: SigningMessage = raw.json()?;
        decode_hex(&message.message)
            .map_err(|e| LedgerError::Decode(format!("signing message: {}", e)))
    }

    /// Fetch the signing message for `request` and sign it with `account`.
    pub async fn sign(
        &self,
        account: &Account,
        request: TransactionRequest,
    ) -> LedgerResult<SignedTransaction> {
        let message = self.signing_message(&request).await?;
        sign_with_message(account, request, &message)
    }

    /// Submit a signed transaction and return its hash.
    pub async fn submit(&self, signed: &SignedTransaction) -> LedgerResult<String> {
        let raw = self
            .ledger
            .post_json("submit_transaction", "/transactions", signed)
            .await?;
        if raw.status != 202 {
            metrics::record_transaction("rejected");
            tracing::warn!(
                sender = %signed.request().sender,
                status = raw.status,
                state = %TransactionState::Rejected,
                "Transaction rejected"
            );
            return Err(LedgerError::SubmissionRejected {
                status: raw.status,
                body: raw.body,
                request: request_json(signed),
            });
        }

        let submitted: SubmittedTransaction = raw.json()?;
        metrics::record_transaction("submitted");
        tracing::info!(
            hash = %submitted.hash,
            sender = %signed.request().sender,
            sequence_number = signed.request().sequence_number,
            state = %TransactionState::Submitted,
            "Transaction submitted"
        );
        Ok(submitted.hash)
    }

    /// Poll until the ledger reports the transaction as anything but pending.
    ///
    /// Makes at most `max_attempts` status queries, sleeping `interval_ms`
    /// between them. Not-found counts as pending. Remote errors end the wait
    /// immediately; nothing is resubmitted.
    pub async fn wait_for_transaction(&self, hash: &str) -> LedgerResult<ConfirmedTransaction> {
        let interval = Duration::from_millis(self.polling.interval_ms);
        let max_attempts = self.polling.max_attempts;

        for attempt in 1..=max_attempts {
            match self.ledger.transaction_status(hash).await? {
                TransactionStatus::Committed(transaction) => {
                    metrics::record_transaction("confirmed");
                    metrics::record_confirmation_attempts(attempt);
                    tracing::info!(
                        hash = %hash,
                        attempts = attempt,
                        state = %TransactionState::Confirmed,
                        "Transaction confirmed"
                    );
                    return Ok(ConfirmedTransaction {
                        hash: hash.to_string(),
                        attempts: attempt,
                        transaction,
                    });
                }
                status => {
                    tracing::debug!(hash = %hash, attempt, ?status, "Transaction pending");
                }
            }

            if attempt < max_attempts {
                sleep(interval).await;
            }
        }

        metrics::record_transaction("timed_out");
        metrics::record_confirmation_attempts(max_attempts);
        tracing::warn!(
            hash = %hash,
            attempts = max_attempts,
            state = %TransactionState::TimedOut,
            "Transaction not confirmed"
        );
        Err(LedgerError::ConfirmationTimeout {
            hash: hash.to_string(),
            attempts: max_attempts,
        })
    }

    /// Build, sign and submit `payload` from `account`. Returns the hash.
    pub async fn submit_payload(&self, account: &Account, payload: Payload) -> LedgerResult<String> {
        let request = self.build(&account.address(), payload).await?;
        let signed = self.sign(account, request).await?;
        self.submit(&signed).await
    }

    /// Submit `payload` and wait for confirmation.
    pub async fn execute(
        &self,
        account: &Account,
        payload: Payload,
    ) -> LedgerResult<ConfirmedTransaction> {
        let hash = self.submit_payload(account, payload).await?;
        self.wait_for_transaction(&hash).await
    }
}

/// Attach `account`'s signature over `message` to `request`.
///
/// Fails with `SignerMismatch` when `account` is not the request's sender.
pub fn sign_with_message(
    account: &Account,
    request: TransactionRequest,
    message: &[u8],
) -> LedgerResult<SignedTransaction> {
    if request.sender != account.address() {
        tracing::warn!(
            sender = %request.sender,
            signer = %account.address(),
            "Signing account does not match transaction sender"
        );
        return Err(LedgerError::SignerMismatch {
            sender: request.sender.to_string(),
            signer: account.address().to_string(),
        });
    }

    let signature = account.sign(message);
    tracing::debug!(
        sender = %request.sender,
        state = %TransactionState::Signed,
        "Transaction signed"
    );

    Ok(SignedTransaction::new(
        request,
        SignatureBlock {
            scheme: ED25519_SIGNATURE_TYPE.to_string(),
            public_key: to_hex_literal(account.public_key().as_bytes()),
            signature: to_hex_literal(&signature.to_bytes()),
        },
    ))
}

fn request_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserializable request: {}>", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NodeConfig;
    use crate::transaction::types::ScriptFunction;

    fn pipeline() -> TransactionPipeline {
        let ledger = LedgerClient::new(&NodeConfig::default()).unwrap();
        TransactionPipeline::new(ledger, GasConfig::default(), PollingConfig::default())
    }

    #[test]
    fn test_build_applies_gas_and_expiration() {
        let account = Account::from_seed(&[3u8; 32]).unwrap();
        let before = chrono::Utc::now().timestamp() as u64;
        let request = pipeline().build_with_sequence_number(
            &account.address(),
            5,
            ScriptFunction::new("0x1::TestCoin::transfer").build(),
        );

        assert_eq!(request.sequence_number, 5);
        assert_eq!(request.max_gas_amount, 2000);
        assert_eq!(request.gas_unit_price, 1);
        assert!(request.expiration_timestamp_secs >= before + 600);
        assert!(request.expiration_timestamp_secs <= before + 602);
    }

    #[test]
    fn test_sign_with_message_verifies() {
        let alice = Account::from_seed(&[3u8; 32]).unwrap();
        let bob = Account::from_seed(&[4u8; 32]).unwrap();
        let request = pipeline().build_with_sequence_number(
            &alice.address(),
            0,
            ScriptFunction::new("0x1::TestCoin::transfer").build(),
        );
        let message = b"canonical bytes".to_vec();
        let signed = sign_with_message(&alice, request, &message).unwrap();

        assert!(signed.verify(&message));
        assert!(!signed.verify(b"other bytes"));
        assert_eq!(signed.signature().scheme, "ed25519_signature");
        assert_eq!(signed.signature().public_key, format!("0x{}", alice.public_key_hex()));
        assert_eq!(signed.signature().signature.len(), 2 + 128);

        let signature_bytes = decode_hex(&signed.signature().signature).unwrap();
        assert!(!crate::identity::account::verify_signature(
            bob.public_key().as_bytes(),
            &message,
            &signature_bytes
        ));
    }

    #[test]
    fn test_sign_with_message_rejects_other_signer() {
        let alice = Account::from_seed(&[3u8; 32]).unwrap();
        let bob = Account::from_seed(&[4u8; 32]).unwrap();
        let request = pipeline().build_with_sequence_number(
            &alice.address(),
            0,
            ScriptFunction::new("0x1::TestCoin::transfer").build(),
        );

        let err = sign_with_message(&bob, request, b"canonical bytes").unwrap_err();
        match err {
            LedgerError::SignerMismatch { sender, signer } => {
                assert_eq!(sender, alice.address().to_string());
                assert_eq!(signer, bob.address().to_string());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_zero_attempts_raised_to_one() {
        let ledger = LedgerClient::new(&NodeConfig::default()).unwrap();
        let pipeline = TransactionPipeline::new(
            ledger,
            GasConfig::default(),
            PollingConfig {
                interval_ms: 1,
                max_attempts: 0,
            },
        );
        assert_eq!(pipeline.polling.max_attempts, 1);
    }
}
