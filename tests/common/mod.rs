//! Shared mock-ledger helpers for integration tests.

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use ledger_client::config::{GasConfig, NodeConfig, PollingConfig};
use ledger_client::{AccountAddress, LedgerClient, TransactionPipeline};

/// Canonical bytes the mock signing-message endpoint hands out.
#[allow(dead_code)]
pub const SIGNING_MESSAGE: &[u8] = b"\xb5\xe9\x7d\xb0canonical-transaction-bytes";

/// Pipeline pointed at the mock server with a short poll interval.
pub fn pipeline_for(server: &MockServer) -> TransactionPipeline {
    pipeline_with_polling(
        server,
        PollingConfig {
            interval_ms: 10,
            max_attempts: 10,
        },
    )
}

pub fn pipeline_with_polling(server: &MockServer, polling: PollingConfig) -> TransactionPipeline {
    let node = NodeConfig {
        base_url: server.uri(),
        faucet_url: server.uri(),
        request_timeout_secs: 5,
    };
    let ledger = LedgerClient::new(&node).expect("mock URL is valid");
    TransactionPipeline::new(ledger, GasConfig::default(), polling)
}

#[allow(dead_code)]
pub async fn mount_account(server: &MockServer, address: &AccountAddress, sequence_number: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/accounts/{}", address)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sequence_number": sequence_number.to_string(),
            "authentication_key": address.to_hex_literal(),
        })))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_signing_message(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/transactions/signing_message"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": format!("0x{}", hex::encode(SIGNING_MESSAGE)),
        })))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_submit(server: &MockServer, hash: &str) {
    Mock::given(method("POST"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "type": "pending_transaction",
            "hash": hash,
        })))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub fn committed_body(hash: &str) -> Value {
    json!({
        "type": "user_transaction",
        "hash": hash,
        "success": true,
        "vm_status": "Executed successfully",
    })
}

#[allow(dead_code)]
pub async fn mount_committed(server: &MockServer, hash: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/transactions/{}", hash)))
        .respond_with(ResponseTemplate::new(200).set_body_json(committed_body(hash)))
        .mount(server)
        .await;
}

/// Requests received so far that match a method and path.
#[allow(dead_code)]
pub async fn requests_to(server: &MockServer, verb: &str, route: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == verb && r.url.path() == route)
        .collect()
}
