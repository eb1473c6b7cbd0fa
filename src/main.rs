//! Ledger command-line client.
//!
//! ```text
//! ledger-cli [--config ledger.toml] <command>
//!     new-account  → print address, public key and seed
//!     fund         → faucet mint + confirm
//!     balance      → coin balance
//!     transfer     → sign with LEDGER_PRIVATE_KEY, submit, confirm
//!     wait         → poll a hash until confirmed
//!     table-item   → raw table lookup
//!     set-message / get-message → Message module
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use ledger_client::actions::{CoinClient, MessageClient};
use ledger_client::config::{load_config, ClientConfig};
use ledger_client::observability::init_logging;
use ledger_client::{Account, AccountAddress, FaucetClient, TransactionPipeline};

#[derive(Parser)]
#[command(name = "ledger-cli")]
#[command(about = "Build, sign, submit and confirm ledger transactions", long_about = None)]
struct Cli {
    /// TOML config file. Defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override node.base_url.
    #[arg(long, global = true)]
    node_url: Option<String>,

    /// Override node.faucet_url.
    #[arg(long, global = true)]
    faucet_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account (random, or from a hex seed)
    NewAccount {
        #[arg(long)]
        seed: Option<String>,
    },
    /// Mint test coins into an account
    Fund { address: AccountAddress, amount: u64 },
    /// Show an account's coin balance
    Balance { address: AccountAddress },
    /// Transfer coins from the LEDGER_PRIVATE_KEY account
    Transfer { recipient: AccountAddress, amount: u64 },
    /// Wait for a transaction to leave the pending state
    Wait { hash: String },
    /// Look up a table item
    TableItem {
        handle: String,
        key_type: String,
        value_type: String,
        /// Key as JSON
        key: String,
    },
    /// Set the Message module's message for the LEDGER_PRIVATE_KEY account
    SetMessage { contract: AccountAddress, message: String },
    /// Read an account's message
    GetMessage {
        contract: AccountAddress,
        address: AccountAddress,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    if let Some(url) = cli.node_url {
        config.node.base_url = url;
    }
    if let Some(url) = cli.faucet_url {
        config.node.faucet_url = url;
    }

    init_logging(&config.observability)?;
    tracing::debug!(base_url = %config.node.base_url, "ledger-cli starting");

    let pipeline = TransactionPipeline::from_config(&config)?;

    let output = match cli.command {
        Commands::NewAccount { seed } => {
            let account = match seed {
                Some(seed) => Account::from_seed_hex(&seed)?,
                None => Account::generate(),
            };
            json!({
                "address": account.address().to_string(),
                "public_key": account.public_key_hex(),
                "seed": account.seed_hex(),
            })
        }
        Commands::Fund { address, amount } => {
            let faucet = FaucetClient::new(&config.node.faucet_url, pipeline);
            let hashes = faucet.fund_account(&address, amount).await?;
            json!({ "address": address.to_string(), "transactions": hashes })
        }
        Commands::Balance { address } => {
            let balance = pipeline.ledger().balance(&address).await?;
            json!({ "address": address.to_string(), "balance": balance })
        }
        Commands::Transfer { recipient, amount } => {
            let account = Account::from_env()?;
            let coins = CoinClient::new(pipeline.clone());
            let hash = coins.transfer(&account, &recipient, amount).await?;
            confirmed_json(pipeline.wait_for_transaction(&hash).await?)
        }
        Commands::Wait { hash } => confirmed_json(pipeline.wait_for_transaction(&hash).await?),
        Commands::TableItem {
            handle,
            key_type,
            value_type,
            key,
        } => {
            let key: Value = serde_json::from_str(&key)?;
            pipeline
                .ledger()
                .table_item(&handle, &key_type, &value_type, &key)
                .await?
                .unwrap_or(Value::Null)
        }
        Commands::SetMessage { contract, message } => {
            let account = Account::from_env()?;
            let messages = MessageClient::new(pipeline.clone());
            let hash = messages.set_message(&contract, &account, &message).await?;
            confirmed_json(pipeline.wait_for_transaction(&hash).await?)
        }
        Commands::GetMessage { contract, address } => {
            let messages = MessageClient::new(pipeline);
            json!({ "message": messages.get_message(&contract, &address).await? })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn confirmed_json(confirmed: ledger_client::transaction::ConfirmedTransaction) -> Value {
    json!({
        "hash": confirmed.hash,
        "attempts": confirmed.attempts,
        "success": confirmed.success(),
        "vm_status": confirmed.vm_status(),
    })
}
