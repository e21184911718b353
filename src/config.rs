use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::{
    logging,
    signer::{self, Signer},
    types::{AccountId, Balance, Bytes, CodeHash, Gas},
};

pub const DEFAULT_GAS_LIMIT: &str = "100000000000";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[clap(
    version = "0.1.0",
    about = "contract-ops",
    long_about = r#"Deploy, instantiate, call and inspect WASM contracts on a node"#
)]
pub struct Config {
    #[clap(
        long,
        env = "LOG_FORMAT",
        help = "Log format (plain, json)",
        default_value = "plain"
    )]
    pub log_format: logging::Format,

    #[clap(
        long,
        env = "NODE_URL",
        help = "Websocket RPC endpoint of the node (e.g., ws://localhost:9944)",
        default_value = "ws://127.0.0.1:9944"
    )]
    pub node_url: String,

    #[clap(
        long,
        env = "SIGNER",
        help = "Secret URI of the signing key: dev account, mnemonic or seed (e.g., //Alice)",
        default_value = "//Alice"
    )]
    pub signer: String,

    #[clap(subcommand)]
    pub command: Command,
}

impl Config {
    pub fn signer(&self) -> Result<Signer, signer::Error> {
        Signer::from_uri(&self.signer)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum Command {
    /// Upload a WASM blob and print its code hash
    Deploy {
        #[clap(long, help = "Path to the compiled contract (.wasm)")]
        wasm: PathBuf,
        #[clap(long, default_value = DEFAULT_GAS_LIMIT)]
        gas_limit: Gas,
    },
    /// Instantiate stored code and print the contract address
    Instantiate {
        #[clap(long)]
        code_hash: CodeHash,
        #[clap(long, help = "Encoded constructor input (hex)")]
        data: Bytes,
        #[clap(long, default_value = "0")]
        endowment: Balance,
        #[clap(long, default_value = DEFAULT_GAS_LIMIT)]
        gas_limit: Gas,
    },
    /// Call a contract message
    Call {
        #[clap(long)]
        address: AccountId,
        #[clap(long, help = "Encoded message input (hex)")]
        data: Bytes,
        #[clap(long, help = "Value transferred with the call, none if omitted")]
        endowment: Option<Balance>,
        #[clap(long, default_value = DEFAULT_GAS_LIMIT)]
        gas_limit: Gas,
    },
    /// Read a raw value from a contract's storage
    Storage {
        #[clap(long)]
        address: AccountId,
        #[clap(long, help = "Storage key (hex), hashed before lookup")]
        key: Bytes,
    },
}
