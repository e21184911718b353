use thiserror::Error as ThisError;

use crate::{node, types::EventRecord};

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("Deployment failed.")]
    Deployment { extrinsic_failed: Option<EventRecord> },
    #[error("Instantiation failed.")]
    Instantiation { extrinsic_failed: Option<EventRecord> },
    #[error("Contract is not alive or does not exist")]
    ContractNotAlive,
    #[error("Trie id is {0} bytes, expected at least {1}")]
    MalformedTrieId(usize, usize),
    #[error("Event {module}.{name} has no usable data field {index}")]
    MalformedEvent {
        module: String,
        name: String,
        index: usize,
    },
    #[error("Transaction rejected: {0}")]
    Rejected(String),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error(transparent)]
    Node(#[from] node::Error),
}
