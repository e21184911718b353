#![allow(dead_code)]

use std::{
    collections::HashMap,
    io::Write,
    sync::{Arc, Mutex},
};

use contract_ops::{
    chain::{ChainState, TransactionSubmitter},
    node::Error,
    signer::Signer,
    types::{AccountId, Bytes, ContractInfo, EventRecord, H256, Transaction, TxOutcome},
};
use serde_json::Value;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

pub fn event(module: &str, name: &str, data: Vec<Value>) -> EventRecord {
    EventRecord {
        module: module.to_string(),
        name: name.to_string(),
        data,
    }
}

pub fn finalized(events: Vec<EventRecord>) -> TxOutcome {
    TxOutcome::Finalized {
        block_hash: H256([0xbb; 32]),
        events,
    }
}

/// Answers every submission with the same canned result and remembers what
/// was submitted.
pub struct StubSubmitter {
    outcome: Result<TxOutcome, String>,
    pub submitted: Mutex<Vec<(Signer, Transaction)>>,
}

impl StubSubmitter {
    pub fn returning(outcome: TxOutcome) -> Self {
        Self {
            outcome: Ok(outcome),
            submitted: Mutex::new(vec![]),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            submitted: Mutex::new(vec![]),
        }
    }

    pub fn submitted(&self) -> Vec<(Signer, Transaction)> {
        self.submitted.lock().unwrap().clone()
    }
}

impl TransactionSubmitter for StubSubmitter {
    async fn submit(&self, signer: &Signer, transaction: Transaction) -> Result<TxOutcome, Error> {
        self.submitted
            .lock()
            .unwrap()
            .push((signer.clone(), transaction));
        self.outcome.clone().map_err(Error::Unexpected)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildStorageRequest {
    pub child_root: String,
    pub child_key: String,
    pub child_type: u32,
    pub key: String,
}

#[derive(Default)]
pub struct StubChain {
    pub contracts: HashMap<AccountId, ContractInfo>,
    pub storage: HashMap<String, Bytes>,
    pub requests: Mutex<Vec<ChildStorageRequest>>,
}

impl StubChain {
    pub fn requests(&self) -> Vec<ChildStorageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ChainState for StubChain {
    async fn contract_info_of(&self, address: &AccountId) -> Result<Option<ContractInfo>, Error> {
        Ok(self.contracts.get(address).cloned())
    }

    async fn get_child_storage(
        &self,
        child_root: &str,
        child_key: &str,
        child_type: u32,
        key: &str,
    ) -> Result<Option<Bytes>, Error> {
        self.requests.lock().unwrap().push(ChildStorageRequest {
            child_root: child_root.to_string(),
            child_key: child_key.to_string(),
            child_type,
            key: key.to_string(),
        });
        Ok(self.storage.get(key).cloned())
    }
}

#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Routes this thread's log output into a buffer for as long as the guard lives.
pub fn capture_logs() -> (LogBuffer, DefaultGuard) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}
