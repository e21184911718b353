//! The two node-facing collaborators the contract operations are built on.
//!
//! [`node::Client`](crate::node::Client) implements both against a live node;
//! tests substitute their own implementations.

use crate::{
    node::Error,
    signer::Signer,
    types::{AccountId, Bytes, ContractInfo, Transaction, TxOutcome},
};

pub trait ChainState: Send + Sync {
    fn contract_info_of(
        &self,
        address: &AccountId,
    ) -> impl Future<Output = Result<Option<ContractInfo>, Error>> + Send;

    /// Reads one value from a contract's child trie. `None` means the slot is empty.
    fn get_child_storage(
        &self,
        child_root: &str,
        child_key: &str,
        child_type: u32,
        key: &str,
    ) -> impl Future<Output = Result<Option<Bytes>, Error>> + Send;
}

/// Signs, submits and waits until the transaction is finalized or rejected.
pub trait TransactionSubmitter: Send + Sync {
    fn submit(
        &self,
        signer: &Signer,
        transaction: Transaction,
    ) -> impl Future<Output = Result<TxOutcome, Error>> + Send;
}
