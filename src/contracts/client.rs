use std::{fmt, path::Path};

use tracing::{debug, error, info};

use super::{Error, storage::ChildStorageLocation};
use crate::{
    chain::{ChainState, TransactionSubmitter},
    signer::Signer,
    types::{
        AccountId, Balance, Bytes, CONTRACTS, CallInput, CodeHash, EventRecord, Gas,
        InstantiateInput, PutCodeInput, Transaction, TxOutcome,
    },
};

pub const CODE_STORED: &str = "CodeStored";
pub const INSTANTIATED: &str = "Instantiated";
pub const SYSTEM: &str = "system";
pub const EXTRINSIC_FAILED: &str = "ExtrinsicFailed";

/// Operations whose success is signalled by a specific event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Deployment,
    Instantiation,
}

impl Operation {
    fn failed(self, extrinsic_failed: Option<EventRecord>) -> Error {
        match self {
            Operation::Deployment => Error::Deployment { extrinsic_failed },
            Operation::Instantiation => Error::Instantiation { extrinsic_failed },
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Deployment => f.write_str("Deployment"),
            Operation::Instantiation => f.write_str("Instantiation"),
        }
    }
}

/// Builds the error for an operation whose success event is missing.
///
/// A `system.ExtrinsicFailed` record, if the outcome has one, is logged and
/// attached to the error. Either way the operation's own error is returned:
/// the missing success event is what makes it a failure.
pub fn report_failure(operation: Operation, outcome: &TxOutcome) -> Error {
    let extrinsic_failed = outcome.find_event(SYSTEM, EXTRINSIC_FAILED).cloned();
    if let Some(record) = &extrinsic_failed {
        let detail =
            serde_json::to_string_pretty(record).unwrap_or_else(|_| format!("{:?}", record));
        error!("{} hit ExtrinsicFailed {}", operation, detail);
    }
    operation.failed(extrinsic_failed)
}

fn extract<T>(record: &EventRecord, index: usize) -> Result<T, Error>
where
    T: serde::de::DeserializeOwned,
{
    record.field(index).ok_or_else(|| Error::MalformedEvent {
        module: record.module.clone(),
        name: record.name.clone(),
        index,
    })
}

/// Deploys, instantiates, calls and reads `contracts` module state.
///
/// Holds no state of its own beyond the two collaborators, so one client can
/// serve concurrent callers.
#[derive(Clone, Debug)]
pub struct ContractsClient<C, S> {
    chain: C,
    submitter: S,
}

impl<C, S> ContractsClient<C, S>
where
    C: ChainState,
    S: TransactionSubmitter,
{
    pub fn new(chain: C, submitter: S) -> Self {
        Self { chain, submitter }
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    async fn submit(&self, signer: &Signer, transaction: Transaction) -> Result<TxOutcome, Error> {
        debug!(
            "Submitting {}.{} as {}",
            CONTRACTS,
            transaction.method(),
            signer.account_id()
        );
        let outcome = self.submitter.submit(signer, transaction).await?;
        match outcome {
            TxOutcome::Rejected { reason } => Err(Error::Rejected(reason)),
            finalized => Ok(finalized),
        }
    }

    /// Uploads the WASM blob at `file_path` and returns its code hash.
    pub async fn deploy_code(
        &self,
        signer: &Signer,
        file_path: impl AsRef<Path>,
        gas_limit: Gas,
    ) -> Result<CodeHash, Error> {
        let code = tokio::fs::read(file_path.as_ref()).await?;
        let input = PutCodeInput::builder()
            .gas_limit(gas_limit)
            .code(Bytes(code))
            .build();
        let outcome = self.submit(signer, input.into()).await?;

        let Some(record) = outcome.find_event(CONTRACTS, CODE_STORED) else {
            return Err(report_failure(Operation::Deployment, &outcome));
        };
        let code_hash: CodeHash = extract(record, 0)?;
        info!("Code stored {}", code_hash);
        Ok(code_hash)
    }

    /// Instantiates previously stored code and returns the new contract's address.
    pub async fn instantiate(
        &self,
        signer: &Signer,
        code_hash: CodeHash,
        input_data: Bytes,
        endowment: Balance,
        gas_limit: Gas,
    ) -> Result<AccountId, Error> {
        let input = InstantiateInput::builder()
            .endowment(endowment)
            .gas_limit(gas_limit)
            .code_hash(code_hash)
            .data(input_data)
            .build();
        let outcome = self.submit(signer, input.into()).await?;

        let Some(record) = outcome.find_event(CONTRACTS, INSTANTIATED) else {
            return Err(report_failure(Operation::Instantiation, &outcome));
        };
        // Instantiated(deployer, contract)
        let address: AccountId = extract(record, 1)?;
        info!("Contract instantiated at {}", address);
        Ok(address)
    }

    /// Calls an existing contract, transferring `endowment` if given (nothing
    /// otherwise). Success means the submitter saw the transaction finalized;
    /// the event log is not inspected.
    pub async fn call_contract(
        &self,
        signer: &Signer,
        contract_address: AccountId,
        input_data: Bytes,
        gas_limit: Gas,
        endowment: Option<Balance>,
    ) -> Result<(), Error> {
        let input = CallInput::builder()
            .dest(contract_address)
            .maybe_value(endowment)
            .gas_limit(gas_limit)
            .data(input_data)
            .build();
        self.submit(signer, input.into()).await?;
        info!("Called contract {}", contract_address);
        Ok(())
    }

    /// Reads the raw value stored under `storage_key` by a live contract.
    pub async fn get_contract_storage(
        &self,
        contract_address: &AccountId,
        storage_key: &[u8],
    ) -> Result<Option<Bytes>, Error> {
        let info = self.chain.contract_info_of(contract_address).await?;
        let alive = info
            .as_ref()
            .and_then(|info| info.as_alive())
            .ok_or(Error::ContractNotAlive)?;

        let location = ChildStorageLocation::new(&alive.trie_id.0, storage_key)?;
        let value = self
            .chain
            .get_child_storage(
                &location.child_root,
                &location.child_key,
                location.child_type,
                &location.hashed_key,
            )
            .await?;
        Ok(value)
    }
}
