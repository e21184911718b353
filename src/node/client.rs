use subxt::{
    OnlineClient, PolkadotConfig,
    backend::rpc::{RpcClient, RpcParams},
    dynamic::Value,
};
use tracing::debug;

use crate::{
    chain::{ChainState, TransactionSubmitter},
    config::Config,
    signer::Signer,
    types::{AccountId, Bytes, ContractInfo, EventRecord, H256, Transaction, TxOutcome},
};

use super::{Error, convert};

/// Runtime pallet name, as opposed to the lowercase module name in event records.
const PALLET: &str = "Contracts";
const CONTRACT_INFO_OF: &str = "ContractInfoOf";
const GET_CHILD_STORAGE: &str = "state_getChildStorage";

/// Talks to a node over its websocket RPC: metadata-driven transactions and
/// storage queries, plus the raw child storage call.
#[derive(Clone)]
pub struct Client {
    api: OnlineClient<PolkadotConfig>,
    rpc: RpcClient,
}

impl Client {
    pub async fn connect(url: &str) -> Result<Self, Error> {
        let rpc = RpcClient::from_url(url).await?;
        let api = OnlineClient::<PolkadotConfig>::from_rpc_client(rpc.clone()).await?;
        debug!("Connected to {} (spec version {})", url, api.runtime_version().spec_version);
        Ok(Client { api, rpc })
    }

    pub async fn new_from_config(config: &Config) -> Result<Self, Error> {
        Client::connect(&config.node_url).await
    }

    pub async fn contract_info_of(&self, address: &AccountId) -> Result<Option<ContractInfo>, Error> {
        let query = subxt::dynamic::storage(
            PALLET,
            CONTRACT_INFO_OF,
            vec![Value::from_bytes(address.0)],
        );
        let Some(thunk) = self.api.storage().at_latest().await?.fetch(&query).await? else {
            return Ok(None);
        };
        let value = convert::to_json(&thunk.to_value().map_err(subxt::Error::from)?);
        Ok(Some(serde_json::from_value(value)?))
    }

    pub async fn get_child_storage(
        &self,
        child_root: &str,
        child_key: &str,
        child_type: u32,
        key: &str,
    ) -> Result<Option<Bytes>, Error> {
        let mut params = RpcParams::new();
        params.push(child_root)?;
        params.push(child_key)?;
        params.push(child_type)?;
        params.push(key)?;
        Ok(self.rpc.request(GET_CHILD_STORAGE, params).await?)
    }

    /// Signs locally, submits, and follows the transaction until it is
    /// finalized or the pool gives up on it.
    pub async fn submit_and_watch(
        &self,
        signer: &Signer,
        transaction: &Transaction,
    ) -> Result<TxOutcome, Error> {
        let payload = subxt::dynamic::tx(
            PALLET,
            transaction.method(),
            convert::call_fields(transaction),
        );
        let progress = self
            .api
            .tx()
            .sign_and_submit_then_watch_default(&payload, signer.keypair())
            .await?;
        debug!("Submitted {:?}", progress.extrinsic_hash());

        let in_block = match progress.wait_for_finalized().await {
            Ok(in_block) => in_block,
            Err(subxt::Error::Transaction(e)) => {
                return Ok(TxOutcome::Rejected {
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let events = in_block
            .fetch_events()
            .await?
            .iter()
            .map(|event| -> Result<EventRecord, Error> {
                let event = event?;
                Ok(convert::event_record(
                    event.pallet_name(),
                    event.variant_name(),
                    &event.field_values().map_err(subxt::Error::from)?,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TxOutcome::Finalized {
            block_hash: H256(in_block.block_hash().0),
            events,
        })
    }
}

impl ChainState for Client {
    async fn contract_info_of(&self, address: &AccountId) -> Result<Option<ContractInfo>, Error> {
        self.contract_info_of(address).await
    }

    async fn get_child_storage(
        &self,
        child_root: &str,
        child_key: &str,
        child_type: u32,
        key: &str,
    ) -> Result<Option<Bytes>, Error> {
        self.get_child_storage(child_root, child_key, child_type, key)
            .await
    }
}

impl TransactionSubmitter for Client {
    async fn submit(&self, signer: &Signer, transaction: Transaction) -> Result<TxOutcome, Error> {
        self.submit_and_watch(signer, &transaction).await
    }
}
