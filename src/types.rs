use std::{fmt, str::FromStr};

use bon::Builder;
use hex::FromHex;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

pub type Balance = u128;
pub type Gas = u64;
/// Whatever the node reports as the hash of stored code, kept as opaque bytes.
pub type CodeHash = Bytes;

/// Module name of the contracts pallet as it appears in event records.
pub const CONTRACTS: &str = "contracts";

/// Render bytes the way the node expects them: `0x` followed by lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn from_hex<T: FromHex>(s: &str) -> Result<T, T::Error> {
    T::from_hex(s.strip_prefix("0x").unwrap_or(s))
}

mod hex_serde {
    use std::fmt::Display;

    use hex::FromHex;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, T>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<[u8]>,
    {
        serializer.serialize_str(&super::to_hex(bytes.as_ref()))
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromHex,
        T::Error: Display,
    {
        let s = String::deserialize(deserializer)?;
        super::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Balances may arrive as decimal strings when they outgrow a JSON number.
fn balance_from_number_or_string<'de, D>(deserializer: D) -> Result<Balance, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(Balance),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Number(n) => Ok(n),
        Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

macro_rules! hex_newtype {
    ($name:ident, $inner:ty) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&to_hex(&self.0))
            }
        }

        impl FromStr for $name {
            type Err = hex::FromHexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(from_hex::<$inner>(s)?))
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

/// Opaque byte string, already encoded with the chain's value-encoding scheme.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bytes(#[serde(with = "hex_serde")] pub Vec<u8>);

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes({})", self)
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

hex_newtype!(Bytes, Vec<u8>);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct H256(#[serde(with = "hex_serde")] pub [u8; 32]);

hex_newtype!(H256, [u8; 32]);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(#[serde(with = "hex_serde")] pub [u8; 32]);

hex_newtype!(AccountId, [u8; 32]);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct PutCodeInput {
    pub gas_limit: Gas,
    pub code: Bytes,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct InstantiateInput {
    #[builder(default = 0)]
    pub endowment: Balance,
    pub gas_limit: Gas,
    pub code_hash: CodeHash,
    pub data: Bytes,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct CallInput {
    pub dest: AccountId,
    #[builder(default = 0)]
    pub value: Balance,
    pub gas_limit: Gas,
    pub data: Bytes,
}

/// A `contracts` module call, ready to be signed and submitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "camelCase")]
pub enum Transaction {
    PutCode(PutCodeInput),
    Instantiate(InstantiateInput),
    Call(CallInput),
}

impl Transaction {
    /// Call name within the contracts pallet.
    pub fn method(&self) -> &'static str {
        match self {
            Transaction::PutCode(_) => "put_code",
            Transaction::Instantiate(_) => "instantiate",
            Transaction::Call(_) => "call",
        }
    }
}

impl From<PutCodeInput> for Transaction {
    fn from(input: PutCodeInput) -> Self {
        Transaction::PutCode(input)
    }
}

impl From<InstantiateInput> for Transaction {
    fn from(input: InstantiateInput) -> Self {
        Transaction::Instantiate(input)
    }
}

impl From<CallInput> for Transaction {
    fn from(input: CallInput) -> Self {
        Transaction::Call(input)
    }
}

/// An event emitted while executing a transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub module: String,
    pub name: String,
    #[serde(default)]
    pub data: Vec<Value>,
}

impl EventRecord {
    pub fn is(&self, module: &str, name: &str) -> bool {
        self.module == module && self.name == name
    }

    /// Decodes data field `index`. `None` if the field is missing or has the
    /// wrong shape.
    pub fn field<T: DeserializeOwned>(&self, index: usize) -> Option<T> {
        let value = self.data.get(index)?;
        serde_json::from_value(value.clone()).ok()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "status",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum TxOutcome {
    Finalized {
        block_hash: H256,
        events: Vec<EventRecord>,
    },
    Rejected {
        reason: String,
    },
}

impl TxOutcome {
    pub fn events(&self) -> &[EventRecord] {
        match self {
            TxOutcome::Finalized { events, .. } => events,
            TxOutcome::Rejected { .. } => &[],
        }
    }

    pub fn find_event(&self, module: &str, name: &str) -> Option<&EventRecord> {
        self.events().iter().find(|event| event.is(module, name))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliveContractInfo {
    pub trie_id: Bytes,
    #[serde(default)]
    pub storage_size: u32,
    pub code_hash: CodeHash,
    #[serde(default, deserialize_with = "balance_from_number_or_string")]
    pub rent_allowance: Balance,
    #[serde(default)]
    pub deduct_block: u32,
    #[serde(default)]
    pub last_write: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContractInfo {
    Alive(AliveContractInfo),
    Tombstone(H256),
}

impl ContractInfo {
    pub fn as_alive(&self) -> Option<&AliveContractInfo> {
        match self {
            ContractInfo::Alive(info) => Some(info),
            ContractInfo::Tombstone(_) => None,
        }
    }
}
