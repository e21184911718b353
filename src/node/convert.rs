//! Translation between the node's dynamic SCALE values and the JSON shapes the
//! crate's types deserialize from.
//!
//! Struct fields and variant names are camel-cased, `Option` collapses to
//! `null` or its content, byte sequences become `0x` hex and single-field
//! tuple structs unwrap to their field.

use serde_json::{Map, Number, Value as Json};
use subxt::ext::scale_value::{Composite, Primitive, Value, ValueDef};

use crate::types::{EventRecord, Transaction, to_hex};

pub fn to_json<T>(value: &Value<T>) -> Json {
    match &value.value {
        ValueDef::Composite(composite) => composite_to_json(composite),
        ValueDef::Variant(variant) => match (variant.name.as_str(), &variant.values) {
            ("None", fields) if len(fields) == 0 => Json::Null,
            ("Some", Composite::Unnamed(fields)) if fields.len() == 1 => to_json(&fields[0]),
            (name, fields) if len(fields) == 0 => Json::String(camel_case(name)),
            (name, fields) => {
                let mut object = Map::new();
                object.insert(camel_case(name), composite_to_json(fields));
                Json::Object(object)
            }
        },
        ValueDef::BitSequence(bits) => Json::Array(bits.iter().map(Json::Bool).collect()),
        ValueDef::Primitive(primitive) => primitive_to_json(primitive),
    }
}

/// Event data is positional, named fields included.
pub fn event_record<T>(pallet: &str, variant: &str, fields: &Composite<T>) -> EventRecord {
    let data = match fields {
        Composite::Named(fields) => fields.iter().map(|(_, value)| to_json(value)).collect(),
        Composite::Unnamed(values) => values.iter().map(to_json).collect(),
    };
    EventRecord {
        module: camel_case(pallet),
        name: variant.to_string(),
        data,
    }
}

/// Arguments of the contracts pallet call, in declaration order.
pub fn call_fields(transaction: &Transaction) -> Vec<Value> {
    match transaction {
        Transaction::PutCode(input) => vec![
            Value::u128(input.gas_limit.into()),
            Value::from_bytes(&input.code),
        ],
        Transaction::Instantiate(input) => vec![
            Value::u128(input.endowment),
            Value::u128(input.gas_limit.into()),
            Value::from_bytes(&input.code_hash),
            Value::from_bytes(&input.data),
        ],
        Transaction::Call(input) => vec![
            Value::unnamed_variant("Id", [Value::from_bytes(input.dest)]),
            Value::u128(input.value),
            Value::u128(input.gas_limit.into()),
            Value::from_bytes(&input.data),
        ],
    }
}

fn len<T>(composite: &Composite<T>) -> usize {
    match composite {
        Composite::Named(fields) => fields.len(),
        Composite::Unnamed(values) => values.len(),
    }
}

fn composite_to_json<T>(composite: &Composite<T>) -> Json {
    match composite {
        Composite::Named(fields) => Json::Object(
            fields
                .iter()
                .map(|(name, value)| (camel_case(name), to_json(value)))
                .collect(),
        ),
        Composite::Unnamed(values) => {
            if let Some(bytes) = as_bytes(values) {
                return Json::String(to_hex(&bytes));
            }
            match values.as_slice() {
                [single] => to_json(single),
                _ => Json::Array(values.iter().map(to_json).collect()),
            }
        }
    }
}

// Without the type registry a u8 is indistinguishable from any other small
// unsigned integer, so any non-empty run of values below 256 reads as bytes.
// Holds for every contracts pallet shape: trie ids, hashes, account ids.
fn as_bytes<T>(values: &[Value<T>]) -> Option<Vec<u8>> {
    if values.is_empty() {
        return None;
    }
    values
        .iter()
        .map(|value| match &value.value {
            ValueDef::Primitive(Primitive::U128(n)) => u8::try_from(*n).ok(),
            _ => None,
        })
        .collect()
}

fn primitive_to_json(primitive: &Primitive) -> Json {
    match primitive {
        Primitive::Bool(b) => Json::Bool(*b),
        Primitive::Char(c) => Json::String(c.to_string()),
        Primitive::String(s) => Json::String(s.clone()),
        // Larger than a JSON number can carry: decimal string.
        Primitive::U128(n) => match u64::try_from(*n) {
            Ok(n) => Json::Number(Number::from(n)),
            Err(_) => Json::String(n.to_string()),
        },
        Primitive::I128(n) => match i64::try_from(*n) {
            Ok(n) => Json::Number(Number::from(n)),
            Err(_) => Json::String(n.to_string()),
        },
        Primitive::U256(bytes) | Primitive::I256(bytes) => Json::String(to_hex(bytes)),
    }
}

fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for (i, c) in name.chars().enumerate() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else if i == 0 {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::{AccountId, Bytes, CallInput, ContractInfo, H256};

    fn account(byte: u8) -> Value {
        Value::unnamed_composite([Value::from_bytes([byte; 32])])
    }

    #[test]
    fn test_alive_contract_info() {
        let value = Value::unnamed_variant(
            "Alive",
            [Value::named_composite([
                ("trie_id", Value::from_bytes([0x11; 40])),
                ("storage_size", Value::u128(8)),
                ("code_hash", account(0xcd)),
                ("rent_allowance", Value::u128(u128::MAX)),
                ("deduct_block", Value::u128(3)),
                ("last_write", Value::unnamed_variant("Some", [Value::u128(5)])),
            ])],
        );
        let info: ContractInfo = serde_json::from_value(to_json(&value)).unwrap();
        let alive = info.as_alive().unwrap();
        assert_eq!(alive.trie_id, Bytes(vec![0x11; 40]));
        assert_eq!(alive.code_hash, Bytes(vec![0xcd; 32]));
        assert_eq!(alive.rent_allowance, u128::MAX);
        assert_eq!(alive.last_write, Some(5));
    }

    #[test]
    fn test_tombstone_contract_info() {
        let value = Value::unnamed_variant("Tombstone", [account(4)]);
        let info: ContractInfo = serde_json::from_value(to_json(&value)).unwrap();
        assert_eq!(info, ContractInfo::Tombstone(H256([4; 32])));
    }

    #[test]
    fn test_option_and_wide_integers() {
        assert_eq!(to_json(&Value::unnamed_variant("None", Vec::<Value>::new())), Json::Null);
        assert_eq!(to_json(&Value::u128(42)), json!(42));
        assert_eq!(to_json(&Value::u128(u128::MAX)), json!(u128::MAX.to_string()));
        assert_eq!(to_json(&Value::bool(true)), json!(true));
    }

    #[test]
    fn test_event_record_is_positional() {
        let instantiated = event_record(
            "Contracts",
            "Instantiated",
            &Composite::Unnamed(vec![account(1), account(2)]),
        );
        assert!(instantiated.is("contracts", "Instantiated"));
        assert_eq!(instantiated.field::<AccountId>(1), Some(AccountId([2; 32])));

        let stored = event_record(
            "Contracts",
            "CodeStored",
            &Composite::Named(vec![("code_hash".to_string(), Value::from_bytes([0xab, 0xcd]))]),
        );
        assert_eq!(stored.data, vec![json!("0xabcd")]);

        let failed = event_record("System", "ExtrinsicFailed", &Composite::<()>::Unnamed(vec![]));
        assert!(failed.is("system", "ExtrinsicFailed"));
    }

    #[test]
    fn test_call_fields_address_by_id() {
        let transaction: Transaction = CallInput::builder()
            .dest(AccountId([1; 32]))
            .value(7)
            .gas_limit(500)
            .data(Bytes(vec![0x2a]))
            .build()
            .into();
        let fields = call_fields(&transaction);
        assert_eq!(fields.len(), 4);
        assert_eq!(to_json(&fields[0]), json!({ "id": to_hex(&[1; 32]) }));
        assert_eq!(fields[1], Value::u128(7));
        assert_eq!(fields[2], Value::u128(500));
        assert_eq!(to_json(&fields[3]), json!("0x2a"));
    }
}
