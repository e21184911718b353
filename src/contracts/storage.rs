//! Locating a value inside a contract's child trie.

use blake2::{Blake2b, Digest, digest::consts::U32};

use super::Error;
use crate::types::to_hex;

type Blake2b256 = Blake2b<U32>;

/// The node keys a child trie by the trie id with its storage prefix stripped,
/// which leaves the trailing 32 bytes.
pub const CHILD_INFO_KEY_LEN: usize = 32;

/// Child type passed to `state_getChildStorage`; `1` is the default child trie.
pub const DEFAULT_CHILD_TYPE: u32 = 1;

pub fn child_info_key(trie_id: &[u8]) -> Result<&[u8], Error> {
    let start = trie_id
        .len()
        .checked_sub(CHILD_INFO_KEY_LEN)
        .ok_or(Error::MalformedTrieId(trie_id.len(), CHILD_INFO_KEY_LEN))?;
    Ok(&trie_id[start..])
}

pub fn hashed_storage_key(storage_key: &[u8]) -> [u8; 32] {
    let digest = Blake2b256::digest(storage_key);
    let mut hashed = [0u8; 32];
    hashed.copy_from_slice(&digest);
    hashed
}

/// Arguments of a child-storage read, hex encoded the way the node takes them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildStorageLocation {
    pub child_root: String,
    pub child_key: String,
    pub child_type: u32,
    pub hashed_key: String,
}

impl ChildStorageLocation {
    pub fn new(trie_id: &[u8], storage_key: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            child_root: to_hex(trie_id),
            child_key: to_hex(child_info_key(trie_id)?),
            child_type: DEFAULT_CHILD_TYPE,
            hashed_key: to_hex(&hashed_storage_key(storage_key)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_info_key_takes_last_32_bytes() {
        let trie_id: Vec<u8> = (0..64).collect();
        let key = child_info_key(&trie_id).unwrap();
        assert_eq!(key.len(), 32);
        assert_eq!(key[0], 32);
        assert_eq!(key[31], 63);
    }

    #[test]
    fn test_child_info_key_of_exact_length_is_whole_id() {
        let trie_id = [7u8; 32];
        assert_eq!(child_info_key(&trie_id).unwrap(), &trie_id[..]);
    }

    #[test]
    fn test_child_info_key_rejects_short_trie_id() {
        let result = child_info_key(&[1, 2, 3]);
        assert!(matches!(result, Err(Error::MalformedTrieId(3, 32))));
    }

    #[test]
    fn test_hashed_storage_key_is_blake2b_256() {
        assert_eq!(
            hex::encode(hashed_storage_key(b"")),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }

    #[test]
    fn test_location_is_prefixed_hex() {
        let trie_id = [0xaa; 40];
        let location = ChildStorageLocation::new(&trie_id, b"key").unwrap();
        assert_eq!(location.child_root, format!("0x{}", "aa".repeat(40)));
        assert_eq!(location.child_key, format!("0x{}", "aa".repeat(32)));
        assert_eq!(location.child_type, 1);
        assert!(location.hashed_key.starts_with("0x"));
        assert_eq!(location.hashed_key.len(), 2 + 64);
    }
}
