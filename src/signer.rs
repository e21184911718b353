use std::{fmt, str::FromStr};

use subxt_signer::{
    SecretUri, SecretUriError,
    sr25519::{self, Keypair},
};
use thiserror::Error as ThisError;

use crate::types::AccountId;

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("Invalid secret URI: {0}")]
    Uri(#[from] SecretUriError),
    #[error("Invalid sr25519 key: {0}")]
    Key(#[from] sr25519::Error),
}

/// An sr25519 key that signs transactions locally before submission.
#[derive(Clone)]
pub struct Signer {
    keypair: Keypair,
}

impl Signer {
    /// Derives the key from a secret URI such as `//Alice` or a mnemonic with
    /// derivation junctions.
    pub fn from_uri(uri: &str) -> Result<Self, Error> {
        let uri = SecretUri::from_str(uri)?;
        Ok(Self {
            keypair: Keypair::from_uri(&uri)?,
        })
    }

    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    pub fn account_id(&self) -> AccountId {
        AccountId(self.keypair.public_key().0)
    }
}

impl PartialEq for Signer {
    fn eq(&self, other: &Self) -> bool {
        self.account_id() == other.account_id()
    }
}

impl Eq for Signer {}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signer({})", self.account_id())
    }
}
