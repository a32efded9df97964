//! Wallet credentials: a passive holder for an address and its keys, plus mnemonic-based generation.

pub mod keys;
pub mod mnemonic;

use std::fmt;

/// Prefix of a ledger address.
pub const ADDRESS_PREFIX: &str = "Mx";
/// Prefix of an encoded public key.
pub const PUBLIC_KEY_PREFIX: &str = "Mp";

/// Wallet data. Holds credentials as given; validation is up to whoever installs the wallet.
///
/// Not serializable: secrets only leave through the accessors.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Wallet {
    addr: String,
    pub_key: String,
    priv_key: String,
    mnemonic: String,
}

impl Wallet {
    pub fn new(
        addr: impl Into<String>,
        pub_key: impl Into<String>,
        priv_key: impl Into<String>,
        mnemonic: impl Into<String>,
    ) -> Self {
        Self {
            addr: addr.into(),
            pub_key: pub_key.into(),
            priv_key: priv_key.into(),
            mnemonic: mnemonic.into(),
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn pub_key(&self) -> &str {
        &self.pub_key
    }

    pub fn priv_key(&self) -> &str {
        &self.priv_key
    }

    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// True for `Mx` followed by exactly 40 hex digits.
    pub fn is_address(addr: &str) -> bool {
        addr.strip_prefix(ADDRESS_PREFIX)
            .map_or(false, |body| {
                body.len() == 40 && body.chars().all(|c| c.is_ascii_hexdigit())
            })
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("addr", &self.addr)
            .field("pub_key", &self.pub_key)
            .field("priv_key", &"<redacted>")
            .field("mnemonic", &"<redacted>")
            .finish()
    }
}
