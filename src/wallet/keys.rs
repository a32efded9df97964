//! Wallet derivation: BIP39 mnemonic → BIP32 node on the ledger's derivation path → secp256k1 key pair → ledger address.

use bip32::{DerivationPath, XPrv};
use bip39::{Language, Mnemonic};
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha3::{Digest, Keccak256};
use tracing::debug;

use crate::error::{ExchangeError, Result};
use crate::wallet::mnemonic::{generate_mnemonic, validate_mnemonic};
use crate::wallet::{Wallet, ADDRESS_PREFIX, PUBLIC_KEY_PREFIX};

/// Derivation path of the first account.
pub const DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";

/// Number of trailing hash bytes that form an address.
const ADDRESS_BYTES: usize = 20;

/// Generates a new mnemonic and derives a wallet from it.
pub fn generate_wallet() -> Result<Wallet> {
    let mnemonic = generate_mnemonic()?;
    let wallet = derive_wallet(&mnemonic)?;
    debug!(address = %wallet.addr(), "generated wallet");
    Ok(wallet)
}

/// Derives a wallet from a mnemonic phrase (empty BIP39 passphrase).
pub fn derive_wallet(mnemonic: &str) -> Result<Wallet> {
    if !validate_mnemonic(mnemonic) {
        return Err(ExchangeError::Validation(
            "Provided mnemonic is not valid according to BIP39".to_string(),
        ));
    }

    let mnemonic_obj = Mnemonic::parse_in_normalized(Language::English, mnemonic)?;
    let seed = mnemonic_obj.to_seed("");

    let private_key = private_key_by_seed(&seed)?;
    let public_key = PublicKey::from_secret_key(&Secp256k1::new(), &private_key);

    Ok(Wallet::new(
        address_by_public_key(&public_key),
        format!("{}{}", PUBLIC_KEY_PREFIX, public_key_body_hex(&public_key)),
        hex::encode(private_key.secret_bytes()),
        mnemonic.to_string(),
    ))
}

fn private_key_by_seed(seed: &[u8]) -> Result<SecretKey> {
    let root = XPrv::new(seed)?;

    let path: DerivationPath = DERIVATION_PATH
        .parse()
        .map_err(|e| ExchangeError::Bip32(format!("Invalid derivation path: {}", e)))?;

    let node = path
        .iter()
        .try_fold(root, |parent, child| parent.derive_child(child))?;

    SecretKey::from_slice(&node.private_key().to_bytes())
        .map_err(|e| ExchangeError::Crypto(format!("Invalid private key: {}", e)))
}

/// Uncompressed public key without the leading `0x04` tag: 64 bytes, 128 hex chars.
fn public_key_body_hex(public_key: &PublicKey) -> String {
    hex::encode(&public_key.serialize_uncompressed()[1..])
}

fn address_by_public_key(public_key: &PublicKey) -> String {
    let hash = Keccak256::digest(&public_key.serialize_uncompressed()[1..]);
    format!(
        "{}{}",
        ADDRESS_PREFIX,
        hex::encode(&hash[hash.len() - ADDRESS_BYTES..])
    )
}
