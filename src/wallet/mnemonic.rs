use bip39::{Language, Mnemonic};
use rand::Rng;

use crate::error::Result;

/// Entropy behind a generated phrase: 128 bits, i.e. 12 words.
pub const MNEMONIC_ENTROPY_BYTES: usize = 16;

/// Generates a new 12-word English BIP39 mnemonic phrase.
pub fn generate_mnemonic() -> Result<String> {
    let mut entropy = [0u8; MNEMONIC_ENTROPY_BYTES];
    rand::thread_rng().fill(&mut entropy);

    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy)?;
    Ok(mnemonic.to_string())
}

/// Validates a BIP39 mnemonic phrase
pub fn validate_mnemonic(mnemonic: &str) -> bool {
    Mnemonic::parse_in_normalized(Language::English, mnemonic).is_ok()
}
