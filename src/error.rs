use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Asset error: {0}")]
    Asset(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("BIP39 error: {0}")]
    Bip39(String),

    #[error("BIP32 error: {0}")]
    Bip32(String),
}

pub type Result<T> = std::result::Result<T, ExchangeError>;

impl From<bip39::Error> for ExchangeError {
    fn from(err: bip39::Error) -> Self {
        ExchangeError::Bip39(err.to_string())
    }
}

impl From<secp256k1::Error> for ExchangeError {
    fn from(err: secp256k1::Error) -> Self {
        ExchangeError::Crypto(err.to_string())
    }
}

impl From<bip32::Error> for ExchangeError {
    fn from(err: bip32::Error) -> Self {
        ExchangeError::Bip32(err.to_string())
    }
}
