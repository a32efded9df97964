pub mod core;
pub mod config;
pub mod wallet;
pub mod provider;
pub mod error;

pub use error::{ExchangeError, Result};

// Core API exports
pub use crate::core::asset::{
    Asset,
    AssetError,
    MAX_ASSET_PRECISION,
    MAX_NATURAL_LENGTH,
    NATURAL_PATTERN,
};

pub use config::{get_var, load_env_file, ConfigError, ProviderConfig, CHAIN_ID_VAR, NODE_URL_VAR};
pub use wallet::Wallet;
pub use wallet::keys::{derive_wallet, generate_wallet, DERIVATION_PATH};
pub use wallet::mnemonic::{generate_mnemonic, validate_mnemonic};
pub use provider::{
    LedgerApi,
    NodeStatus,
    Provider,
    ProviderError,
    ProviderResult,
    ProviderStatus,
    StaticLedger,
    PIP_PRECISION,
    MAINNET_CHAIN_ID,
    TESTNET_CHAIN_ID,
};
