//! Ledger provider: wraps a ledger API client with a health status, the set of reserve currencies and the reserve wallet.
//!
//! Queries are refused while the provider is in a failing status (`UnknownError` or worse), so a misconfigured node never gets called. Balances come back from the ledger as integer pip strings and are turned into [`Asset`]s here.

pub mod static_ledger;

use num_bigint::BigInt;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::core::asset::{normalize_symbol, Asset, AssetError};
use crate::error::{ExchangeError, Result};
use crate::wallet::{keys, Wallet};

pub use static_ledger::StaticLedger;

/// Precision of ledger balances: 1 coin = 10^18 pip.
pub const PIP_PRECISION: u32 = 18;

pub const MAINNET_CHAIN_ID: &str = "1";
pub const TESTNET_CHAIN_ID: &str = "2";

/// Provider health. Codes are stable and ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProviderStatus {
    Ok = 0,
    WalletError = 1,
    UnknownError = 2,
    WrongNodeUrl = 3,
    WrongChainId = 4,
}

impl ProviderStatus {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn message(&self) -> &'static str {
        match self {
            ProviderStatus::Ok => "Ok",
            ProviderStatus::WalletError => "Wallet error",
            ProviderStatus::UnknownError => "Unknown error",
            ProviderStatus::WrongNodeUrl => "Wrong node URL",
            ProviderStatus::WrongChainId => "Wrong chain id",
        }
    }

    /// Whether ledger queries may go through. A wallet error alone does not block them.
    pub fn is_operational(&self) -> bool {
        *self < ProviderStatus::UnknownError
    }
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{code: {},  message: {}}}", self.code(), self.message())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Cannot {operation}: error: {status}")]
    Unavailable {
        operation: &'static str,
        status: ProviderStatus,
    },

    #[error("Ledger API error: {0}")]
    Api(String),

    #[error("Malformed {what} from ledger: \"{value}\"")]
    MalformedValue { what: String, value: String },

    #[error("Invalid wallet address: \"{0}\"")]
    InvalidWallet(String),

    #[error(transparent)]
    Asset(#[from] AssetError),
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

impl From<ProviderError> for ExchangeError {
    fn from(err: ProviderError) -> Self {
        ExchangeError::Provider(err.to_string())
    }
}

/// Node status as reported by the ledger API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatus {
    pub version: String,
    pub network: String,
    pub latest_block_height: u64,
}

/// Client for the external ledger API.
pub trait LedgerApi {
    /// Balances held by `address`: symbol → amount in pips, as an integer string.
    fn balance(&self, address: &str) -> ProviderResult<HashMap<String, String>>;

    fn nonce(&self, address: &str) -> ProviderResult<u64>;

    /// Minimal gas price, as an integer string.
    fn min_gas_price(&self) -> ProviderResult<String>;

    fn status(&self) -> ProviderResult<NodeStatus>;
}

/// Ledger provider over a [`LedgerApi`] client.
#[derive(Debug)]
pub struct Provider<C: LedgerApi> {
    chain_id: Option<String>,
    status: ProviderStatus,
    client: C,
    currencies: BTreeSet<String>,
    reserve_wallet: Wallet,
}

impl<C: LedgerApi> Provider<C> {
    /// Creates a provider. The status reflects the configuration: a missing node URL or an
    /// unknown chain id leaves the provider unable to query.
    pub fn new(config: &ProviderConfig, client: C) -> Self {
        let status = status_for(config);
        if status != ProviderStatus::Ok {
            warn!(%status, "ledger provider starts in a failing status");
        }

        Self {
            chain_id: config.chain_id.clone(),
            status,
            client,
            currencies: BTreeSet::new(),
            reserve_wallet: Wallet::default(),
        }
    }

    pub fn status(&self) -> ProviderStatus {
        self.status
    }

    pub fn chain_id(&self) -> Option<&str> {
        self.chain_id.as_deref()
    }

    /// Symbol of the chain's base coin.
    pub fn base_coin(&self) -> &'static str {
        match self.chain_id() {
            Some(MAINNET_CHAIN_ID) => "BIP",
            _ => "MNT",
        }
    }

    /// Symbols of the currencies held in reserve, sorted.
    pub fn currencies(&self) -> &BTreeSet<String> {
        &self.currencies
    }

    pub fn add_currency(&mut self, symbol: &str) {
        let symbol = normalize_symbol(symbol);
        debug!(%symbol, "adding reserve currency");
        self.currencies.insert(symbol);
    }

    /// Address of the reserve wallet; empty until one is loaded.
    pub fn reserve_addr(&self) -> &str {
        self.reserve_wallet.addr()
    }

    /// Installs the reserve wallet. An invalid address puts the provider in `WalletError`.
    pub fn load_wallet(&mut self, wallet: Wallet) -> ProviderResult<()> {
        if !Wallet::is_address(wallet.addr()) {
            self.status = self.status.max(ProviderStatus::WalletError);
            warn!(address = %wallet.addr(), "rejected reserve wallet");
            return Err(ProviderError::InvalidWallet(wallet.addr().to_string()));
        }

        debug!(address = %wallet.addr(), "loaded reserve wallet");
        if self.status == ProviderStatus::WalletError {
            self.status = ProviderStatus::Ok;
        }
        self.reserve_wallet = wallet;
        Ok(())
    }

    pub fn generate_wallet(&self) -> Result<Wallet> {
        keys::generate_wallet()
    }

    pub fn balance(&self, address: &str) -> ProviderResult<HashMap<String, String>> {
        self.ensure_operational("get balance")?;
        self.client.balance(address)
    }

    /// Balances of `address` as assets at [`PIP_PRECISION`], sorted by symbol.
    pub fn balance_assets(&self, address: &str) -> ProviderResult<Vec<Asset>> {
        let sorted: BTreeMap<String, String> = self.balance(address)?.into_iter().collect();

        sorted
            .iter()
            .map(|(symbol, pips)| -> ProviderResult<Asset> {
                let significand = parse_integer(pips, &format!("{} balance", symbol))?;
                let precision = if significand.is_zero() { 0 } else { PIP_PRECISION };
                Ok(Asset::new(significand, precision, symbol)?)
            })
            .collect()
    }

    pub fn nonce(&self, address: &str) -> ProviderResult<u64> {
        self.ensure_operational("get nonce")?;
        self.client.nonce(address)
    }

    pub fn node_status(&self) -> ProviderResult<NodeStatus> {
        self.ensure_operational("get node status")?;
        self.client.status()
    }

    pub fn min_gas_price(&self) -> ProviderResult<String> {
        self.ensure_operational("get min gas price")?;
        self.client.min_gas_price()
    }

    /// Minimal gas price as a whole amount of the base coin.
    pub fn min_gas_price_asset(&self) -> ProviderResult<Asset> {
        let price = self.min_gas_price()?;
        let significand = parse_integer(&price, "min gas price")?;
        Ok(Asset::new(significand, 0, self.base_coin())?)
    }

    fn ensure_operational(&self, operation: &'static str) -> ProviderResult<()> {
        if self.status.is_operational() {
            Ok(())
        } else {
            Err(ProviderError::Unavailable {
                operation,
                status: self.status,
            })
        }
    }
}

fn status_for(config: &ProviderConfig) -> ProviderStatus {
    match config.node_url.as_deref() {
        None | Some("") => return ProviderStatus::WrongNodeUrl,
        Some(_) => {}
    }

    match config.chain_id.as_deref() {
        None | Some(MAINNET_CHAIN_ID) | Some(TESTNET_CHAIN_ID) => ProviderStatus::Ok,
        Some(_) => ProviderStatus::WrongChainId,
    }
}

fn parse_integer(value: &str, what: &str) -> ProviderResult<BigInt> {
    value.parse().map_err(|_| ProviderError::MalformedValue {
        what: what.to_string(),
        value: value.to_string(),
    })
}
