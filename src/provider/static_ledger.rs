use std::collections::HashMap;

use crate::provider::{LedgerApi, NodeStatus, ProviderError, ProviderResult};

/// In-memory [`LedgerApi`] answering from fixed data. Used offline and in tests.
#[derive(Debug, Clone)]
pub struct StaticLedger {
    balances: HashMap<String, HashMap<String, String>>,
    nonces: HashMap<String, u64>,
    min_gas_price: String,
    status: NodeStatus,
    reachable: bool,
}

impl StaticLedger {
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            nonces: HashMap::new(),
            min_gas_price: "1".to_string(),
            status: NodeStatus::default(),
            reachable: true,
        }
    }

    /// A ledger whose every call fails, as if the node were down.
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new()
        }
    }

    /// Sets the balance of `symbol` held by `address`, in pips.
    pub fn with_balance(mut self, address: &str, symbol: &str, pips: &str) -> Self {
        self.balances
            .entry(address.to_string())
            .or_default()
            .insert(symbol.to_string(), pips.to_string());
        self
    }

    pub fn with_nonce(mut self, address: &str, nonce: u64) -> Self {
        self.nonces.insert(address.to_string(), nonce);
        self
    }

    pub fn with_min_gas_price(mut self, price: &str) -> Self {
        self.min_gas_price = price.to_string();
        self
    }

    pub fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = status;
        self
    }

    fn ensure_reachable(&self) -> ProviderResult<()> {
        if self.reachable {
            Ok(())
        } else {
            Err(ProviderError::Api("node is unreachable".to_string()))
        }
    }
}

impl Default for StaticLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerApi for StaticLedger {
    fn balance(&self, address: &str) -> ProviderResult<HashMap<String, String>> {
        self.ensure_reachable()?;
        Ok(self.balances.get(address).cloned().unwrap_or_default())
    }

    fn nonce(&self, address: &str) -> ProviderResult<u64> {
        self.ensure_reachable()?;
        Ok(self.nonces.get(address).copied().unwrap_or(0))
    }

    fn min_gas_price(&self) -> ProviderResult<String> {
        self.ensure_reachable()?;
        Ok(self.min_gas_price.clone())
    }

    fn status(&self) -> ProviderResult<NodeStatus> {
        self.ensure_reachable()?;
        Ok(self.status.clone())
    }
}
