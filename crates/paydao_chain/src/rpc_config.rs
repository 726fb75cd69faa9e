use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::network::Network;

/// Configuration for a single RPC endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    pub network: Network,
    pub url: String,
    pub is_custom: bool,
    pub timeout_secs: u64,
}

const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl RpcConfig {
    fn default_for(network: Network) -> Self {
        Self {
            network,
            url: network.default_rpc_url().to_string(),
            is_custom: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Per-network RPC endpoints with custom override support.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfigStore {
    configs: HashMap<Network, RpcConfig>,
}

impl RpcConfigStore {
    /// Create a store populated with every network's default endpoint.
    pub fn with_defaults() -> Self {
        let configs = Network::all()
            .into_iter()
            .map(|network| (network, RpcConfig::default_for(network)))
            .collect();
        Self { configs }
    }

    pub fn get_rpc(&self, network: Network) -> Option<&RpcConfig> {
        self.configs.get(&network)
    }

    /// Override the RPC URL for a network with a custom endpoint.
    pub fn set_custom_rpc(&mut self, network: Network, url: String) -> Result<(), GatewayError> {
        if !validate_url(&url) {
            return Err(GatewayError::InvalidRpcUrl(url));
        }

        let entry = self
            .configs
            .entry(network)
            .or_insert_with(|| RpcConfig::default_for(network));
        entry.url = url;
        entry.is_custom = true;
        Ok(())
    }

    pub fn set_timeout(&mut self, network: Network, timeout_secs: u64) {
        let entry = self
            .configs
            .entry(network)
            .or_insert_with(|| RpcConfig::default_for(network));
        entry.timeout_secs = timeout_secs.max(1);
    }
}

impl Default for RpcConfigStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Validate that a URL is well-formed and uses HTTP or HTTPS.
pub fn validate_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            (scheme == "http" || scheme == "https") && parsed.host().is_some()
        }
        Err(_) => false,
    }
}
