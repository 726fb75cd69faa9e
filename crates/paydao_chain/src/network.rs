use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Networks the contract can be deployed to and called on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Sepolia,
    Localhost,
}

impl Network {
    /// Short name, as written to `deployment-info.json`.
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Sepolia => "sepolia",
            Network::Localhost => "localhost",
        }
    }

    /// Human-readable label for the network.
    pub fn label(&self) -> &'static str {
        match self {
            Network::Mainnet => "Ethereum Mainnet",
            Network::Sepolia => "Sepolia Testnet",
            Network::Localhost => "Local Node",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Sepolia => 11_155_111,
            Network::Localhost => 31_337,
        }
    }

    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://eth.llamarpc.com",
            Network::Sepolia => "https://rpc.sepolia.org",
            Network::Localhost => "http://127.0.0.1:8545",
        }
    }

    /// Block explorer base URL, if the network has one.
    pub fn explorer_url(&self) -> Option<&'static str> {
        match self {
            Network::Mainnet => Some("https://etherscan.io"),
            Network::Sepolia => Some("https://sepolia.etherscan.io"),
            Network::Localhost => None,
        }
    }

    /// Explorer link for a transaction hash.
    pub fn tx_url(&self, tx_hash: &str) -> Option<String> {
        self.explorer_url().map(|base| format!("{base}/tx/{tx_hash}"))
    }

    pub fn all() -> [Self; 3] {
        [Network::Mainnet, Network::Sepolia, Network::Localhost]
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Network {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "ethereum" => Ok(Network::Mainnet),
            "sepolia" => Ok(Network::Sepolia),
            "localhost" | "local" | "hardhat" => Ok(Network::Localhost),
            other => Err(GatewayError::UnsupportedNetwork(other.to_string())),
        }
    }
}
