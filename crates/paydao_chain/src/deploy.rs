use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::abi::{Token, encode};
use crate::error::GatewayError;
use crate::network::Network;
use crate::transport::{ContractTransport, TransactionReceipt, TransactionRequest};
use crate::types::{Address, TxHash, from_hex_data};

/// Default location of the compiled contract artifact.
pub const DEFAULT_ARTIFACT_PATH: &str = "artifacts/PrivatePayDAO.json";

/// Record of a deployment, written next to the project after a successful
/// deploy and read back by the gateway when no address is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfo {
    pub address: Address,
    pub verifier: Address,
    pub network: String,
    pub deployed_at: DateTime<Utc>,
}

impl DeploymentInfo {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read deployment info {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse deployment info {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write deployment info {}", path.display()))?;
        Ok(())
    }
}

/// Creation bytecode of the compiled contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractArtifact {
    pub bytecode: Vec<u8>,
}

impl ContractArtifact {
    /// Load an artifact JSON. `bytecode` may be a hex string or an object
    /// with an `object` field, as different compilers emit it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read contract artifact {}", path.display()))?;
        let json: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse contract artifact {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid artifact {}", path.display()))
    }

    pub fn from_json(json: &Value) -> Result<Self> {
        let raw = match json.get("bytecode") {
            Some(Value::String(s)) => s.as_str(),
            Some(Value::Object(obj)) => obj
                .get("object")
                .and_then(Value::as_str)
                .context("`bytecode.object` is not a string")?,
            _ => anyhow::bail!("missing `bytecode` field"),
        };
        let bytecode = from_hex_data(raw)?;
        if bytecode.is_empty() {
            anyhow::bail!("bytecode is empty");
        }
        Ok(Self { bytecode })
    }

    /// Creation data: bytecode followed by the encoded constructor argument.
    pub fn creation_data(&self, verifier: Address) -> Vec<u8> {
        let mut data = self.bytecode.clone();
        data.extend_from_slice(&encode(&[Token::Address(verifier)]));
        data
    }
}

#[derive(Debug, Clone)]
pub struct DeployParams {
    pub verifier: Address,
    pub network: Network,
    pub sender: Option<Address>,
    pub poll_interval: Duration,
    pub poll_attempts: u32,
}

impl DeployParams {
    pub fn new(verifier: Address, network: Network) -> Self {
        Self {
            verifier,
            network,
            sender: None,
            poll_interval: Duration::from_millis(2_000),
            poll_attempts: 60,
        }
    }
}

/// Poll for a receipt until it appears or the attempts run out.
pub async fn wait_for_receipt<T: ContractTransport + ?Sized>(
    transport: &T,
    hash: &TxHash,
    poll_interval: Duration,
    attempts: u32,
) -> Result<TransactionReceipt, GatewayError> {
    for attempt in 1..=attempts.max(1) {
        if let Some(receipt) = transport.transaction_receipt(hash).await? {
            return Ok(receipt);
        }
        debug!(%hash, attempt, "receipt pending");
        if attempt < attempts {
            tokio::time::sleep(poll_interval).await;
        }
    }
    Err(GatewayError::Deployment(format!(
        "no receipt for {hash} after {attempts} attempts"
    )))
}

/// Deploy `PrivatePayDAO` and return the record to persist.
pub async fn deploy_contract<T: ContractTransport + ?Sized>(
    transport: &T,
    artifact: &ContractArtifact,
    params: &DeployParams,
) -> Result<DeploymentInfo, GatewayError> {
    info!("Deploying PrivatePayDAO contract...");

    let tx = TransactionRequest {
        from: params.sender,
        to: None,
        data: artifact.creation_data(params.verifier),
        value: 0,
    };
    let hash = transport.send_transaction(&tx).await?;
    info!(%hash, network = params.network.name(), "creation transaction sent");

    let receipt =
        wait_for_receipt(transport, &hash, params.poll_interval, params.poll_attempts).await?;
    if !receipt.succeeded() {
        return Err(GatewayError::Deployment(format!(
            "creation transaction {hash} reverted"
        )));
    }
    let address = receipt.contract_address.ok_or_else(|| {
        GatewayError::Deployment(format!("receipt for {hash} has no contract address"))
    })?;

    Ok(DeploymentInfo {
        address,
        verifier: params.verifier,
        network: params.network.name().to_string(),
        deployed_at: Utc::now(),
    })
}
