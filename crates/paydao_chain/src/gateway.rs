use std::fmt;

use paydao_core::PayDaoConfig;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::abi::{ContractFunction, Token, decode_uints, encode_call};
use crate::deploy::DeploymentInfo;
use crate::error::GatewayError;
use crate::network::Network;
use crate::rpc::JsonRpcClient;
use crate::rpc_config::RpcConfigStore;
use crate::transport::{ContractTransport, TransactionRequest};
use crate::types::{Address, TxHash};
use crate::units::{format_ether, parse_ether};

/// Result of `getTreasuryInfo()`, all values in wei.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryInfo {
    pub balance_wei: u128,
    pub total_deposited_wei: u128,
    pub total_withdrawn_wei: u128,
}

impl fmt::Display for TreasuryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "balance {} ETH, deposited {} ETH, withdrawn {} ETH",
            format_ether(self.balance_wei),
            format_ether(self.total_deposited_wei),
            format_ether(self.total_withdrawn_wei)
        )
    }
}

/// Binding to one deployed `PrivatePayDAO` contract.
///
/// Every write returns the transaction hash once the node accepts it. Failures
/// are logged and returned as-is; nothing is retried.
pub struct ContractGateway<T: ContractTransport> {
    transport: T,
    contract: Address,
    sender: Option<Address>,
}

impl<T: ContractTransport> ContractGateway<T> {
    pub fn new(transport: T, contract: Address) -> Self {
        Self {
            transport,
            contract,
            sender: None,
        }
    }

    /// Send transactions from this account instead of the node's default.
    pub fn with_sender(mut self, sender: Address) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn contract_address(&self) -> Address {
        self.contract
    }

    pub fn sender(&self) -> Option<Address> {
        self.sender
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn write(
        &self,
        function: ContractFunction,
        args: &[Token],
        value: u128,
    ) -> Result<TxHash, GatewayError> {
        let tx = TransactionRequest {
            from: self.sender,
            to: Some(self.contract),
            data: encode_call(function, args),
            value,
        };
        match self.transport.send_transaction(&tx).await {
            Ok(hash) => {
                info!(function = function.name(), %hash, "transaction submitted");
                Ok(hash)
            }
            Err(e) => {
                error!(function = function.name(), "contract call failed: {e}");
                Err(e)
            }
        }
    }

    pub async fn add_contributor(&self, name: &str, wallet: Address) -> Result<TxHash, GatewayError> {
        self.write(
            ContractFunction::AddContributor,
            &[Token::String(name.to_string()), Token::Address(wallet)],
            0,
        )
        .await
    }

    pub async fn verify_contribution(
        &self,
        contribution_id: u64,
        is_verified: bool,
    ) -> Result<TxHash, GatewayError> {
        self.write(
            ContractFunction::VerifyContribution,
            &[Token::Uint(u128::from(contribution_id)), Token::Bool(is_verified)],
            0,
        )
        .await
    }

    pub async fn claim_reward(&self, reward_id: u64) -> Result<TxHash, GatewayError> {
        self.write(
            ContractFunction::ClaimReward,
            &[Token::Uint(u128::from(reward_id))],
            0,
        )
        .await
    }

    /// Payable deposit; the amount travels as the transaction value.
    pub async fn deposit_to_treasury(&self, amount_eth: &str) -> Result<TxHash, GatewayError> {
        let wei = parse_ether(amount_eth).inspect_err(|e| error!("deposit rejected: {e}"))?;
        self.write(ContractFunction::DepositToTreasury, &[], wei).await
    }

    pub async fn withdraw_from_treasury(&self, amount_eth: &str) -> Result<TxHash, GatewayError> {
        let wei = parse_ether(amount_eth).inspect_err(|e| error!("withdrawal rejected: {e}"))?;
        self.write(ContractFunction::WithdrawFromTreasury, &[Token::Uint(wei)], 0)
            .await
    }

    pub async fn get_treasury_info(&self) -> Result<TreasuryInfo, GatewayError> {
        let tx = TransactionRequest {
            from: self.sender,
            to: Some(self.contract),
            data: encode_call(ContractFunction::GetTreasuryInfo, &[]),
            value: 0,
        };
        let result = async {
            let data = self.transport.call(&tx).await?;
            decode_uints(&data, 3)
        }
        .await;

        match result {
            Ok(words) => Ok(TreasuryInfo {
                balance_wei: words[0],
                total_deposited_wei: words[1],
                total_withdrawn_wei: words[2],
            }),
            Err(e) => {
                error!("treasury query failed: {e}");
                Err(e)
            }
        }
    }
}

impl ContractGateway<JsonRpcClient> {
    /// Build a JSON-RPC backed gateway from the application config.
    ///
    /// The contract address comes from the config (which already carries any
    /// environment override) and falls back to the deployment info file.
    pub fn connect_from_config(config: &PayDaoConfig) -> Result<Self, GatewayError> {
        let network: Network = config.network.parse()?;

        let mut rpcs = RpcConfigStore::with_defaults();
        if let Some(url) = &config.rpc_url {
            rpcs.set_custom_rpc(network, url.clone())?;
        }
        rpcs.set_timeout(network, config.http_timeout_secs);
        let rpc = rpcs
            .get_rpc(network)
            .ok_or_else(|| GatewayError::UnsupportedNetwork(network.name().to_string()))?;
        let client = JsonRpcClient::from_rpc_config(rpc)?;

        let contract = resolve_contract_address(config)?;
        let mut gateway = Self::new(client, contract);
        if let Some(sender) = &config.sender_address {
            gateway = gateway.with_sender(sender.parse()?);
        }

        info!(network = network.name(), rpc = %rpc.url, %contract, "contract gateway ready");
        Ok(gateway)
    }
}

/// Configured address first, then the deployment record.
pub fn resolve_contract_address(config: &PayDaoConfig) -> Result<Address, GatewayError> {
    if let Some(address) = config.contract_address.as_deref().filter(|a| !a.trim().is_empty()) {
        return address.parse();
    }
    match DeploymentInfo::load(&config.deployment_info_path) {
        Ok(info) => Ok(info.address),
        Err(e) => {
            warn!("no contract address configured and no deployment info: {e:#}");
            Err(GatewayError::MissingContractAddress)
        }
    }
}
