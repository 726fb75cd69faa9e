// On-chain side of the dashboard: contract gateway + deployment

pub mod abi;
pub mod deploy;
pub mod error;
pub mod gateway;
pub mod network;
pub mod rpc;
pub mod rpc_config;
pub mod transport;
pub mod types;
pub mod units;

// Re-export primary types for convenient access.
pub use abi::{ContractFunction, Token, contract_abi};
pub use deploy::{
    ContractArtifact, DEFAULT_ARTIFACT_PATH, DeployParams, DeploymentInfo, deploy_contract,
    wait_for_receipt,
};
pub use error::GatewayError;
pub use gateway::{ContractGateway, TreasuryInfo, resolve_contract_address};
pub use network::Network;
pub use rpc::JsonRpcClient;
pub use rpc_config::{RpcConfig, RpcConfigStore, validate_url};
pub use transport::{ContractTransport, TransactionReceipt, TransactionRequest};
pub use types::{Address, TxHash};
pub use units::{format_ether, parse_ether};
