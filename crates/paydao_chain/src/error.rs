use paydao_core::PayDaoError;
use thiserror::Error;

/// Failures surfaced by the contract gateway and deployment flow.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("failed to decode {0}")]
    Decode(String),

    #[error("no contract address configured")]
    MissingContractAddress,

    #[error("unsupported network: {0}")]
    UnsupportedNetwork(String),

    #[error("invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("deployment failed: {0}")]
    Deployment(String),
}

impl From<GatewayError> for PayDaoError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Http(e) => PayDaoError::Network(e.to_string()),
            e @ (GatewayError::Rpc { .. } | GatewayError::Decode(_)) => {
                PayDaoError::Contract(e.to_string())
            }
            e @ (GatewayError::InvalidAddress(_) | GatewayError::InvalidAmount(_)) => {
                PayDaoError::Validation(e.to_string())
            }
            e @ (GatewayError::MissingContractAddress
            | GatewayError::UnsupportedNetwork(_)
            | GatewayError::InvalidRpcUrl(_)) => PayDaoError::Config(e.to_string()),
            GatewayError::Deployment(msg) => PayDaoError::Deployment(msg),
        }
    }
}
