use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::types::{Address, TxHash};

/// A transaction or call to submit. `to == None` creates a contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub data: Vec<u8>,
    /// Value in wei.
    pub value: u128,
}

/// The subset of a mined receipt the gateway cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    pub contract_address: Option<Address>,
    /// `Some(false)` when the transaction reverted.
    pub status: Option<bool>,
    pub block_number: Option<u64>,
    pub gas_used: Option<u64>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status != Some(false)
    }
}

/// Submits transactions to a node. Signing is the node's (or wallet's)
/// concern.
#[async_trait]
pub trait ContractTransport: Send + Sync {
    /// Submit a transaction and return its hash.
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, GatewayError>;

    /// Execute a read-only call against the latest block.
    async fn call(&self, tx: &TransactionRequest) -> Result<Vec<u8>, GatewayError>;

    /// `None` while the transaction is still pending.
    async fn transaction_receipt(
        &self,
        hash: &TxHash,
    ) -> Result<Option<TransactionReceipt>, GatewayError>;
}

#[async_trait]
impl<T: ContractTransport + ?Sized> ContractTransport for Arc<T> {
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, GatewayError> {
        (**self).send_transaction(tx).await
    }

    async fn call(&self, tx: &TransactionRequest) -> Result<Vec<u8>, GatewayError> {
        (**self).call(tx).await
    }

    async fn transaction_receipt(
        &self,
        hash: &TxHash,
    ) -> Result<Option<TransactionReceipt>, GatewayError> {
        (**self).transaction_receipt(hash).await
    }
}
