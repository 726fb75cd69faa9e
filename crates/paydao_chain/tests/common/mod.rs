use std::collections::VecDeque;

use async_trait::async_trait;
use paydao_chain::{
    ContractTransport, GatewayError, TransactionReceipt, TransactionRequest, TxHash,
};
use parking_lot::Mutex;

/// In-memory transport that records every request and replays scripted
/// answers in order.
#[derive(Default)]
pub struct MockTransport {
    pub sent: Mutex<Vec<TransactionRequest>>,
    pub calls: Mutex<Vec<TransactionRequest>>,
    pub receipt_polls: Mutex<u32>,
    send_results: Mutex<VecDeque<Result<TxHash, GatewayError>>>,
    call_results: Mutex<VecDeque<Result<Vec<u8>, GatewayError>>>,
    receipts: Mutex<VecDeque<Option<TransactionReceipt>>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_send(&self, result: Result<TxHash, GatewayError>) {
        self.send_results.lock().push_back(result);
    }

    pub fn push_call(&self, result: Result<Vec<u8>, GatewayError>) {
        self.call_results.lock().push_back(result);
    }

    pub fn push_receipt(&self, receipt: Option<TransactionReceipt>) {
        self.receipts.lock().push_back(receipt);
    }

    pub fn last_sent(&self) -> TransactionRequest {
        self.sent.lock().last().cloned().expect("no transaction sent")
    }
}

#[async_trait]
impl ContractTransport for MockTransport {
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, GatewayError> {
        self.sent.lock().push(tx.clone());
        self.send_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(hash(0xaa)))
    }

    async fn call(&self, tx: &TransactionRequest) -> Result<Vec<u8>, GatewayError> {
        self.calls.lock().push(tx.clone());
        self.call_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Decode("no scripted call result".into())))
    }

    async fn transaction_receipt(
        &self,
        _hash: &TxHash,
    ) -> Result<Option<TransactionReceipt>, GatewayError> {
        *self.receipt_polls.lock() += 1;
        Ok(self.receipts.lock().pop_front().flatten())
    }
}

#[allow(dead_code)]
pub fn hash(byte: u8) -> TxHash {
    TxHash::from_bytes([byte; 32])
}

#[allow(dead_code)]
pub fn word(value: u128) -> Vec<u8> {
    let mut out = vec![0u8; 32];
    out[16..].copy_from_slice(&value.to_be_bytes());
    out
}
