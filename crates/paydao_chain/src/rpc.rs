//! JSON-RPC 2.0 over HTTP, the transport the dashboard uses against a node.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::GatewayError;
use crate::rpc_config::{RpcConfig, validate_url};
use crate::transport::{ContractTransport, TransactionReceipt, TransactionRequest};
use crate::types::{Address, TxHash, from_hex_data, from_quantity, to_hex_data, to_quantity};

// ---------------------------------------------------------------------------
// JSON-RPC 2.0 types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: Value,
    pub id: u64,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Value, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method: method.into(),
            params,
            id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// A `null` result is a valid answer (e.g. a pending receipt).
    pub fn into_result(self) -> Result<Value, GatewayError> {
        if let Some(err) = self.error {
            let message = match err.data.as_ref().and_then(Value::as_str) {
                Some(data) => format!("{} ({data})", err.message),
                None => err.message,
            };
            return Err(GatewayError::Rpc {
                code: err.code,
                message,
            });
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}

// ---------------------------------------------------------------------------
// Parameter / result mapping
// ---------------------------------------------------------------------------

/// Transaction object as `eth_sendTransaction` / `eth_call` expect it.
pub fn tx_params(tx: &TransactionRequest) -> Value {
    let mut obj = Map::new();
    if let Some(from) = tx.from {
        obj.insert("from".into(), Value::String(from.to_checksum()));
    }
    if let Some(to) = tx.to {
        obj.insert("to".into(), Value::String(to.to_checksum()));
    }
    obj.insert("data".into(), Value::String(to_hex_data(&tx.data)));
    if tx.value > 0 {
        obj.insert("value".into(), Value::String(to_quantity(tx.value)));
    }
    Value::Object(obj)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
    transaction_hash: TxHash,
    #[serde(default)]
    contract_address: Option<Address>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    block_number: Option<String>,
    #[serde(default)]
    gas_used: Option<String>,
}

fn quantity_u64(raw: Option<&str>) -> Result<Option<u64>, GatewayError> {
    raw.map(|q| {
        let value = from_quantity(q)?;
        u64::try_from(value).map_err(|_| GatewayError::Decode(format!("quantity `{q}`")))
    })
    .transpose()
}

/// Parse an `eth_getTransactionReceipt` result.
pub fn parse_receipt(value: Value) -> Result<Option<TransactionReceipt>, GatewayError> {
    if value.is_null() {
        return Ok(None);
    }
    let raw: RawReceipt = serde_json::from_value(value)
        .map_err(|e| GatewayError::Decode(format!("transaction receipt: {e}")))?;

    let status = quantity_u64(raw.status.as_deref())?.map(|s| s == 1);
    Ok(Some(TransactionReceipt {
        transaction_hash: raw.transaction_hash,
        contract_address: raw.contract_address,
        status,
        block_number: quantity_u64(raw.block_number.as_deref())?,
        gas_used: quantity_u64(raw.gas_used.as_deref())?,
    }))
}

fn expect_str(value: &Value, what: &str) -> Result<String, GatewayError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| GatewayError::Decode(format!("{what}: expected string, got {value}")))
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP JSON-RPC client for an Ethereum node.
#[derive(Debug)]
pub struct JsonRpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let url = url.into();
        if !validate_url(&url) {
            return Err(GatewayError::InvalidRpcUrl(url));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn from_rpc_config(config: &RpcConfig) -> Result<Self, GatewayError> {
        Self::new(config.url.clone(), Duration::from_secs(config.timeout_secs))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue one JSON-RPC request and return its `result`.
    pub async fn request(&self, method: &str, params: Value) -> Result<Value, GatewayError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, url = %self.url, "rpc request");

        let response: JsonRpcResponse = self
            .http
            .post(&self.url)
            .json(&JsonRpcRequest::new(method, params, id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.into_result()
    }
}

#[async_trait]
impl ContractTransport for JsonRpcClient {
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, GatewayError> {
        let result = self
            .request("eth_sendTransaction", json!([tx_params(tx)]))
            .await?;
        expect_str(&result, "transaction hash")?.parse()
    }

    async fn call(&self, tx: &TransactionRequest) -> Result<Vec<u8>, GatewayError> {
        let result = self.request("eth_call", json!([tx_params(tx), "latest"])).await?;
        from_hex_data(&expect_str(&result, "call result")?)
    }

    async fn transaction_receipt(
        &self,
        hash: &TxHash,
    ) -> Result<Option<TransactionReceipt>, GatewayError> {
        let result = self
            .request("eth_getTransactionReceipt", json!([hash.to_string()]))
            .await?;
        parse_receipt(result)
    }
}
