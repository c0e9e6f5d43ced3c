use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use super::types::{parse_quantity_u128, parse_quantity_u64, to_quantity, Block, RpcBlock, RpcError};

/// Read-only view of a chain that the gas estimator samples from
#[async_trait]
pub trait ChainDataSource: Send + Sync {
    /// Network identifier used for logs and error context
    fn network(&self) -> &str;
    async fn current_height(&self) -> Result<u64, RpcError>;
    /// `Ok(None)` when the node does not know the block
    async fn block_with_transactions(&self, number: u64) -> Result<Option<Block>, RpcError>;
    /// Current network gas price, always available regardless of history
    async fn base_fee(&self) -> Result<u128, RpcError>;
}

/// Ethereum JSON-RPC client over HTTP
pub struct HttpRpcClient {
    client: reqwest::Client,
    network: String,
    url: String,
}

impl HttpRpcClient {
    pub fn new(network: impl Into<String>, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            network: network.into(),
            url: url.into(),
        }
    }

    async fn call_rpc<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, RpcError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RpcError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RpcError::Network(format!(
                "{} returned HTTP {}",
                method,
                response.status()
            )));
        }

        let rpc_response: RpcResponse = response
            .json()
            .await
            .map_err(|e| RpcError::Parse(e.to_string()))?;

        if let Some(err) = rpc_response.error {
            return Err(RpcError::Rpc(format!("{} (code {})", err.message, err.code)));
        }

        // A null result is meaningful for some methods (unknown block), so let T decide
        serde_json::from_value(rpc_response.result.unwrap_or(Value::Null))
            .map_err(|e| RpcError::Parse(format!("{}: {}", method, e)))
    }
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObj>,
}

#[derive(Deserialize)]
struct RpcErrorObj {
    #[serde(default)]
    code: i64,
    message: String,
}

#[async_trait]
impl ChainDataSource for HttpRpcClient {
    fn network(&self) -> &str {
        &self.network
    }

    async fn current_height(&self) -> Result<u64, RpcError> {
        let hex_height: String = self.call_rpc("eth_blockNumber", json!([])).await?;
        parse_quantity_u64(&hex_height)
            .map_err(|e| RpcError::Parse(format!("Invalid block number hex: {}", e)))
    }

    async fn block_with_transactions(&self, number: u64) -> Result<Option<Block>, RpcError> {
        let raw: Option<RpcBlock> = self
            .call_rpc("eth_getBlockByNumber", json!([to_quantity(number), true]))
            .await?;
        raw.map(Block::try_from).transpose()
    }

    async fn base_fee(&self) -> Result<u128, RpcError> {
        let hex_price: String = self.call_rpc("eth_gasPrice", json!([])).await?;
        parse_quantity_u128(&hex_price)
            .map_err(|e| RpcError::Parse(format!("Invalid gas price hex: {}", e)))
    }
}
