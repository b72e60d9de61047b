//! Minimal Ethereum JSON-RPC client for `eth_call`.

use alloy_primitives::Address;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::error::ReadError;

/// JSON-RPC error object.
#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

/// HTTP client for a single Ethereum-compatible RPC endpoint.
#[derive(Debug, Clone)]
pub struct JsonRpcClient {
    url: String,
    http: reqwest::Client,
}

impl JsonRpcClient {
    /// Creates a client targeting `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Executes `eth_call` against `to` with `call_data` at the latest block
    /// and returns the raw return bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`ReadError`] if the request fails, the node reports an
    /// error, or the hex payload cannot be decoded.
    pub async fn eth_call(&self, to: &Address, call_data: &[u8]) -> Result<Vec<u8>, ReadError> {
        let request = construct_eth_call(to, call_data);
        let encoded: String = self.execute(&request).await?;
        decode_hex_response(&encoded)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: &serde_json::Value,
    ) -> Result<T, ReadError> {
        let response = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| ReadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(ReadError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| ReadError::Decode(format!("invalid JSON-RPC response: {e}")))?;
        into_result(parsed)
    }
}

fn into_result<T>(parsed: RpcResponse<T>) -> Result<T, ReadError> {
    if let Some(error) = parsed.error {
        return Err(ReadError::Rpc {
            code: error.code,
            message: error.message,
        });
    }
    parsed.result.ok_or_else(|| {
        ReadError::Decode("response missing both result and error fields".to_string())
    })
}

/// Builds an `eth_call` JSON-RPC request object for the latest block.
#[must_use]
pub fn construct_eth_call(to: &Address, call_data: &[u8]) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "eth_call",
        "params": [
            {
                "to": to.to_string(),
                "data": format!("0x{}", hex::encode(call_data)),
            },
            "latest"
        ]
    })
}

/// Decodes a `0x`-prefixed hex string returned by the node.
///
/// # Errors
///
/// Returns [`ReadError::Decode`] if the payload is not valid hex.
pub fn decode_hex_response(encoded: &str) -> Result<Vec<u8>, ReadError> {
    let stripped = encoded.strip_prefix("0x").unwrap_or(encoded);
    hex::decode(stripped).map_err(|e| ReadError::Decode(format!("invalid hex response: {e}")))
}
