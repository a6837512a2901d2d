use crate::config::GatewayConfig;
use crate::error::{BlockWalletError, Result};
use crate::rpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::types::{BalanceResult, Chain};
use crate::validation;
use serde_json::Value;

/// Single-shot balance lookups through the per-chain proxy endpoints.
///
/// No retries and no caching; every call is one HTTP POST bounded by the
/// configured timeout.
pub struct BalanceGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl BalanceGateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BlockWalletError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Rejects a malformed address before anything touches the network.
    pub async fn query_balance(&self, address: &str, chain: Chain) -> Result<BalanceResult> {
        validation::validate(address, chain)?;

        let request = JsonRpcRequest::get_balance(chain, address);
        let endpoint = self.config.endpoint(chain);
        tracing::debug!("Querying {} balance via {}", chain, endpoint);

        let http_response = self.client.post(endpoint).json(&request).send().await?;
        let status = http_response.status();
        let body = http_response.bytes().await?;

        // JSON-RPC errors may arrive with any status (401, 429...); only a non-JSON
        // body is judged by it
        let response: JsonRpcResponse = serde_json::from_slice(&body).map_err(|e| {
            if status.is_success() {
                BlockWalletError::rpc(format!("Malformed response body: {}", e))
            } else {
                BlockWalletError::network(format!("{} returned HTTP {}", endpoint, status))
            }
        })?;

        let result = extract_result(response)?;
        let balance = match chain {
            Chain::Ethereum => BalanceResult::from_wei(parse_wei(&result)?),
            Chain::Solana => BalanceResult::from_lamports(parse_lamports(&result)?),
        };

        tracing::debug!("{} balance of {}: {}", chain, address, balance);
        Ok(balance)
    }
}

fn extract_result(response: JsonRpcResponse) -> Result<Value> {
    if let Some(error) = response.error {
        let error = JsonRpcError::from_value(&error);
        let message = match error.code {
            Some(code) => format!("{} (code {})", error.message, code),
            None => error.message,
        };
        return Err(BlockWalletError::Rpc {
            code: error.code,
            message,
        });
    }

    response
        .result
        .ok_or_else(|| BlockWalletError::rpc("Response has no result"))
}

/// `eth_getBalance` returns a `0x`-prefixed hex quantity.
fn parse_wei(result: &Value) -> Result<u128> {
    let quantity = result
        .as_str()
        .ok_or_else(|| BlockWalletError::rpc(format!("Expected hex string result, got {}", result)))?;

    let digits = quantity
        .strip_prefix("0x")
        .or_else(|| quantity.strip_prefix("0X"))
        .ok_or_else(|| BlockWalletError::rpc(format!("Result is not a hex quantity: {}", quantity)))?;

    if digits.is_empty() {
        return Err(BlockWalletError::rpc("Result is an empty hex quantity"));
    }

    u128::from_str_radix(digits, 16)
        .map_err(|e| BlockWalletError::rpc(format!("Invalid wei amount {}: {}", quantity, e)))
}

/// `getBalance` returns `{ "context": {..}, "value": <lamports> }`.
fn parse_lamports(result: &Value) -> Result<u64> {
    result
        .get("value")
        .and_then(Value::as_u64)
        .ok_or_else(|| BlockWalletError::rpc(format!("Result has no lamports value: {}", result)))
}
