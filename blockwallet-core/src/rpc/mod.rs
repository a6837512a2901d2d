//! JSON-RPC 2.0 envelopes plus the balance gateway and the proxy that serve them.

pub mod gateway;
pub mod proxy;

pub use gateway::BalanceGateway;
pub use proxy::RpcProxy;

use crate::types::Chain;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.into(),
            params,
        }
    }

    /// Balance request for `address` in the dialect of `chain`'s node.
    pub fn get_balance(chain: Chain, address: &str) -> Self {
        match chain {
            Chain::Ethereum => Self::new(1, "eth_getBalance", json!([address, "latest"])),
            Chain::Solana => Self::new(1, "getBalance", json!([address])),
        }
    }
}

/// Upstream error, read leniently: providers do not all send `{code, message}`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcError {
    pub code: Option<i64>,
    pub message: String,
}

impl JsonRpcError {
    pub fn from_value(error: &Value) -> Self {
        let code = error.get("code").and_then(Value::as_i64);
        let message = match error {
            Value::String(s) => s.clone(),
            _ => error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string()),
        };
        Self { code, message }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Kept raw; see [`JsonRpcError::from_value`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl JsonRpcResponse {
    /// Error reply used when the proxy itself cannot reach upstream.
    pub fn internal_error(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            id: Some(Value::Null),
            result: None,
            error: Some(json!({"code": -32603, "message": message})),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_requests() {
        let eth = JsonRpcRequest::get_balance(Chain::Ethereum, "0xabc");
        assert_eq!(
            serde_json::to_value(&eth).unwrap(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "eth_getBalance", "params": ["0xabc", "latest"]})
        );

        let sol = JsonRpcRequest::get_balance(Chain::Solana, "So1");
        assert_eq!(
            serde_json::to_value(&sol).unwrap(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "getBalance", "params": ["So1"]})
        );
    }

    #[test]
    fn test_response_parsing() {
        let ok: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":"0x1"}"#).unwrap();
        assert_eq!(ok.result, Some(json!("0x1")));
        assert!(ok.error.is_none());

        let err: JsonRpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"invalid params"}}"#,
        )
        .unwrap();
        let error = JsonRpcError::from_value(&err.error.unwrap());
        assert_eq!(error.code, Some(-32602));
        assert_eq!(error.message, "invalid params");

        let internal = serde_json::to_value(JsonRpcResponse::internal_error("down")).unwrap();
        assert_eq!(internal["error"]["code"], -32603);
        assert_eq!(internal["id"], Value::Null);
        assert!(internal.get("result").is_none());
    }

    #[test]
    fn test_lenient_error_shapes() {
        let bare = JsonRpcError::from_value(&json!("Unauthorized"));
        assert_eq!(bare.code, None);
        assert_eq!(bare.message, "Unauthorized");

        let code_only = JsonRpcError::from_value(&json!({"code": -32000}));
        assert_eq!(code_only.code, Some(-32000));
        assert_eq!(code_only.message, r#"{"code":-32000}"#);

        let response: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"error":null}"#).unwrap();
        assert!(response.error.is_none());
    }
}
