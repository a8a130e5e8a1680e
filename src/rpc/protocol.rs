//! JSON-RPC message definitions

use crate::core::BlockTemplate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON-RPC protocol version echoed in every response
pub const JSONRPC_VERSION: &str = "2.0";

/// Error code for a body that is JSON but not a request object
pub const INVALID_REQUEST: i64 = -32600;

/// Error code for an unsupported method
pub const METHOD_NOT_FOUND: i64 = -32601;

/// Status string carried by every successful result
pub const STATUS_OK: &str = "OK";

/// Daemon RPC methods
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcMethod {
    /// Fetch a block template for mining
    GetBlockTemplate,
    /// Submit a mined block
    SubmitBlock,
    /// Fetch general daemon info
    GetInfo,
    /// Fetch the current height
    GetHeight,
    /// Unknown method
    Unknown(String),
}

impl RpcMethod {
    /// Parse method from string
    pub fn parse_method(s: &str) -> Self {
        match s {
            "get_block_template" => Self::GetBlockTemplate,
            "submit_block" => Self::SubmitBlock,
            "get_info" => Self::GetInfo,
            "get_height" => Self::GetHeight,
            _ => Self::Unknown(s.to_string()),
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::GetBlockTemplate => "get_block_template",
            Self::SubmitBlock => "submit_block",
            Self::GetInfo => "get_info",
            Self::GetHeight => "get_height",
            Self::Unknown(s) => s,
        }
    }

    /// Methods the server answers
    pub fn supported() -> [RpcMethod; 4] {
        [
            Self::GetBlockTemplate,
            Self::SubmitBlock,
            Self::GetInfo,
            Self::GetHeight,
        ]
    }
}

/// JSON-RPC request
///
/// Parsing is lenient: a missing method becomes the empty string, missing params an
/// empty object and a missing id `0`, matching how the daemon treats sloppy clients.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcRequest {
    /// Request ID
    pub id: Value,
    /// Method name
    pub method: String,
    /// Method parameters, positional or named
    pub params: Value,
}

impl RpcRequest {
    /// Create a new request
    pub fn new(id: impl Into<Value>, method: &str, params: Value) -> Self {
        Self {
            id: id.into(),
            method: method.to_string(),
            params,
        }
    }

    /// Extract a request from a parsed JSON body
    pub fn from_value(value: Value) -> Result<Self, RpcError> {
        let Value::Object(mut object) = value else {
            return Err(RpcError::new(INVALID_REQUEST, "Invalid Request"));
        };

        let method = match object.remove("method") {
            Some(Value::String(method)) => method,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        Ok(Self {
            id: object.remove("id").unwrap_or_else(|| Value::from(0)),
            method,
            params: object
                .remove("params")
                .unwrap_or_else(|| Value::Object(Map::new())),
        })
    }

    /// Get the method as enum
    pub fn method_enum(&self) -> RpcMethod {
        RpcMethod::parse_method(&self.method)
    }

    /// `wallet_address` from named params, empty when absent
    pub fn wallet_address(&self) -> &str {
        self.params
            .get("wallet_address")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Block blob from `[blob, ...]` or `{"blob": ...}` params, empty when absent
    pub fn block_blob(&self) -> String {
        let blob = match &self.params {
            Value::Array(items) => items.first(),
            Value::Object(map) => map.get("blob"),
            _ => None,
        };

        match blob {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
    /// Error code
    pub code: i64,
    /// Human readable message
    pub message: String,
}

impl RpcError {
    /// Create an error object
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Error for a method the server does not implement
    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }
}

/// JSON-RPC response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Protocol version
    pub jsonrpc: String,
    /// Request ID this responds to
    pub id: Value,
    /// Result if successful
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error if failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    /// Create a successful response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// Result of `get_block_template`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBlockTemplateResult {
    /// Template fields
    #[serde(flatten)]
    pub template: BlockTemplate,
    /// Upper 64 bits of the 128-bit difficulty
    pub difficulty_top64: u64,
    /// Block reward in atomic units
    pub expected_reward: u64,
    /// Call status
    pub status: String,
    /// Whether the answer came from a bootstrap daemon
    pub untrusted: bool,
    /// Difficulty as `0x`-prefixed hex
    pub wide_difficulty: String,
}

/// Result of `submit_block`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitBlockResult {
    /// Call status
    pub status: String,
}

/// Result of `get_info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetInfoResult {
    /// Current height
    pub height: u64,
    /// Current difficulty
    pub difficulty: u64,
    /// Call status
    pub status: String,
    /// Testnet flag
    pub testnet: bool,
    /// Stagenet flag
    pub stagenet: bool,
}

/// Result of `get_height`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetHeightResult {
    /// Current height
    pub height: u64,
    /// Call status
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_parsing() {
        for method in RpcMethod::supported() {
            assert_eq!(RpcMethod::parse_method(method.as_str()), method);
        }
        assert_eq!(
            RpcMethod::parse_method("foo"),
            RpcMethod::Unknown("foo".to_string())
        );
        assert_eq!(RpcMethod::Unknown("foo".to_string()).as_str(), "foo");
    }

    #[test]
    fn test_request_defaults() {
        let request = RpcRequest::from_value(json!({})).unwrap();
        assert_eq!(request.id, json!(0));
        assert_eq!(request.method, "");
        assert_eq!(request.params, json!({}));
        assert_eq!(request.method_enum(), RpcMethod::Unknown(String::new()));
    }

    #[test]
    fn test_non_string_method_is_echoed() {
        let request = RpcRequest::from_value(json!({"method": 123})).unwrap();
        assert_eq!(request.method, "123");
        assert_eq!(request.method_enum(), RpcMethod::Unknown("123".to_string()));
        assert_eq!(
            RpcError::method_not_found("123").message,
            "Method not found: 123"
        );
    }

    #[test]
    fn test_request_non_object_rejected() {
        let err = RpcRequest::from_value(json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.code, INVALID_REQUEST);
        assert!(RpcRequest::from_value(json!("get_info")).is_err());
    }

    #[test]
    fn test_wallet_address_extraction() {
        let request = RpcRequest::new(1, "get_block_template", json!({"wallet_address": "44abc"}));
        assert_eq!(request.wallet_address(), "44abc");

        let request = RpcRequest::new(1, "get_block_template", json!(["44abc"]));
        assert_eq!(request.wallet_address(), "");
    }

    #[test]
    fn test_block_blob_extraction() {
        let positional = RpcRequest::new(1, "submit_block", json!(["deadbeef", "ignored"]));
        assert_eq!(positional.block_blob(), "deadbeef");

        let named = RpcRequest::new(1, "submit_block", json!({"blob": "cafe"}));
        assert_eq!(named.block_blob(), "cafe");

        let empty = RpcRequest::new(1, "submit_block", json!([]));
        assert_eq!(empty.block_blob(), "");

        let missing = RpcRequest::new(1, "submit_block", json!({}));
        assert_eq!(missing.block_blob(), "");
    }

    #[test]
    fn test_response_serialization_omits_empty_fields() {
        let ok = RpcResponse::success(json!(7), json!({"status": "OK"}));
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value, json!({"jsonrpc": "2.0", "id": 7, "result": {"status": "OK"}}));

        let err = RpcResponse::error(json!("a"), RpcError::method_not_found("foo"));
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "id": "a",
                "error": {"code": -32601, "message": "Method not found: foo"}
            })
        );
    }
}
