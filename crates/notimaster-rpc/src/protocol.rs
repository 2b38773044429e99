//! JSON-RPC 2.0 message types spoken with the host.
//!
//! A host call travels as a request whose `method` is the call identifier and
//! whose `params` is the positional argument array.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INTERNAL_ERROR: i32 = -32603;
/// Host knows the identifier but its handler is not registered yet
pub const HANDLER_NOT_READY: i32 = -32010;

/// JSON-RPC 2.0 Request ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(u64),
    String(String),
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{n}"),
            RequestId::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for RequestId {
    fn from(n: u64) -> Self {
        RequestId::Number(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::String(s.to_string())
    }
}

/// JSON-RPC 2.0 Request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
}

impl Request {
    /// Request for a host call with positional arguments.
    ///
    /// `params` is always an array, empty for argument-less calls.
    #[must_use]
    pub fn call(identifier: impl Into<String>, args: Vec<Value>, id: RequestId) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: identifier.into(),
            params: Some(Value::Array(args)),
            id: Some(id),
        }
    }

    /// Positional arguments, or an empty slice when `params` is absent or not
    /// an array.
    #[must_use]
    pub fn args(&self) -> &[Value] {
        match &self.params {
            Some(Value::Array(args)) => args,
            _ => &[],
        }
    }
}

/// JSON-RPC 2.0 Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: RequestId,
}

impl Response {
    #[must_use]
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    #[must_use]
    pub fn error(id: RequestId, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

/// JSON-RPC 2.0 Error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    #[must_use]
    pub fn method_not_found() -> Self {
        Self::new(METHOD_NOT_FOUND, "Method not found")
    }

    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }

    #[must_use]
    pub fn handler_not_ready(identifier: &str) -> Self {
        Self::new(
            HANDLER_NOT_READY,
            format!("Handler not ready: {identifier}"),
        )
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RPC error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for RpcError {}

/// Any message on the wire. A request without an id parses as a `Request`
/// too; the host never sends one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Request(Request),
    Response(Response),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_request_shape() {
        let req = Request::call(
            "NotificationMasterAPI.PlaySound",
            vec![json!("/tmp/a.wav"), json!(0.5), json!(false), json!(true)],
            7.into(),
        );
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "NotificationMasterAPI.PlaySound");
        assert_eq!(value["params"], json!(["/tmp/a.wav", 0.5, false, true]));
        assert_eq!(value["id"], 7);
    }

    #[test]
    fn test_argument_less_call_sends_empty_array() {
        let req = Request::call("NotificationMasterAPI.Active", Vec::new(), 1.into());
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"params\":[]"));
        assert!(req.args().is_empty());
    }

    #[test]
    fn test_args_tolerates_object_params() {
        let msg: Message =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"x","params":{"a":1},"id":2}"#)
                .unwrap();
        let Message::Request(req) = msg else {
            panic!("Expected Request");
        };
        assert!(req.args().is_empty());
    }

    #[test]
    fn test_response_success_and_error() {
        let ok = serde_json::to_string(&Response::success(1.into(), json!(true))).unwrap();
        assert!(ok.contains("\"result\":true"));
        assert!(!ok.contains("\"error\""));

        let err = serde_json::to_string(&Response::error(
            1.into(),
            RpcError::handler_not_ready("NotificationMasterAPI.StopSound"),
        ))
        .unwrap();
        assert!(!err.contains("\"result\""));
        assert!(err.contains("-32010"));
        assert!(err.contains("NotificationMasterAPI.StopSound"));
    }

    #[test]
    fn test_null_result_parses_as_response() {
        let msg: Message = serde_json::from_str(r#"{"jsonrpc":"2.0","result":null,"id":3}"#).unwrap();
        assert!(matches!(msg, Message::Response(_)));
    }

    #[test]
    fn test_request_id_forms() {
        assert_eq!(serde_json::to_string(&RequestId::Number(12)).unwrap(), "12");
        let id: RequestId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id, RequestId::from("abc"));
        assert_eq!(id.to_string(), "abc");
    }

    #[test]
    fn test_error_constructors() {
        assert_eq!(RpcError::method_not_found().code, METHOD_NOT_FOUND);
        assert_eq!(RpcError::handler_not_ready("x").code, HANDLER_NOT_READY);
        assert_eq!(RpcError::internal_error("crashed").code, INTERNAL_ERROR);
    }

    #[test]
    fn test_rpc_error_display() {
        let err = RpcError::internal_error("device busy");
        assert_eq!(err.to_string(), "RPC error -32603: device busy");
    }

    #[test]
    fn test_message_parse_error_response() {
        let json =
            r#"{"jsonrpc":"2.0","error":{"code":-32601,"message":"Method not found"},"id":1}"#;
        let Message::Response(resp) = serde_json::from_str(json).unwrap() else {
            panic!("Expected Response");
        };
        assert_eq!(resp.error.unwrap().code, METHOD_NOT_FOUND);
    }
}
