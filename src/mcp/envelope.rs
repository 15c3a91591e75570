use crate::mcp::contracts::JSONRPC_VERSION;
use crate::mcp::errors::ServerError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// An incoming JSON-RPC line. A request without an `id` is a notification.
///
/// Member names are also accepted in the capitalized spellings older clients
/// send.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Request {
    #[serde(alias = "Jsonrpc", alias = "JsonRpc", alias = "JSONRPC")]
    pub jsonrpc: String,
    #[serde(default, alias = "Id", alias = "ID", deserialize_with = "present_id")]
    pub id: Option<i64>,
    #[serde(alias = "Method")]
    pub method: String,
    #[serde(default, alias = "Params")]
    pub params: Option<Map<String, Value>>,
}

// Only an absent member makes a notification; an explicit null id is rejected.
fn present_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    i64::deserialize(deserializer).map(Some)
}

impl Request {
    pub fn parse(line: &[u8]) -> Result<Self, ServerError> {
        let request: Request = serde_json::from_slice(line)
            .map_err(|err| ServerError::MalformedEnvelope(err.to_string()))?;
        if request.jsonrpc != JSONRPC_VERSION {
            return Err(ServerError::MalformedEnvelope(format!(
                "unsupported jsonrpc version: {}",
                request.jsonrpc
            )));
        }
        Ok(request)
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub jsonrpc: &'static str,
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
    pub data: Value,
}

impl Response {
    pub fn success(id: Option<i64>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Option<i64>, error: &ServerError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(ErrorObject {
                code: error.code(),
                message: error.to_string(),
                data: error.data(),
            }),
        }
    }
}
