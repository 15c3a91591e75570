use serde_json::{Value, json};
use thiserror::Error;

pub const MALFORMED_ENVELOPE: &str = "malformed_envelope";
pub const TOOL_NOT_FOUND: &str = "tool_not_found";
pub const MISSING_TOOL_NAME: &str = "missing_tool_name";
pub const INVALID_ARGUMENTS_SHAPE: &str = "invalid_arguments_shape";
pub const MISSING_REQUIRED_ARGUMENT: &str = "missing_required_argument";
pub const ARGUMENT_TYPE_MISMATCH: &str = "argument_type_mismatch";
pub const INVALID_TOOL_RESULT: &str = "invalid_tool_result";
pub const UNKNOWN_METHOD: &str = "unknown_method";

pub const PARSE_ERROR_CODE: i64 = -32700;
pub const METHOD_NOT_FOUND_CODE: i64 = -32601;
pub const INVALID_PARAMS_CODE: i64 = -32602;
pub const INTERNAL_ERROR_CODE: i64 = -32603;

/// Every failure a single request can produce.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServerError {
    #[error("malformed request envelope: {0}")]
    MalformedEnvelope(String),
    #[error("tool not found: {0}")]
    ToolNotFound(String),
    #[error("params.name must be a non-empty string")]
    MissingToolName,
    #[error("params.arguments must be an object")]
    InvalidArgumentsShape,
    #[error("missing required argument '{0}'")]
    MissingRequiredArgument(String),
    #[error("argument '{parameter}' must be {expected}, got {found}")]
    ArgumentTypeMismatch {
        parameter: String,
        expected: &'static str,
        found: String,
    },
    #[error("tool '{0}' did not return any content")]
    InvalidToolResult(String),
    #[error("method not found: {0}")]
    UnknownMethod(String),
}

impl ServerError {
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::MalformedEnvelope(_) => MALFORMED_ENVELOPE,
            ServerError::ToolNotFound(_) => TOOL_NOT_FOUND,
            ServerError::MissingToolName => MISSING_TOOL_NAME,
            ServerError::InvalidArgumentsShape => INVALID_ARGUMENTS_SHAPE,
            ServerError::MissingRequiredArgument(_) => MISSING_REQUIRED_ARGUMENT,
            ServerError::ArgumentTypeMismatch { .. } => ARGUMENT_TYPE_MISMATCH,
            ServerError::InvalidToolResult(_) => INVALID_TOOL_RESULT,
            ServerError::UnknownMethod(_) => UNKNOWN_METHOD,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            ServerError::MalformedEnvelope(_) => PARSE_ERROR_CODE,
            ServerError::UnknownMethod(_) => METHOD_NOT_FOUND_CODE,
            ServerError::InvalidToolResult(_) => INTERNAL_ERROR_CODE,
            ServerError::ToolNotFound(_)
            | ServerError::MissingToolName
            | ServerError::InvalidArgumentsShape
            | ServerError::MissingRequiredArgument(_)
            | ServerError::ArgumentTypeMismatch { .. } => INVALID_PARAMS_CODE,
        }
    }

    /// Extra detail carried in the JSON-RPC `error.data` member.
    pub fn data(&self) -> Value {
        let mut data = json!({ "kind": self.kind() });
        let detail = match self {
            ServerError::ToolNotFound(name) | ServerError::InvalidToolResult(name) => {
                Some(("tool", name.as_str()))
            }
            ServerError::MissingRequiredArgument(parameter)
            | ServerError::ArgumentTypeMismatch { parameter, .. } => {
                Some(("parameter", parameter.as_str()))
            }
            ServerError::UnknownMethod(method) => Some(("method", method.as_str())),
            _ => None,
        };

        if let Some((key, value)) = detail
            && let Some(obj) = data.as_object_mut()
        {
            obj.insert(key.to_string(), json!(value));
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_errors_name_the_parameter() {
        let err = ServerError::MissingRequiredArgument("hour".to_string());
        assert_eq!(err.kind(), MISSING_REQUIRED_ARGUMENT);
        assert_eq!(err.code(), INVALID_PARAMS_CODE);
        assert_eq!(err.data(), json!({"kind": "missing_required_argument", "parameter": "hour"}));
        assert_eq!(err.to_string(), "missing required argument 'hour'");
    }

    #[test]
    fn codes_follow_json_rpc() {
        assert_eq!(
            ServerError::MalformedEnvelope("eof".to_string()).code(),
            PARSE_ERROR_CODE
        );
        assert_eq!(
            ServerError::UnknownMethod("ping".to_string()).code(),
            METHOD_NOT_FOUND_CODE
        );
        assert_eq!(
            ServerError::InvalidToolResult("t".to_string()).code(),
            INTERNAL_ERROR_CODE
        );
        assert_eq!(ServerError::MissingToolName.data(), json!({"kind": "missing_tool_name"}));
    }

    #[test]
    fn mismatch_message_is_descriptive() {
        let err = ServerError::ArgumentTypeMismatch {
            parameter: "hour".to_string(),
            expected: "integer",
            found: "string".to_string(),
        };
        assert_eq!(err.to_string(), "argument 'hour' must be integer, got string");
    }
}
