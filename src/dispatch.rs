use crate::binder::bind;
use crate::mcp::errors::ServerError;
use crate::registry::{ContentItem, ToolRegistry};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Runs one `tools/call` request against the registry.
///
/// `params` is the request's `params` object. The tool runs at most once and
/// only after every argument has been bound.
pub fn invoke(
    registry: &ToolRegistry,
    params: Option<&Map<String, Value>>,
) -> Result<Vec<ContentItem>, ServerError> {
    let params = params.ok_or(ServerError::MissingToolName)?;

    let name = params
        .get("name")
        .and_then(|value| value.as_str())
        .filter(|name| !name.is_empty())
        .ok_or(ServerError::MissingToolName)?;

    let empty = Map::new();
    let arguments = match params.get("arguments") {
        None => &empty,
        Some(Value::Object(arguments)) => arguments,
        Some(_) => return Err(ServerError::InvalidArgumentsShape),
    };

    let tool = registry
        .lookup(name)
        .ok_or_else(|| ServerError::ToolNotFound(name.to_string()))?;

    let bound = bind(&tool.descriptor().parameters, arguments).inspect_err(|err| {
        debug!(tool = name, error = %err, "argument binding failed");
    })?;

    let content = tool.call(&bound)?;
    if content.is_empty() {
        warn!(tool = name, "tool returned no content");
        return Err(ServerError::InvalidToolResult(name.to_string()));
    }

    info!(tool = name, items = content.len(), "tool call completed");
    Ok(content)
}
