use crate::config::ServerConfig;
use crate::dispatch;
use crate::mcp::contracts::{METHOD_INITIALIZE, METHOD_TOOLS_CALL, METHOD_TOOLS_LIST};
use crate::mcp::envelope::{Request, Response};
use crate::mcp::errors::ServerError;
use crate::mcp::{initialize_result, schema};
use crate::registry::ToolRegistry;
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

/// Maps request methods onto the schema synthesizer and the dispatcher.
///
/// Holds no state between requests besides the registry and configuration,
/// both fixed at construction.
pub struct Router {
    registry: ToolRegistry,
    config: ServerConfig,
}

impl Router {
    pub fn new(registry: ToolRegistry, config: ServerConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Decodes and routes one input line.
    ///
    /// A malformed line is answered with a parse error on a null id, or
    /// returned as `Err` when strict envelopes are configured. `Ok(None)`
    /// means nothing should be written.
    pub fn handle_line(&self, line: &[u8]) -> Result<Option<Response>, ServerError> {
        match Request::parse(line) {
            Ok(request) => Ok(self.route(&request)),
            Err(err) if self.config.strict_envelopes => Err(err),
            Err(err) => {
                warn!(error = %err, "rejecting malformed request line");
                Ok(Some(Response::failure(None, &err)))
            }
        }
    }

    pub fn route(&self, request: &Request) -> Option<Response> {
        let outcome = self.handle(&request.method, request.params.as_ref());

        if request.is_notification() {
            debug!(method = %request.method, "notification handled");
            return None;
        }

        Some(match outcome {
            Ok(result) => Response::success(request.id, result),
            Err(err) => {
                debug!(method = %request.method, kind = err.kind(), error = %err, "request failed");
                Response::failure(request.id, &err)
            }
        })
    }

    fn handle(&self, method: &str, params: Option<&Map<String, Value>>) -> Result<Value, ServerError> {
        match method {
            METHOD_INITIALIZE => Ok(initialize_result(&self.config)),
            METHOD_TOOLS_LIST => Ok(json!({
                "tools": schema::synthesize(self.registry.list())
            })),
            METHOD_TOOLS_CALL => {
                let content = dispatch::invoke(&self.registry, params)?;
                Ok(json!({ "content": content }))
            }
            other if self.config.reject_unknown_methods => {
                Err(ServerError::UnknownMethod(other.to_string()))
            }
            other => {
                debug!(method = other, "unknown method, returning empty result");
                Ok(json!({}))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools;
    use std::collections::HashSet;

    fn router_with(config: ServerConfig) -> Router {
        let mut registry = ToolRegistry::new();
        tools::register_all(&mut registry, Some(11)).expect("register");
        Router::new(registry, config)
    }

    fn router() -> Router {
        router_with(ServerConfig::default())
    }

    fn respond(router: &Router, request: Value) -> Value {
        let line = serde_json::to_string(&request).expect("serialize");
        let response = router
            .handle_line(line.as_bytes())
            .expect("handled")
            .expect("response");
        serde_json::to_value(&response).expect("serialize")
    }

    #[test]
    fn initialize_reports_capabilities() {
        let response = respond(
            &router(),
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
        );
        assert_eq!(response["id"], json!(1));
        assert_eq!(response["result"]["protocolVersion"], json!("2024-11-05"));
        assert_eq!(
            response["result"]["capabilities"]["tools"]["listChanged"],
            json!(true)
        );
        assert_eq!(response["result"]["serverInfo"]["name"], json!("ExampleServer"));
    }

    #[test]
    fn say_hello_scenario() {
        let response = respond(
            &router(),
            json!({
                "jsonrpc": "2.0",
                "id": 4,
                "method": "tools/call",
                "params": {"name": "say_hello", "arguments": {"name": "Ada"}}
            }),
        );
        assert_eq!(
            response["result"]["content"],
            json!([{"type": "text", "text": "Hello, Ada!"}])
        );
    }

    #[test]
    fn unknown_tool_is_error_on_same_id() {
        let response = respond(
            &router(),
            json!({
                "jsonrpc": "2.0",
                "id": 9,
                "method": "tools/call",
                "params": {"name": "does_not_exist"}
            }),
        );
        assert_eq!(response["id"], json!(9));
        assert!(response.get("result").is_none());
        assert_eq!(response["error"]["code"], json!(-32602));
        assert_eq!(response["error"]["data"]["kind"], json!("tool_not_found"));
        assert_eq!(response["error"]["data"]["tool"], json!("does_not_exist"));
    }

    #[test]
    fn listed_required_arguments_are_sufficient() {
        let router = router();
        let listing = respond(
            &router,
            json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}),
        );
        let tools = listing["result"]["tools"].as_array().expect("tools");
        assert!(!tools.is_empty());

        for tool in tools {
            let mut arguments = Map::new();
            for name in tool["inputSchema"]["required"].as_array().expect("required") {
                let name = name.as_str().expect("name");
                let sample = match tool["inputSchema"]["properties"][name]["type"].as_str() {
                    Some("integer") => json!(9),
                    Some("number") => json!(1.5),
                    Some("boolean") => json!(true),
                    _ => json!("Ada"),
                };
                arguments.insert(name.to_string(), sample);
            }
            let response = respond(
                &router,
                json!({
                    "jsonrpc": "2.0",
                    "id": 2,
                    "method": "tools/call",
                    "params": {"name": tool["name"], "arguments": arguments}
                }),
            );
            assert!(response.get("error").is_none(), "{response}");
            let content = response["result"]["content"].as_array().expect("content");
            assert!(!content.is_empty());
        }
    }

    #[test]
    fn tools_list_is_stable() {
        let router = router();
        let request = json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"});
        let first = respond(&router, request.clone());
        let second = respond(&router, request);
        assert_eq!(first, second);

        let names: HashSet<&str> = first["result"]["tools"]
            .as_array()
            .expect("tools")
            .iter()
            .filter_map(|tool| tool["name"].as_str())
            .collect();
        assert_eq!(
            names,
            HashSet::from(["say_hello", "get_time_based_quotes_based"])
        );
    }

    #[test]
    fn unknown_method_returns_empty_result() {
        let response = respond(
            &router(),
            json!({"jsonrpc": "2.0", "id": 5, "method": "ping"}),
        );
        assert_eq!(response["result"], json!({}));
    }

    #[test]
    fn unknown_method_can_be_rejected() {
        let config = ServerConfig {
            reject_unknown_methods: true,
            ..ServerConfig::default()
        };
        let response = respond(
            &router_with(config),
            json!({"jsonrpc": "2.0", "id": 5, "method": "ping"}),
        );
        assert_eq!(response["error"]["code"], json!(-32601));
        assert_eq!(response["error"]["data"]["method"], json!("ping"));
    }

    #[test]
    fn notifications_get_no_response() {
        let response = router()
            .handle_line(br#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .expect("handled");
        assert!(response.is_none());
    }

    #[test]
    fn malformed_line_answers_parse_error() {
        let response = router()
            .handle_line(b"{not json")
            .expect("handled")
            .expect("response");
        assert_eq!(response.id, None);
        assert_eq!(response.error.map(|error| error.code), Some(-32700));
    }

    #[test]
    fn strict_envelopes_surface_malformed_line() {
        let config = ServerConfig {
            strict_envelopes: true,
            ..ServerConfig::default()
        };
        let err = router_with(config)
            .handle_line(b"{not json")
            .expect_err("fatal");
        assert_eq!(err.kind(), crate::mcp::errors::MALFORMED_ENVELOPE);
    }
}
