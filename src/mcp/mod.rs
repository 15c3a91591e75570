use crate::config::ServerConfig;
use serde_json::json;

pub mod contracts;
pub mod envelope;
pub mod errors;
pub mod router;
pub mod schema;

pub fn initialize_result(config: &ServerConfig) -> serde_json::Value {
    json!({
        "protocolVersion": contracts::PROTOCOL_VERSION,
        "capabilities": {
            "tools": {
                "listChanged": true
            }
        },
        "serverInfo": {
            "name": config.server_name,
            "version": config.server_version
        },
        "instructions": config.instructions
    })
}
