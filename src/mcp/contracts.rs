pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const METHOD_INITIALIZE: &str = "initialize";
pub const METHOD_TOOLS_LIST: &str = "tools/list";
pub const METHOD_TOOLS_CALL: &str = "tools/call";

pub const TOOL_SAY_HELLO: &str = "say_hello";
pub const TOOL_TIME_QUOTE: &str = "get_time_based_quotes_based";

pub const DEFAULT_SERVER_NAME: &str = "ExampleServer";
pub const DEFAULT_SERVER_VERSION: &str = "1.0.0";
pub const DEFAULT_INSTRUCTIONS: &str = "Helps returning quotes based on the time of the day.";
