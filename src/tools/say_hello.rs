use crate::mcp::contracts::TOOL_SAY_HELLO;
use crate::registry::{ContentItem, ParameterSpec, RegistryError, ToolDescriptor, ToolRegistry};

pub fn greeting(name: &str) -> String {
    format!("Hello, {name}!")
}

pub fn register(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register(
        ToolDescriptor::new(TOOL_SAY_HELLO, "Say hello to someone")
            .param(ParameterSpec::declared("name", "string").with_description("Name to greet")),
        |args| Ok(vec![ContentItem::text(greeting(args.string("name")?))]),
    )
}
