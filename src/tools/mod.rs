use crate::registry::{RegistryError, ToolRegistry};

pub mod say_hello;
pub mod time_quote;

/// Registers the built-in tools in their advertised order.
pub fn register_all(registry: &mut ToolRegistry, quote_seed: Option<u64>) -> Result<(), RegistryError> {
    time_quote::register(registry, quote_seed)?;
    say_hello::register(registry)?;
    Ok(())
}
