//! Tool descriptors and the registry that owns them.
//!
//! Tools are registered once at startup with an explicit parameter list. The
//! registry is never mutated after the server starts handling requests.

use crate::binder::BoundArguments;
use crate::mcp::errors::ServerError;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// JSON type a parameter is advertised and bound as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
}

impl ParamType {
    /// Maps a declared type name onto a semantic JSON type. Unknown names
    /// fall back to string.
    pub fn from_type_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "int" | "long" | "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "integer" => {
                ParamType::Integer
            }
            "float" | "double" | "decimal" | "f32" | "f64" | "number" => ParamType::Number,
            "bool" | "boolean" => ParamType::Boolean,
            _ => ParamType::String,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bound argument or a declared default.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
}

impl ArgValue {
    pub fn param_type(&self) -> ParamType {
        match self {
            ArgValue::String(_) => ParamType::String,
            ArgValue::Integer(_) => ParamType::Integer,
            ArgValue::Number(_) => ParamType::Number,
            ArgValue::Boolean(_) => ParamType::Boolean,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ArgValue::String(value) => json!(value),
            ArgValue::Integer(value) => json!(value),
            ArgValue::Number(value) => json!(value),
            ArgValue::Boolean(value) => json!(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub param_type: ParamType,
    pub default: Option<ArgValue>,
    pub description: Option<String>,
}

impl ParameterSpec {
    pub fn required(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            default: None,
            description: None,
        }
    }

    /// Builds a parameter from a declared type name such as `"int"` or `"bool"`.
    pub fn declared(name: impl Into<String>, type_name: &str) -> Self {
        Self::required(name, ParamType::from_type_name(type_name))
    }

    #[cfg(test)]
    pub fn with_default(mut self, default: ArgValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn advertised_description(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("Parameter {}", self.name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn param(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// The only shape a tool call result takes on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentItem {
    Text { text: String },
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        ContentItem::Text { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            ContentItem::Text { text } => text,
        }
    }
}

pub type ToolHandler =
    Box<dyn Fn(&BoundArguments) -> Result<Vec<ContentItem>, ServerError> + Send + Sync>;

pub struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: ToolHandler,
}

impl RegisteredTool {
    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    pub fn call(&self, args: &BoundArguments) -> Result<Vec<ContentItem>, ServerError> {
        (self.handler)(args)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("tool '{0}' is already registered")]
    DuplicateTool(String),
    #[error("tool '{tool}' declares parameter '{parameter}' more than once")]
    DuplicateParameter { tool: String, parameter: String },
    #[error("default for '{tool}.{parameter}' must be {expected}")]
    DefaultTypeMismatch {
        tool: String,
        parameter: String,
        expected: ParamType,
    },
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, descriptor: ToolDescriptor, handler: F) -> Result<(), RegistryError>
    where
        F: Fn(&BoundArguments) -> Result<Vec<ContentItem>, ServerError> + Send + Sync + 'static,
    {
        if self.index.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateTool(descriptor.name));
        }

        let mut seen = Vec::with_capacity(descriptor.parameters.len());
        for parameter in &descriptor.parameters {
            if seen.contains(&parameter.name.as_str()) {
                return Err(RegistryError::DuplicateParameter {
                    tool: descriptor.name.clone(),
                    parameter: parameter.name.clone(),
                });
            }
            seen.push(parameter.name.as_str());

            if let Some(default) = &parameter.default
                && default.param_type() != parameter.param_type
            {
                return Err(RegistryError::DefaultTypeMismatch {
                    tool: descriptor.name.clone(),
                    parameter: parameter.name.clone(),
                    expected: parameter.param_type,
                });
            }
        }

        tracing::debug!(
            tool = %descriptor.name,
            parameters = descriptor.parameters.len(),
            "registered tool"
        );
        self.index.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            descriptor,
            handler: Box::new(handler),
        });
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&RegisteredTool> {
        self.index.get(name).map(|&position| &self.tools[position])
    }

    /// Descriptors in registration order.
    pub fn list(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter().map(RegisteredTool::descriptor)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }
}
