use crate::registry::ToolDescriptor;
use serde::Serialize;
use serde_json::{Map, Value, json};

/// One entry of the `tools/list` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: &'static str,
    pub properties: Map<String, Value>,
    pub required: Vec<String>,
}

pub fn synthesize<'a>(descriptors: impl IntoIterator<Item = &'a ToolDescriptor>) -> Vec<ToolInfo> {
    descriptors.into_iter().map(tool_info).collect()
}

fn tool_info(descriptor: &ToolDescriptor) -> ToolInfo {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for parameter in &descriptor.parameters {
        let mut property = json!({
            "type": parameter.param_type.as_str(),
            "description": parameter.advertised_description(),
        });
        if let Some(default) = &parameter.default
            && let Some(obj) = property.as_object_mut()
        {
            obj.insert("default".to_string(), default.to_json());
        }
        if !parameter.has_default() {
            required.push(parameter.name.clone());
        }
        properties.insert(parameter.name.clone(), property);
    }

    ToolInfo {
        name: descriptor.name.clone(),
        description: descriptor.description.clone(),
        input_schema: InputSchema {
            schema_type: "object",
            properties,
            required,
        },
    }
}
