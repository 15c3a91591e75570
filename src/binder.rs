use crate::mcp::errors::ServerError;
use crate::registry::{ArgValue, ParamType, ParameterSpec};
use serde_json::{Map, Value};

/// Arguments converted to their declared types, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArguments {
    names: Vec<String>,
    values: Vec<ArgValue>,
}

impl BoundArguments {
    #[cfg(test)]
    pub fn values(&self) -> &[ArgValue] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .map(|position| &self.values[position])
    }

    pub fn string(&self, name: &str) -> Result<&str, ServerError> {
        match self.require(name)? {
            ArgValue::String(value) => Ok(value),
            other => Err(accessor_mismatch(name, ParamType::String, other)),
        }
    }

    pub fn integer(&self, name: &str) -> Result<i64, ServerError> {
        match self.require(name)? {
            ArgValue::Integer(value) => Ok(*value),
            other => Err(accessor_mismatch(name, ParamType::Integer, other)),
        }
    }

    #[cfg(test)]
    pub fn number(&self, name: &str) -> Result<f64, ServerError> {
        match self.require(name)? {
            ArgValue::Number(value) => Ok(*value),
            ArgValue::Integer(value) => Ok(*value as f64),
            other => Err(accessor_mismatch(name, ParamType::Number, other)),
        }
    }

    #[cfg(test)]
    pub fn boolean(&self, name: &str) -> Result<bool, ServerError> {
        match self.require(name)? {
            ArgValue::Boolean(value) => Ok(*value),
            other => Err(accessor_mismatch(name, ParamType::Boolean, other)),
        }
    }

    fn require(&self, name: &str) -> Result<&ArgValue, ServerError> {
        self.get(name)
            .ok_or_else(|| ServerError::MissingRequiredArgument(name.to_string()))
    }
}

fn accessor_mismatch(name: &str, expected: ParamType, actual: &ArgValue) -> ServerError {
    ServerError::ArgumentTypeMismatch {
        parameter: name.to_string(),
        expected: expected.as_str(),
        found: actual.param_type().as_str().to_string(),
    }
}

/// Binds a JSON argument object against a tool's parameter list.
///
/// Parameters are visited in declaration order and the first failure is
/// returned; nothing is handed to the tool unless every parameter binds.
/// Keys that match no parameter are ignored.
pub fn bind(
    parameters: &[ParameterSpec],
    arguments: &Map<String, Value>,
) -> Result<BoundArguments, ServerError> {
    let mut names = Vec::with_capacity(parameters.len());
    let mut values = Vec::with_capacity(parameters.len());

    for parameter in parameters {
        let value = match (arguments.get(&parameter.name), &parameter.default) {
            (Some(raw), _) => convert(parameter, raw)?,
            (None, Some(default)) => default.clone(),
            (None, None) => {
                return Err(ServerError::MissingRequiredArgument(parameter.name.clone()));
            }
        };
        names.push(parameter.name.clone());
        values.push(value);
    }

    Ok(BoundArguments { names, values })
}

fn convert(parameter: &ParameterSpec, raw: &Value) -> Result<ArgValue, ServerError> {
    let converted = match parameter.param_type {
        ParamType::String => raw.as_str().map(|value| ArgValue::String(value.to_string())),
        ParamType::Integer => integer_from(raw).map(ArgValue::Integer),
        ParamType::Number => raw.as_f64().map(ArgValue::Number),
        ParamType::Boolean => raw.as_bool().map(ArgValue::Boolean),
    };

    converted.ok_or_else(|| ServerError::ArgumentTypeMismatch {
        parameter: parameter.name.clone(),
        expected: parameter.param_type.as_str(),
        found: json_type_name(raw).to_string(),
    })
}

// 9 and 9.0 bind, 9.5 does not. Values outside i64 do not either.
fn integer_from(raw: &Value) -> Option<i64> {
    if let Some(value) = raw.as_i64() {
        return Some(value);
    }
    let value = raw.as_f64()?;
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then_some(value as i64)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_i64() || number.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
