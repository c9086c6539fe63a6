use serde_json::{Map, Value};

use super::{ValidationResult, ValidatorError};

/// Decodes a check endpoint body into a result, or the provider's error.
pub(crate) fn parse_response(body: &[u8]) -> Result<ValidationResult, ValidatorError> {
    let value: Value = serde_json::from_slice(body).map_err(ValidatorError::decode)?;
    let fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(ValidatorError::UnexpectedResponse {
                found: json_kind(&other),
            });
        }
    };

    if let Some(error) = fields.get("error") {
        return Err(api_error(error));
    }

    Ok(ValidationResult::from_response(&fields))
}

fn api_error(error: &Value) -> ValidatorError {
    let empty = Map::new();
    let error = error.as_object().unwrap_or(&empty);
    let text = |key: &str| {
        error
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default()
    };

    let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
    ValidatorError::api(code, text("type"), text("info"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
