//! JSON argument parsing helpers for tool bodies.
//!
//! ```rust
//! use atooling::{parse_json_object, required_f64};
//!
//! let args = parse_json_object(r#"{"a":2.5}"#).expect("object should parse");
//! let a = required_f64(&args, "a").expect("a should be present");
//! assert_eq!(a, 2.5);
//! ```

use serde_json::{Map, Value};

use crate::ToolError;

pub type ToolArgs = Map<String, Value>;

pub fn parse_json_value(args_json: &str) -> Result<Value, ToolError> {
    serde_json::from_str(args_json)
        .map_err(|err| ToolError::invalid_arguments(format!("invalid JSON arguments: {err}")))
}

pub fn parse_json_object(args_json: &str) -> Result<ToolArgs, ToolError> {
    let value = parse_json_value(args_json)?;
    value
        .as_object()
        .cloned()
        .ok_or_else(|| ToolError::invalid_arguments("expected JSON object arguments"))
}

pub fn required_f64(args: &ToolArgs, key: &str) -> Result<f64, ToolError> {
    args.get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| ToolError::invalid_arguments(format!("missing required number: '{key}'")))
}

pub fn required_string(args: &ToolArgs, key: &str) -> Result<String, ToolError> {
    args.get(key)
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| ToolError::invalid_arguments(format!("missing required string: '{key}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_object_and_extract_values() {
        let args = parse_json_object(r#"{"a":4,"error_type":"timeout"}"#).expect("args");
        assert_eq!(required_f64(&args, "a").expect("a"), 4.0);
        assert_eq!(required_string(&args, "error_type").expect("type"), "timeout");
    }

    #[test]
    fn missing_or_mistyped_values_are_invalid_arguments() {
        let args = parse_json_object(r#"{"a":"four"}"#).expect("args");
        let error = required_f64(&args, "a").expect_err("string is not a number");
        assert_eq!(error.kind, crate::ToolErrorKind::InvalidArguments);

        let error = parse_json_object("[1,2]").expect_err("array is not an object");
        assert_eq!(error.kind, crate::ToolErrorKind::InvalidArguments);
    }
}
