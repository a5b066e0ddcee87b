//! Declarative input schemas for tools.
//!
//! A [`ToolSchema`] both describes a tool to the model (as JSON Schema text) and
//! validates the arguments the model sends back before the tool body runs.
//!
//! ```rust
//! use atooling::{ParameterSpec, ToolErrorKind, ToolSchema};
//! use serde_json::json;
//!
//! let schema = ToolSchema::new("multiply", "Multiply two numbers")
//!     .parameter(ParameterSpec::number("a", "First factor"))
//!     .parameter(ParameterSpec::number("b", "Second factor"));
//!
//! let args = schema.validate(&json!({"a": 3, "b": 7})).expect("valid arguments");
//! assert_eq!(args["b"], json!(7));
//!
//! let error = schema.validate(&json!({"a": 3})).expect_err("b is required");
//! assert_eq!(error.kind, ToolErrorKind::InvalidArguments);
//! ```

use aprovider::ToolDefinition;
use serde_json::{Map, Number, Value, json};

use crate::{ToolArgs, ToolError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Number,
    Integer,
    String,
    Boolean,
}

impl ParameterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    NonZero,
    OneOf(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub kind: ParameterKind,
    pub description: String,
    pub required: bool,
    pub default: Option<Value>,
    pub constraints: Vec<Constraint>,
}

impl ParameterSpec {
    pub fn new(
        name: impl Into<String>,
        kind: ParameterKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
            default: None,
            constraints: Vec::new(),
        }
    }

    pub fn number(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Number, description)
    }

    pub fn integer(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Integer, description)
    }

    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::String, description)
    }

    pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Boolean, description)
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets the value used when the argument is absent. Implies optional.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self.required = false;
        self
    }

    pub fn non_zero(mut self) -> Self {
        self.constraints.push(Constraint::NonZero);
        self
    }

    pub fn one_of<I, S>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints
            .push(Constraint::OneOf(allowed.into_iter().map(Into::into).collect()));
        self
    }

    fn check(&self, value: &Value) -> Result<Value, ToolError> {
        let value = self.coerce(value)?;

        for constraint in &self.constraints {
            match constraint {
                Constraint::NonZero => {
                    if value.as_f64() == Some(0.0) {
                        return Err(ToolError::invalid_arguments(format!(
                            "parameter '{}' must be non-zero",
                            self.name
                        )));
                    }
                }
                Constraint::OneOf(allowed) => {
                    let matches = value
                        .as_str()
                        .is_some_and(|text| allowed.iter().any(|item| item == text));
                    if !matches {
                        return Err(ToolError::invalid_arguments(format!(
                            "parameter '{}' must be one of: {}",
                            self.name,
                            allowed.join(", ")
                        )));
                    }
                }
            }
        }

        Ok(value)
    }

    // Numeric strings are accepted for numeric kinds, mirroring lenient model output.
    fn coerce(&self, value: &Value) -> Result<Value, ToolError> {
        let coerced = match (self.kind, value) {
            (ParameterKind::Number, Value::Number(_)) => Some(value.clone()),
            (ParameterKind::Number, Value::String(text)) => text
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number),
            (ParameterKind::Integer, Value::Number(number)) => integral(number),
            (ParameterKind::Integer, Value::String(text)) => {
                text.trim().parse::<i64>().ok().map(Value::from)
            }
            (ParameterKind::String, Value::String(_)) => Some(value.clone()),
            (ParameterKind::Boolean, Value::Bool(_)) => Some(value.clone()),
            _ => None,
        };

        coerced.ok_or_else(|| {
            ToolError::invalid_arguments(format!(
                "parameter '{}' must be a {}, got {}",
                self.name,
                self.kind.as_str(),
                value
            ))
        })
    }

    fn to_json_schema(&self) -> Value {
        let mut property = Map::new();
        property.insert("type".to_string(), json!(self.kind.as_str()));
        property.insert("description".to_string(), json!(self.description));
        if let Some(default) = &self.default {
            property.insert("default".to_string(), default.clone());
        }
        for constraint in &self.constraints {
            if let Constraint::OneOf(allowed) = constraint {
                property.insert("enum".to_string(), json!(allowed));
            }
        }
        Value::Object(property)
    }
}

fn integral(number: &Number) -> Option<Value> {
    if number.is_i64() || number.is_u64() {
        return Some(Value::Number(number.clone()));
    }

    number
        .as_f64()
        .filter(|value| value.fract() == 0.0 && value.abs() < i64::MAX as f64)
        .map(|value| Value::from(value as i64))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
}

impl ToolSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn parameter(mut self, spec: ParameterSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    /// Checks `arguments` against the declared parameters.
    ///
    /// Returns the validated object with defaults filled in and numeric strings
    /// coerced. Unknown keys are passed through untouched.
    pub fn validate(&self, arguments: &Value) -> Result<ToolArgs, ToolError> {
        let Some(object) = arguments.as_object() else {
            return Err(ToolError::invalid_arguments(format!(
                "arguments for '{}' must be a JSON object, got {}",
                self.name, arguments
            ))
            .with_tool_name(self.name.clone()));
        };

        let mut validated = object.clone();
        for spec in &self.parameters {
            match object.get(&spec.name) {
                Some(Value::Null) | None => {
                    if let Some(default) = &spec.default {
                        validated.insert(spec.name.clone(), default.clone());
                    } else if spec.required {
                        return Err(ToolError::invalid_arguments(format!(
                            "missing required parameter '{}'",
                            spec.name
                        ))
                        .with_tool_name(self.name.clone()));
                    }
                }
                Some(value) => {
                    let checked = spec
                        .check(value)
                        .map_err(|error| error.with_tool_name(self.name.clone()))?;
                    validated.insert(spec.name.clone(), checked);
                }
            }
        }

        Ok(validated)
    }

    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|spec| (spec.name.clone(), spec.to_json_schema()))
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.to_json_schema().to_string(),
        }
    }
}
